//! Module name and id resolution for the Vtiger webservice API
//!
//! The webservice addresses every entity type three ways: a lowercase key
//! used by callers of this crate, a numeric id used inside composite record
//! ids, and a PascalCase display name expected in `elementType` parameters
//! and query text. The set is closed and compiled in; lookups outside it
//! return `None` so callers can fail before anything reaches the wire.

/// CRM modules exposed by the webservice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Calendar,
    Leads,
    Accounts,
    Contacts,
    Potentials,
    Products,
    Documents,
    Emails,
    HelpDesk,
    Faq,
    Vendors,
    PriceBooks,
    Quotes,
    PurchaseOrder,
    SalesOrder,
    Invoice,
    Campaigns,
    Events,
    Users,
    Groups,
    Currency,
    DocumentFolders,
}

impl Module {
    /// Every module the webservice exposes.
    pub const ALL: [Module; 22] = [
        Module::Calendar,
        Module::Leads,
        Module::Accounts,
        Module::Contacts,
        Module::Potentials,
        Module::Products,
        Module::Documents,
        Module::Emails,
        Module::HelpDesk,
        Module::Faq,
        Module::Vendors,
        Module::PriceBooks,
        Module::Quotes,
        Module::PurchaseOrder,
        Module::SalesOrder,
        Module::Invoice,
        Module::Campaigns,
        Module::Events,
        Module::Users,
        Module::Groups,
        Module::Currency,
        Module::DocumentFolders,
    ];

    /// Resolve a lowercase module key, `None` for anything outside the set.
    pub fn from_key(key: &str) -> Option<Module> {
        let module = match key {
            "calendar" => Module::Calendar,
            "leads" => Module::Leads,
            "accounts" => Module::Accounts,
            "contacts" => Module::Contacts,
            "potentials" => Module::Potentials,
            "products" => Module::Products,
            "documents" => Module::Documents,
            "emails" => Module::Emails,
            "helpdesk" => Module::HelpDesk,
            "faq" => Module::Faq,
            "vendors" => Module::Vendors,
            "pricebooks" => Module::PriceBooks,
            "quotes" => Module::Quotes,
            "purchaseorder" => Module::PurchaseOrder,
            "salesorder" => Module::SalesOrder,
            "invoice" => Module::Invoice,
            "campaigns" => Module::Campaigns,
            "events" => Module::Events,
            "users" => Module::Users,
            "groups" => Module::Groups,
            "currency" => Module::Currency,
            "documentfolders" => Module::DocumentFolders,
            _ => return None,
        };
        Some(module)
    }

    /// Lowercase key form of this module.
    pub fn key(&self) -> &'static str {
        match self {
            Module::Calendar => "calendar",
            Module::Leads => "leads",
            Module::Accounts => "accounts",
            Module::Contacts => "contacts",
            Module::Potentials => "potentials",
            Module::Products => "products",
            Module::Documents => "documents",
            Module::Emails => "emails",
            Module::HelpDesk => "helpdesk",
            Module::Faq => "faq",
            Module::Vendors => "vendors",
            Module::PriceBooks => "pricebooks",
            Module::Quotes => "quotes",
            Module::PurchaseOrder => "purchaseorder",
            Module::SalesOrder => "salesorder",
            Module::Invoice => "invoice",
            Module::Campaigns => "campaigns",
            Module::Events => "events",
            Module::Users => "users",
            Module::Groups => "groups",
            Module::Currency => "currency",
            Module::DocumentFolders => "documentfolders",
        }
    }

    /// Numeric module id, the prefix of composite record ids.
    ///
    /// Calendar and HelpDesk share id 9 in the remote schema. Kept verbatim;
    /// nothing here inverts id back to module.
    pub fn id(&self) -> u32 {
        match self {
            Module::Calendar => 9,
            Module::Leads => 2,
            Module::Accounts => 3,
            Module::Contacts => 4,
            Module::Potentials => 5,
            Module::Products => 6,
            Module::Documents => 7,
            Module::Emails => 8,
            Module::HelpDesk => 9,
            Module::Faq => 10,
            Module::Vendors => 11,
            Module::PriceBooks => 12,
            Module::Quotes => 13,
            Module::PurchaseOrder => 14,
            Module::SalesOrder => 15,
            Module::Invoice => 16,
            Module::Campaigns => 17,
            Module::Events => 18,
            Module::Users => 19,
            Module::Groups => 20,
            Module::Currency => 21,
            Module::DocumentFolders => 22,
        }
    }

    /// Display name the webservice expects in `elementType` and query text.
    pub fn name(&self) -> &'static str {
        match self {
            Module::Calendar => "Calendar",
            Module::Leads => "Leads",
            Module::Accounts => "Accounts",
            Module::Contacts => "Contacts",
            Module::Potentials => "Potentials",
            Module::Products => "Products",
            Module::Documents => "Documents",
            Module::Emails => "Emails",
            Module::HelpDesk => "HelpDesk",
            Module::Faq => "Faq",
            Module::Vendors => "Vendors",
            Module::PriceBooks => "PriceBooks",
            Module::Quotes => "Quotes",
            Module::PurchaseOrder => "PurchaseOrder",
            Module::SalesOrder => "SalesOrder",
            Module::Invoice => "Invoice",
            Module::Campaigns => "Campaigns",
            Module::Events => "Events",
            Module::Users => "Users",
            Module::Groups => "Groups",
            Module::Currency => "Currency",
            Module::DocumentFolders => "DocumentFolders",
        }
    }
}

/// Numeric id for a module key, `None` for unknown keys.
pub fn module_id(key: &str) -> Option<u32> {
    Module::from_key(key).map(|m| m.id())
}

/// Webservice display name for a module key, `None` for unknown keys.
pub fn module_name(key: &str) -> Option<&'static str> {
    Module::from_key(key).map(|m| m.name())
}
