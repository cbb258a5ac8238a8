//! Credential transformation for the webservice login handshake

use md5::{Digest, Md5};

/// Hash a one-time challenge token together with the shared access key.
///
/// The webservice expects `accessKey = md5(challenge + key)` in place of the
/// plaintext secret. This is plain concatenation, not an HMAC; the one-time
/// challenge token is what keeps the digest single-use.
pub fn access_key_hash(challenge_token: &str, access_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(challenge_token.as_bytes());
    hasher.update(access_key.as_bytes());
    hex::encode(hasher.finalize())
}
