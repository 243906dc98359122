use crate::utils::Redact;
use std::fmt::{Debug, Formatter};

/// Credential that holds the public key and secret key.
///
/// Missing keys are represented as empty strings: requests are still signed
/// (with an empty HMAC key) and the API decides whether to accept them.
#[derive(Default, Clone)]
pub struct Credential {
    /// Public key of the project, identifies the account.
    pub public_key: String,
    /// Secret key of the project, used to sign REST requests.
    pub secret_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(public_key: &str, secret_key: &str) -> Self {
        Self {
            public_key: public_key.to_string(),
            secret_key: secret_key.to_string(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("public_key", &Redact::from(&self.public_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}
