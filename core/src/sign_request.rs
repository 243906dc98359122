use crate::constants::{AUTH_SCHEME, CONTENT_TYPE_JSON};
use crate::hash::{hex_hmac_sha1, hex_md5};
use crate::time::{format_http_date, now, DateTime};
use crate::Credential;
use http::Method;
use log::debug;

/// RequestSigner for Uploadcare REST signature.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

/// Headers produced by signing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Value of the `Date` header.
    pub date: String,
    /// Hex encoded MD5 of the body.
    pub content_md5: String,
    /// Hex encoded HMAC-SHA1 signature.
    pub signature: String,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

impl RequestSigner {
    /// Create a new signer for Uploadcare REST requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    /// Sign a request.
    ///
    /// `path` is the path plus query string that goes on the wire, without
    /// scheme and host. `content` is the serialized body, empty if there is
    /// none.
    pub fn sign(
        &self,
        cred: &Credential,
        method: &Method,
        path: &str,
        content: &str,
    ) -> SignedRequest {
        let date = format_http_date(self.get_time());
        let content_md5 = hex_md5(content.as_bytes());

        let string_to_sign = string_to_sign(method, &content_md5, CONTENT_TYPE_JSON, &date, path);
        debug!("string to sign: {}", &string_to_sign);

        let signature = hex_hmac_sha1(cred.secret_key.as_bytes(), string_to_sign.as_bytes());
        let authorization = format!("{} {}:{}", AUTH_SCHEME, cred.public_key, signature);

        SignedRequest {
            date,
            content_md5,
            signature,
            authorization,
        }
    }
}

/// Construct string to sign.
///
/// # Format
///
/// ```text
///   VERB + "\n"
/// + Content-MD5 + "\n"
/// + Content-Type + "\n"
/// + Date + "\n"
/// + Path
/// ```
pub fn string_to_sign(
    method: &Method,
    content_md5: &str,
    content_type: &str,
    date: &str,
    path: &str,
) -> String {
    [method.as_str(), content_md5, content_type, date, path].join("\n")
}
