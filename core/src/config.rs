use crate::constants::*;
use crate::utils::Redact;
use crate::{Context, Credential, Error, Result};
use std::fmt::{Debug, Formatter};

/// Config carries all the configuration for Uploadcare requests.
///
/// The config is read-only while a request is in flight; build it once and
/// hand it to [`Client::new`](crate::Client::new).
#[derive(Clone)]
pub struct Config {
    /// `public_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UPLOADCARE_PUBLIC_KEY`]
    pub public_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`UPLOADCARE_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// Base url of the REST API, default to `https://api.uploadcare.com/`.
    ///
    /// Overridden by env value: [`UPLOADCARE_API_BASE`]
    pub api_base: String,
    /// Base url of the upload API, default to `https://upload.uploadcare.com/`.
    ///
    /// Overridden by env value: [`UPLOADCARE_UPLOAD_BASE`]
    pub upload_base: String,
    /// REST API version sent in the `Accept` header, default to `0.5`.
    ///
    /// Overridden by env value: [`UPLOADCARE_API_VERSION`]
    pub api_version: String,
    /// Verify TLS certificates of the REST API, default to `true`.
    ///
    /// Overridden by env value: [`UPLOADCARE_VERIFY_API_SSL`]
    pub verify_api_ssl: bool,
    /// Verify TLS certificates of the upload API, default to `true`.
    ///
    /// Overridden by env value: [`UPLOADCARE_VERIFY_UPLOAD_SSL`]
    pub verify_upload_ssl: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_key: None,
            secret_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            upload_base: DEFAULT_UPLOAD_BASE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            verify_api_ssl: true,
            verify_upload_ssl: true,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("public_key", &Redact::from(&self.public_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("api_base", &self.api_base)
            .field("upload_base", &self.upload_base)
            .field("api_version", &self.api_version)
            .field("verify_api_ssl", &self.verify_api_ssl)
            .field("verify_upload_ssl", &self.verify_upload_ssl)
            .finish()
    }
}

impl Config {
    /// Set the public key.
    pub fn with_public_key(mut self, public_key: &str) -> Self {
        self.public_key = Some(public_key.to_string());
        self
    }

    /// Set the secret key.
    pub fn with_secret_key(mut self, secret_key: &str) -> Self {
        self.secret_key = Some(secret_key.to_string());
        self
    }

    /// Load config from env.
    ///
    /// Keys already present on the config are kept, everything else is
    /// replaced when the env value is set.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if let Some(v) = ctx.env_var(UPLOADCARE_PUBLIC_KEY) {
            self.public_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(UPLOADCARE_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(UPLOADCARE_API_BASE) {
            self.api_base = v;
        }
        if let Some(v) = ctx.env_var(UPLOADCARE_UPLOAD_BASE) {
            self.upload_base = v;
        }
        if let Some(v) = ctx.env_var(UPLOADCARE_API_VERSION) {
            self.api_version = v;
        }
        if let Some(v) = ctx.env_var(UPLOADCARE_VERIFY_API_SSL) {
            self.verify_api_ssl = parse_bool(UPLOADCARE_VERIFY_API_SSL, &v)?;
        }
        if let Some(v) = ctx.env_var(UPLOADCARE_VERIFY_UPLOAD_SSL) {
            self.verify_upload_ssl = parse_bool(UPLOADCARE_VERIFY_UPLOAD_SSL, &v)?;
        }

        Ok(self)
    }

    /// Build the signing credential from configured keys.
    pub fn credential(&self) -> Credential {
        Credential {
            public_key: self.public_key.clone().unwrap_or_default(),
            secret_key: self.secret_key.clone().unwrap_or_default(),
        }
    }

    /// Versioned media type sent in the `Accept` header of REST requests.
    pub fn accept(&self) -> String {
        format!("application/vnd.uploadcare-v{}+json", self.api_version)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(Error::config_invalid(format!(
            "env {key} must be a boolean, got: {value}"
        ))),
    }
}
