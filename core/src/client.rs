use crate::{rest, upload, Config, Context, FilePart, RequestSigner, Result};
use http::Method;
use log::debug;
use serde_json::Value;
use std::sync::Arc;

/// Client is the main struct used to talk to the Uploadcare APIs.
///
/// Every call is a single blocking attempt, nothing is retried.
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    config: Arc<Config>,
    signer: RequestSigner,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, config: Config) -> Self {
        Self {
            ctx,
            config: Arc::new(config),
            signer: RequestSigner::new(),
        }
    }

    /// Get the config used by this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Make a REST API request.
    ///
    /// Returns the parsed JSON body, or `None` if the API answered with
    /// `204 No Content`.
    ///
    /// ```no_run
    /// use http::Method;
    /// use uploadcare_core::{Client, Config, Context};
    ///
    /// # fn main() -> uploadcare_core::Result<()> {
    /// let client = Client::new(Context::new(), Config::default());
    /// let files = client.rest_request(Method::GET, "files/?limit=10", None)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn rest_request(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
    ) -> Result<Option<Value>> {
        let req = rest::build_request(&self.config, &self.signer, method, path, data)?;
        debug!(
            "sent: verb: {}, path: {}, headers: {:?}, data: {:?}",
            req.method(),
            req.uri().path_and_query().map(|v| v.as_str()).unwrap_or("/"),
            req.headers(),
            req.body()
        );

        let resp = self.ctx.http_send(req)?;
        rest::parse_response(resp)
    }

    /// Make an upload API request.
    ///
    /// ```no_run
    /// use http::Method;
    /// use uploadcare_core::{Client, Config, Context, FilePart};
    ///
    /// # fn main() -> uploadcare_core::Result<()> {
    /// let client = Client::new(Context::new(), Config::default());
    /// let file = FilePart::new("file", std::fs::read("photo.jpg").unwrap()).with_file_name("photo.jpg");
    /// let resp = client.upload_request(Method::POST, "base/", None, Some(std::slice::from_ref(&file)))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn upload_request(
        &self,
        method: Method,
        path: &str,
        data: Option<&[(String, String)]>,
        files: Option<&[FilePart]>,
    ) -> Result<Value> {
        let req = upload::build_request(&self.config, method, path, data, files)?;
        debug!(
            "sent: verb: {}, path: {}, body: {:?}",
            req.method(),
            req.uri().path(),
            req.body()
        );

        let resp = self.ctx.http_send(req)?;
        upload::parse_response(resp)
    }
}
