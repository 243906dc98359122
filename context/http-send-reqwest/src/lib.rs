//! Blocking [`HttpSend`] implementation backed by [`reqwest`].
//!
//! Requests carrying [`TlsVerify(false)`](TlsVerify) are sent with a second
//! client that skips certificate verification. That client is built from
//! the same [`ClientBuilder`] as the verifying one, so timeouts, proxies and
//! redirect policy carry over. It's only built the first time it's needed.

use bytes::Bytes;
use log::debug;
use once_cell::sync::OnceCell;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, ClientBuilder, RequestBuilder};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use uploadcare_core::{Body, Error, HttpSend, Result, TlsVerify};

type MakeBuilder = Arc<dyn Fn() -> ClientBuilder + Send + Sync>;

/// HttpSend over `reqwest::blocking::Client`.
///
/// Redirects are followed by reqwest's default policy. Timeouts are not set
/// here, configure them on the builder passed to
/// [`ReqwestHttpSend::from_builder`].
pub struct ReqwestHttpSend {
    client: Client,
    insecure_client: OnceCell<Client>,
    make_builder: Option<MakeBuilder>,
}

impl Debug for ReqwestHttpSend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestHttpSend")
            .field("client", &self.client)
            .field("insecure_client", &self.insecure_client)
            .finish_non_exhaustive()
    }
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        Self {
            client: Client::default(),
            insecure_client: OnceCell::new(),
            make_builder: Some(Arc::new(Client::builder)),
        }
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::blocking::Client.
    ///
    /// A pre-built client can't be cloned into a non-verifying one: requests
    /// with [`TlsVerify(false)`](TlsVerify) fail with
    /// [`ErrorKind::ConfigInvalid`](uploadcare_core::ErrorKind::ConfigInvalid)
    /// unless [`ReqwestHttpSend::with_insecure_client`] is also set.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            insecure_client: OnceCell::new(),
            make_builder: None,
        }
    }

    /// Create a new ReqwestHttpSend from a builder factory.
    ///
    /// `make_builder` is called once now for the verifying client, and once
    /// more, with certificate checks turned off, the first time a request
    /// carries [`TlsVerify(false)`](TlsVerify).
    pub fn from_builder(
        make_builder: impl Fn() -> ClientBuilder + Send + Sync + 'static,
    ) -> Result<Self> {
        let client = make_builder()
            .build()
            .map_err(|e| Error::config_invalid(e.to_string()).with_source(e))?;

        Ok(Self {
            client,
            insecure_client: OnceCell::new(),
            make_builder: Some(Arc::new(make_builder)),
        })
    }

    /// Use a pre-built client for requests that skip TLS verification.
    pub fn with_insecure_client(self, client: Client) -> Self {
        let insecure_client = OnceCell::new();
        let _ = insecure_client.set(client);
        Self {
            insecure_client,
            ..self
        }
    }

    fn client(&self, verify: TlsVerify) -> Result<&Client> {
        if verify.0 {
            return Ok(&self.client);
        }

        self.insecure_client.get_or_try_init(|| {
            let Some(make_builder) = &self.make_builder else {
                return Err(Error::config_invalid(
                    "tls verification is disabled but no insecure client is configured, \
                     use ReqwestHttpSend::from_builder or with_insecure_client",
                ));
            };

            debug!("building http client without tls verification");
            make_builder()
                .danger_accept_invalid_certs(true)
                .build()
                .map_err(|e| Error::config_invalid(e.to_string()).with_source(e))
        })
    }
}

impl HttpSend for ReqwestHttpSend {
    fn http_send(&self, req: http::Request<Body>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let verify = parts
            .extensions
            .get::<TlsVerify>()
            .copied()
            .unwrap_or_default();

        let builder = self
            .client(verify)?
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers);
        let builder = apply_body(builder, body)?;

        let resp = builder
            .send()
            .map_err(|e| Error::connection(e.to_string()).with_source(e))?;

        let mut res = http::Response::builder()
            .status(resp.status())
            .version(resp.version());
        for (name, value) in resp.headers() {
            res = res.header(name, value);
        }

        let bs = resp
            .bytes()
            .map_err(|e| Error::connection(e.to_string()).with_source(e))?;
        Ok(res.body(bs)?)
    }
}

fn apply_body(builder: RequestBuilder, body: Body) -> Result<RequestBuilder> {
    let builder = match body {
        Body::Empty => builder,
        Body::Bytes(bs) => builder.body(bs.to_vec()),
        Body::Form(fields) => builder.form(&fields),
        Body::Multipart { fields, files } => {
            let mut form = Form::new();
            for (k, v) in fields {
                form = form.text(k, v);
            }
            for file in files {
                let mut part = Part::bytes(file.content.to_vec());
                if let Some(file_name) = file.file_name {
                    part = part.file_name(file_name);
                }
                if let Some(content_type) = &file.content_type {
                    part = part.mime_str(content_type).map_err(|e| {
                        Error::request_invalid(format!("invalid content type: {content_type}"))
                            .with_source(e)
                    })?;
                }
                form = form.part(file.name, part);
            }
            builder.multipart(form)
        }
    };

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::Router;
    use pretty_assertions::assert_eq;
    use std::net::{SocketAddr, TcpListener};
    use std::time::{Duration, Instant};
    use uploadcare_core::ErrorKind;

    fn serve() -> SocketAddr {
        let app = Router::new().route("/", get(|| async { "{}" })).route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "{}"
            }),
        );

        let std_listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        addr
    }

    fn request(url: &str, verify: bool) -> http::Request<Body> {
        let mut req = http::Request::get(url).body(Body::Empty).unwrap();
        req.extensions_mut().insert(TlsVerify(verify));
        req
    }

    #[test]
    fn test_tls_verify_false_uses_insecure_client() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let url = format!("http://{}/", serve());
        let send = ReqwestHttpSend::from_builder(Client::builder)?;

        let resp = send.http_send(request(&url, true))?;
        assert_eq!(resp.status(), http::StatusCode::OK);
        assert!(send.insecure_client.get().is_none());

        let resp = send.http_send(request(&url, false))?;
        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(&resp.body()[..], b"{}");
        assert!(send.insecure_client.get().is_some());

        Ok(())
    }

    #[test]
    fn test_insecure_client_keeps_builder_timeout() -> anyhow::Result<()> {
        let url = format!("http://{}/slow", serve());
        let send = ReqwestHttpSend::from_builder(|| {
            Client::builder().timeout(Duration::from_millis(300))
        })?;

        for verify in [true, false] {
            let start = Instant::now();
            let err = send.http_send(request(&url, verify)).unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Connection, "verify={verify}");
            assert!(
                start.elapsed() < Duration::from_secs(2),
                "verify={verify} took {:?}",
                start.elapsed()
            );
        }
        assert!(send.insecure_client.get().is_some());

        Ok(())
    }

    #[test]
    fn test_prebuilt_client_without_insecure_client() {
        let send = ReqwestHttpSend::new(Client::new());

        // Nothing listens on port 1, a connection error would mean we sent it.
        let err = send
            .http_send(request("http://127.0.0.1:1/", false))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(send.insecure_client.get().is_none());
    }

    #[test]
    fn test_with_insecure_client() -> anyhow::Result<()> {
        let url = format!("http://{}/", serve());
        let insecure = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        let send = ReqwestHttpSend::new(Client::new()).with_insecure_client(insecure);

        let resp = send.http_send(request(&url, false))?;
        assert_eq!(resp.status(), http::StatusCode::OK);

        Ok(())
    }
}
