//! Signed JSON requests against the REST API.

use crate::constants::*;
use crate::utils::ensure_relative_path;
use crate::{Body, Config, Error, RequestSigner, Result, TlsVerify};
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, DATE, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use log::{debug, warn};
use serde_json::Value;
use url::Url;

const SUPPORTED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Verbs accepted by both APIs.
pub(crate) fn ensure_method(method: &Method) -> Result<()> {
    if !SUPPORTED_METHODS.contains(method) {
        return Err(Error::request_invalid(format!(
            "unsupported method: {method}"
        )));
    }

    Ok(())
}

/// Build a signed REST request.
///
/// `path` is resolved against [`Config::api_base`] and must not start with
/// `/`.
pub fn build_request(
    config: &Config,
    signer: &RequestSigner,
    method: Method,
    path: &str,
    data: Option<&Value>,
) -> Result<http::Request<Body>> {
    ensure_relative_path(path)?;
    ensure_method(&method)?;

    let url = Url::parse(&config.api_base)?.join(path)?;
    let signed_path = match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
        _ => url.path().to_string(),
    };

    let content = match data {
        Some(v) => serde_json::to_string(v).map_err(|e| {
            Error::request_invalid(format!("failed to serialize payload: {e}")).with_source(e)
        })?,
        None => String::new(),
    };

    let signed = signer.sign(&config.credential(), &method, &signed_path, &content);

    let mut authorization: HeaderValue = signed.authorization.parse()?;
    authorization.set_sensitive(true);

    let mut req = http::Request::builder()
        .method(method)
        .uri(url.as_str())
        .header(AUTHORIZATION, authorization)
        .header(DATE, signed.date)
        .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
        .header(CONTENT_LENGTH, content.len())
        .header(ACCEPT, config.accept())
        .header(USER_AGENT, CLIENT_USER_AGENT)
        .body(Body::from(content))?;
    req.extensions_mut().insert(TlsVerify(config.verify_api_ssl));

    Ok(req)
}

/// Interpret a REST response.
///
/// - `200`: the body parsed as JSON.
/// - `204`: `None`.
/// - `403`: [`ErrorKind::Authentication`](crate::ErrorKind::Authentication).
/// - `400` and `404`: [`ErrorKind::InvalidRequest`](crate::ErrorKind::InvalidRequest).
/// - anything else: [`ErrorKind::Api`](crate::ErrorKind::Api).
pub fn parse_response(resp: http::Response<Bytes>) -> Result<Option<Value>> {
    let (parts, body) = resp.into_parts();
    debug!(
        "got: {} {}",
        parts.status.as_u16(),
        String::from_utf8_lossy(&body)
    );

    log_api_warnings(&parts.headers);

    match parts.status {
        StatusCode::OK => serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| Error::api(e.to_string()).with_source(e)),
        StatusCode::NO_CONTENT => Ok(None),
        StatusCode::FORBIDDEN => Err(Error::authentication("").with_response(parts.status, body)),
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
            Err(Error::invalid_request("").with_response(parts.status, body))
        }
        status => Err(Error::api("").with_response(status, body)),
    }
}

/// Surface the warnings the API sends back in the `warning` header.
///
/// Every `warning` header is read. Each `; ` separated segment inside the
/// double quotes is logged on its own.
pub fn log_api_warnings(headers: &HeaderMap) {
    for value in headers.get_all(WARNING) {
        for warning in parse_warnings(&String::from_utf8_lossy(value.as_bytes())) {
            warn!("API Warning: {}", warning);
        }
    }
}

/// Split the quoted part of a `warning` header value into segments.
///
/// The quoted part spans from the first to the last double quote and must
/// not be empty.
pub fn parse_warnings(value: &str) -> Vec<&str> {
    let (Some(start), Some(end)) = (value.find('"'), value.rfind('"')) else {
        return Vec::new();
    };
    if end <= start + 1 {
        return Vec::new();
    }

    value[start + 1..end].split("; ").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn config() -> Config {
        Config::default()
            .with_public_key("demopublickey")
            .with_secret_key("demoprivatekey")
    }

    fn response(status: u16, body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn test_build_request() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let req = build_request(
            &config(),
            &RequestSigner::new(),
            Method::GET,
            "files/?limit=10",
            None,
        )?;

        assert_eq!(req.method(), Method::GET);
        assert_eq!(
            req.uri().to_string(),
            "https://api.uploadcare.com/files/?limit=10"
        );
        assert_eq!(req.body(), &Body::Empty);

        let h = req.headers();
        assert_eq!(h[CONTENT_TYPE], "application/json");
        assert_eq!(h[CONTENT_LENGTH], "0");
        assert_eq!(h[ACCEPT], "application/vnd.uploadcare-v0.5+json");
        assert_eq!(
            h[USER_AGENT].to_str()?,
            format!("uploadcare-rs/{}", env!("CARGO_PKG_VERSION"))
        );
        assert!(h[AUTHORIZATION].is_sensitive());

        // The signature covers the path and query, not scheme and host.
        let date = h[DATE].to_str()?;
        let expected = crate::hash::hex_hmac_sha1(
            b"demoprivatekey",
            format!(
                "GET\nd41d8cd98f00b204e9800998ecf8427e\napplication/json\n{date}\n/files/?limit=10"
            )
            .as_bytes(),
        );
        assert_eq!(
            h[AUTHORIZATION].to_str()?,
            format!("Uploadcare demopublickey:{expected}")
        );

        assert_eq!(req.extensions().get::<TlsVerify>(), Some(&TlsVerify(true)));

        Ok(())
    }

    #[test]
    fn test_build_request_with_payload() -> anyhow::Result<()> {
        let mut cfg = config();
        cfg.verify_api_ssl = false;
        let payload = serde_json::json!({"files": ["9b9f4483-77b8-40ae-a198-272ba6280004"]});

        let req = build_request(
            &cfg,
            &RequestSigner::new(),
            Method::POST,
            "groups/",
            Some(&payload),
        )?;

        let content = serde_json::to_string(&payload)?;
        assert_eq!(req.body(), &Body::Bytes(Bytes::from(content.clone())));
        assert_eq!(
            req.headers()[CONTENT_LENGTH].to_str()?,
            content.len().to_string()
        );
        assert_eq!(req.extensions().get::<TlsVerify>(), Some(&TlsVerify(false)));

        Ok(())
    }

    #[test]
    fn test_build_request_keeps_base_path() -> anyhow::Result<()> {
        let mut cfg = config();
        cfg.api_base = "http://127.0.0.1:8080/proxy/".to_string();

        let req = build_request(&cfg, &RequestSigner::new(), Method::GET, "files/", None)?;
        assert_eq!(req.uri().to_string(), "http://127.0.0.1:8080/proxy/files/");

        Ok(())
    }

    #[test]
    fn test_build_request_rejects_leading_slash() {
        let err = build_request(
            &config(),
            &RequestSigner::new(),
            Method::GET,
            "/files/",
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_build_request_rejects_unsupported_method() {
        let err = build_request(
            &config(),
            &RequestSigner::new(),
            Method::PATCH,
            "files/",
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_parse_response_ok() -> anyhow::Result<()> {
        let v = parse_response(response(200, r#"{"uuid": "abc"}"#))?;
        assert_eq!(v, Some(serde_json::json!({"uuid": "abc"})));
        Ok(())
    }

    #[test]
    fn test_parse_response_malformed_json() {
        let err = parse_response(response(200, "{not json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert!(err.status().is_none());
        assert!(err.message().contains("key must be a string"));
    }

    #[test]
    fn test_parse_response_no_content() -> anyhow::Result<()> {
        assert_eq!(parse_response(response(204, ""))?, None);
        Ok(())
    }

    #[test_case(403, ErrorKind::Authentication; "forbidden")]
    #[test_case(400, ErrorKind::InvalidRequest; "bad request")]
    #[test_case(404, ErrorKind::InvalidRequest; "not found")]
    #[test_case(401, ErrorKind::Api; "unauthorized")]
    #[test_case(500, ErrorKind::Api; "internal error")]
    #[test_case(201, ErrorKind::Api; "created")]
    fn test_parse_response_error(status: u16, kind: ErrorKind) {
        let body = r#"{"detail": "Not found."}"#;
        let err = parse_response(response(status, body)).unwrap_err();

        assert_eq!(err.kind(), kind);
        assert_eq!(err.status().map(|s| s.as_u16()), Some(status));
        assert_eq!(err.body(), Some(body.as_bytes()));
        assert_eq!(err.message(), body);
    }

    #[test]
    fn test_parse_warnings() {
        let cases = vec![
            (r#"299 - "w1; w2""#, vec!["w1", "w2"]),
            (
                r#"299 api.uploadcare.com "Version 0.5 is deprecated""#,
                vec!["Version 0.5 is deprecated"],
            ),
            ("299 - no quotes", vec![]),
            (r#"299 - """#, vec![]),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_warnings(input), expected, "Failed on input: {input}");
        }
    }
}
