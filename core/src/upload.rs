//! Form and multipart requests against the upload API.

use crate::constants::{LEGACY_PUB_KEY_FIELD, PUB_KEY_FIELD};
use crate::rest::ensure_method;
use crate::utils::ensure_relative_path;
use crate::{Body, Config, Error, FilePart, Result, TlsVerify};
use bytes::Bytes;
use http::{Method, StatusCode};
use log::debug;
use serde_json::Value;
use url::Url;

/// Build an upload request.
///
/// The upload API is not signed: the public key is sent as form field
/// under both `pub_key` and `UPLOADCARE_PUB_KEY`. The caller's `data` is
/// copied, never modified.
///
/// Without `files` the body is urlencoded, with them it's multipart.
pub fn build_request(
    config: &Config,
    method: Method,
    path: &str,
    data: Option<&[(String, String)]>,
    files: Option<&[FilePart]>,
) -> Result<http::Request<Body>> {
    ensure_relative_path(path)?;
    ensure_method(&method)?;

    let url = Url::parse(&config.upload_base)?.join(path)?;

    let mut fields = data.map(|v| v.to_vec()).unwrap_or_default();
    let public_key = config.public_key.clone().unwrap_or_default();
    set_field(&mut fields, PUB_KEY_FIELD, &public_key);
    set_field(&mut fields, LEGACY_PUB_KEY_FIELD, &public_key);

    let body = match files {
        Some(files) if !files.is_empty() => Body::Multipart {
            fields,
            files: files.to_vec(),
        },
        _ => Body::Form(fields),
    };

    let mut req = http::Request::builder()
        .method(method)
        .uri(url.as_str())
        .body(body)?;
    req.extensions_mut()
        .insert(TlsVerify(config.verify_upload_ssl));

    Ok(req)
}

/// Insert or replace a form field, keeping its position if it already exists.
fn set_field(fields: &mut Vec<(String, String)>, key: &str, value: &str) {
    match fields.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value.to_string(),
        None => fields.push((key.to_string(), value.to_string())),
    }
}

/// Interpret an upload response.
///
/// Unlike the REST API there is no special handling for `204` and `403`,
/// both end up as [`ErrorKind::Api`](crate::ErrorKind::Api).
pub fn parse_response(resp: http::Response<Bytes>) -> Result<Value> {
    let (parts, body) = resp.into_parts();
    debug!(
        "got: {} {}",
        parts.status.as_u16(),
        String::from_utf8_lossy(&body)
    );

    match parts.status {
        StatusCode::OK => {
            serde_json::from_slice(&body).map_err(|e| Error::api(e.to_string()).with_source(e))
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
            Err(Error::invalid_request("").with_response(parts.status, body))
        }
        status => Err(Error::api("").with_response(status, body)),
    }
}
