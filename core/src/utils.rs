//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// This design is to allow users to distinguish between different redacted strings but avoid
/// leaking sensitive information.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.chars().count();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            // Cut on char boundaries, keys may contain multi-byte chars.
            let head = self.0.char_indices().nth(3).map_or(0, |(i, _)| i);
            let tail = self
                .0
                .char_indices()
                .nth(length - 3)
                .map_or(self.0.len(), |(i, _)| i);
            f.write_str(&self.0[..head])?;
            f.write_str("***")?;
            f.write_str(&self.0[tail..])
        }
    }
}

/// Reject paths that start with `/`.
///
/// Request paths are resolved against a base URL, a leading slash would
/// silently drop any path prefix of that base.
pub fn ensure_relative_path(path: &str) -> crate::Result<()> {
    if path.starts_with('/') {
        return Err(crate::Error::request_invalid(format!(
            "path must not start with '/': {path}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("Short", "***"),
            ("demopublickey", "dem***key"),
            ("", "EMPTY"),
            ("HelloWorld", "***"),
            ("héllo-wörld-ké", "hél***-ké"),
            ("ab€€€€€€€€€€€€cd", "ab€***€cd"),
            ("€€€€€€€€€€€€", "€€€***€€€"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact(input)),
                expected,
                "Failed on input: {}",
                input
            );
        }
    }

    #[test]
    fn test_ensure_relative_path() {
        assert!(ensure_relative_path("files/").is_ok());
        assert!(ensure_relative_path("files/?limit=10").is_ok());
        assert!(ensure_relative_path("").is_ok());

        let err = ensure_relative_path("/files/").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
