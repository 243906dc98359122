use crate::Result;
use bytes::Bytes;
use std::fmt::Debug;

/// HttpSend is used to send the requests built by this crate.
///
/// Implementations block the calling thread until a response is received
/// or the transport fails. Transport failures (DNS, TLS, refused
/// connection, timeout) must be reported as [`ErrorKind::Connection`].
/// Non-success HTTP statuses are NOT errors at this layer, they are returned
/// as responses and interpreted by the caller.
///
/// Implementations should follow redirects and honour the [`TlsVerify`]
/// extension carried by the request.
///
/// [`ErrorKind::Connection`]: crate::ErrorKind::Connection
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    fn http_send(&self, req: http::Request<Body>) -> Result<http::Response<Bytes>>;
}

/// Request body understood by [`HttpSend`] implementations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No body at all.
    #[default]
    Empty,
    /// Raw bytes, sent as-is. Headers are set by the caller.
    Bytes(Bytes),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` with plain fields and file parts.
    Multipart {
        /// Plain text fields.
        fields: Vec<(String, String)>,
        /// File parts.
        files: Vec<FilePart>,
    },
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Body::Empty
        } else {
            Body::Bytes(Bytes::from(value))
        }
    }
}

/// A file attached to a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name, `file` for most upload endpoints.
    pub name: String,
    /// File name reported to the server.
    pub file_name: Option<String>,
    /// Mime type of the content, if known.
    pub content_type: Option<String>,
    /// File content.
    pub content: Bytes,
}

impl FilePart {
    /// Create a new file part under the given field name.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            content: content.into(),
        }
    }

    /// Set the file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the mime type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

// Skip the content, it could be huge.
impl Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content.len())
            .finish()
    }
}

/// Request extension that tells the transport whether to verify the TLS
/// certificate of the server.
///
/// Missing extension means verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsVerify(pub bool);

impl Default for TlsVerify {
    fn default() -> Self {
        TlsVerify(true)
    }
}
