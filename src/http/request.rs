use std::fmt;
use std::str;

/// Request targets shorter than this are stored inline; longer ones get
/// their own allocation sized to the target. Tuning constant, not a
/// correctness constraint.
pub const INLINE_TARGET_LEN: usize = 64;

/// HTTP request methods.
///
/// The closed set of methods the parser accepts. Matching is
/// case-sensitive, as in the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// TRACE - Echo the received request
    TRACE,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method from a request-line token.
    ///
    /// # Example
    ///
    /// ```
    /// # use palisade::http::request::Method;
    /// assert_eq!(Method::from_token(b"GET"), Some(Method::GET));
    /// assert_eq!(Method::from_token(b"get"), None);
    /// ```
    pub fn from_token(token: &[u8]) -> Option<Self> {
        match token {
            b"GET" => Some(Method::GET),
            b"POST" => Some(Method::POST),
            b"PUT" => Some(Method::PUT),
            b"DELETE" => Some(Method::DELETE),
            b"HEAD" => Some(Method::HEAD),
            b"OPTIONS" => Some(Method::OPTIONS),
            b"TRACE" => Some(Method::TRACE),
            b"PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    /// Whether requests with this method are expected to carry a body.
    ///
    /// Drives the framing rule: body-carrying methods need a headers
    /// terminator scan plus Content-Length accounting, the rest complete
    /// on the trailing header terminator alone.
    pub fn expects_body(self) -> bool {
        matches!(self, Method::POST | Method::PUT | Method::PATCH)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::PATCH => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request target storage.
///
/// Short targets (the common case) live inline in the request; anything
/// at or over [`INLINE_TARGET_LEN`] gets a dedicated allocation sized to
/// the target. Never truncated either way.
#[derive(Debug, Clone)]
pub enum Target {
    Inline { bytes: [u8; INLINE_TARGET_LEN], len: u8 },
    Heap(Box<str>),
}

impl Target {
    pub fn new(path: &str) -> Self {
        if path.len() < INLINE_TARGET_LEN {
            let mut bytes = [0u8; INLINE_TARGET_LEN];
            bytes[..path.len()].copy_from_slice(path.as_bytes());
            Target::Inline {
                bytes,
                len: path.len() as u8,
            }
        } else {
            Target::Heap(path.into())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            // Inline bytes are copied verbatim from a validated &str in
            // `new`, so they are always valid UTF-8.
            Target::Inline { bytes, len } => unsafe {
                str::from_utf8_unchecked(&bytes[..*len as usize])
            },
            Target::Heap(path) => path,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Target::Inline { .. })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed HTTP request.
///
/// The body borrows from the connection's receive buffer rather than
/// copying; a `Request` is consumed within the dispatch that parsed it.
#[derive(Debug)]
pub struct Request<'a> {
    pub method: Method,
    pub target: Target,
    /// Declared Content-Length, 0 when absent or unparseable.
    pub content_length: usize,
    /// Body bytes, empty when no Content-Length was declared.
    pub body: &'a [u8],
}

impl Request<'_> {
    /// The request target as a string slice. Always begins with `/`.
    pub fn path(&self) -> &str {
        self.target.as_str()
    }
}
