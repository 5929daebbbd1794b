use std::time::SystemTime;

use bytes::Bytes;

/// HTTP status codes supported by the server.
///
/// A closed set, extended as routes need it:
/// - `Ok` (200): Request successful
/// - `Created` (201): Resource created successfully
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): Resource not found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use palisade::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use palisade::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Response body content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Plaintext,
    Json,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Plaintext => "text/plain; charset=us-ascii",
            ContentType::Json => "application/json",
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// The timestamp feeds the `Date` header. Constructors leave it at the
/// Unix epoch so serialization is deterministic; the connection stamps
/// it with the current time right before writing.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: ContentType,
    pub body: Bytes,
    pub timestamp: SystemTime,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use palisade::http::response::{ResponseBuilder, StatusCode, ContentType};
/// let response = ResponseBuilder::new(StatusCode::Created)
///     .content_type(ContentType::Json)
///     .body(r#"{"created":true}"#)
///     .build();
/// assert_eq!(response.content_length(), 16);
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: ContentType,
    body: Bytes,
    timestamp: SystemTime,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: ContentType::Plaintext,
            body: Bytes::new(),
            timestamp: SystemTime::UNIX_EPOCH,
        }
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            body: self.body,
            timestamp: self.timestamp,
        }
    }
}

impl Response {
    /// Creates a 200 OK plaintext response with the given body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body).build()
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest)
            .body(Bytes::from_static(b"Bad Request"))
            .build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .body(Bytes::from_static(b"Not Found"))
            .build()
    }

    /// Body length in bytes; this is what goes on the wire as
    /// `Content-Length`, so it always matches the body.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Stamps the response with the moment it is about to be written.
    pub fn set_timestamp(&mut self, timestamp: SystemTime) {
        self.timestamp = timestamp;
    }
}
