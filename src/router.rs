//! Route dispatch.
//!
//! The router maps a parsed request to a response. It sits outside the
//! connection core behind the [`Handler`] trait; the core hands it every
//! parse outcome, malformed ones included, and writes whatever comes
//! back.

use bytes::Bytes;
use tracing::debug;

use crate::http::parser::ParseOutcome;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

/// The boundary between the connection core and business logic.
pub trait Handler {
    fn handle(&self, outcome: ParseOutcome<'_>) -> Response;
}

/// A route handler receives a parsed request and returns a response.
pub type RouteFn = fn(&Request<'_>) -> Response;

/// Exact-match route table.
///
/// Malformed requests become 400, unmatched ones 404.
pub struct Router {
    routes: Vec<(Method, String, RouteFn)>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The stock table: `GET /` answers with a plaintext greeting.
    pub fn with_default_routes() -> Self {
        let mut router = Self::new();
        router.register(Method::GET, "/", |_req| {
            Response::ok(Bytes::from_static(b"Hello, World!"))
        });
        router
    }

    pub fn register(&mut self, method: Method, path: &str, route: RouteFn) {
        self.routes.push((method, path.to_string(), route));
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_default_routes()
    }
}

impl Handler for Router {
    fn handle(&self, outcome: ParseOutcome<'_>) -> Response {
        let request = match outcome {
            Ok(request) => request,
            Err(e) => {
                debug!("malformed request: {}", e);
                return Response::bad_request();
            }
        };

        for (method, path, route) in &self.routes {
            if *method == request.method && path == request.path() {
                return route(&request);
            }
        }

        debug!("no route for {} {}", request.method, request.path());
        Response::not_found()
    }
}
