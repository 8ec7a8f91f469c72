//! # way-router
//!
//! A small HTTP request router with segment-based path matching.
//!
//! This crate provides:
//! - Path patterns with `:name` parameters
//! - Prefix (subtree) routes with a trailing `/` or a `...` suffix
//! - Method routing with an all-methods wildcard
//! - First-registered, first-matched priority
//! - A replaceable not-found fallback
//!
//! ## Quick Start
//!
//! ```
//! use way_router::{Request, Response, Router};
//!
//! async fn song(req: Request) -> Response {
//!     Response::text(format!("{} by {}", req.param("song"), req.param("band")))
//! }
//!
//! let router = Router::new()
//!     .get("/music/:band/:song", song)
//!     .get("/images/", |_| async { Response::text("an image") })
//!     .any("/health", |_| async { Response::text("ok") });
//!
//! let request = Request::get("/music/acdc/tnt");
//! let (route, params) = router.find(&request).unwrap();
//! assert_eq!(route.pattern().pattern(), "/music/:band/:song");
//! assert_eq!(params.param("band"), "acdc");
//!
//! // Dispatch: `router.dispatch(request).await` runs the handler.
//! ```
//!
//! ## Pattern Syntax
//!
//! - `/` separates segments; leading and trailing `/` are ignored when
//!   splitting, so `/users/` and `/users` have the same segments.
//! - A segment starting with `:` captures the request segment at that
//!   position under the name that follows.
//! - A pattern ending in `/` or `...` is a prefix route: it matches any
//!   path that has at least its segments. The extra segments are not
//!   bound.
//! - Literal segments compare case-sensitively.
//!
//! ## Routing Order
//!
//! Routes are tried in the order they were registered. A route whose
//! method does not match is skipped, and when nothing matches the
//! fallback (by default a 404) runs:
//!
//! ```
//! use way_router::{Method, Request, Response, Router};
//!
//! let router = Router::new()
//!     .get("/users/me", |_| async { Response::text("me") })
//!     .get("/users/:id", |req: Request| async move { Response::text(req.param("id").to_string()) })
//!     .not_found(|_| async { Response::text("gone").status(404) });
//!
//! let (route, _) = router.find(&Request::get("/users/me")).unwrap();
//! assert_eq!(route.pattern().pattern(), "/users/me");
//! assert!(router.find(&Request::new(Method::Post, "/users/me")).is_none());
//! ```
//!
//! ## Concurrency
//!
//! Registration consumes or mutably borrows the router, while dispatch
//! only needs `&self`. Finish registering, wrap the router in an `Arc`,
//! and dispatch from as many tasks as needed.

mod error;
mod method;
mod path;
mod request;
mod response;
mod router;

pub use error::{Result, RouterError};
pub use method::{Method, Verb};
pub use path::{PathPattern, PathSegment, split_segments};
pub use request::{PathParams, Request, decode_path, param};
pub use response::Response;
pub use router::{Handler, Route, RouteGroup, Router};
