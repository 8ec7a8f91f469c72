//! # way-server
//!
//! Serves a [`way_router::Router`] over HTTP/1 with hyper and tokio.
//!
//! ```ignore
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! way_server::serve(listener, std::sync::Arc::new(way_server::build_router())).await?;
//! ```

mod adapter;
mod routes;

pub use adapter::{MAX_BODY_BYTES, handle_request, serve, to_hyper_response, to_router_request};
pub use routes::build_router;
