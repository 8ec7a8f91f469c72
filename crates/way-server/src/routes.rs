//! Demo routes served by the `way-server` binary.

use serde_json::json;
use way_router::{Request, Response, Router};

async fn song(req: Request) -> Response {
    Response::json(&json!({
        "band": req.param("band"),
        "song": req.param("song"),
    }))
}

async fn image(req: Request) -> Response {
    let file = req
        .path
        .strip_prefix("/images")
        .unwrap_or_default()
        .trim_start_matches('/');
    Response::text(format!("image {file}"))
}

async fn echo(req: Request) -> Response {
    let content_type = req
        .get_header("Content-Type")
        .unwrap_or("application/octet-stream")
        .to_string();
    Response::ok().header("Content-Type", content_type).body(req.body)
}

async fn not_found(req: Request) -> Response {
    Response::json(&json!({
        "error": "not found",
        "method": req.method.as_str(),
        "path": req.path,
    }))
    .status(404)
}

/// Builds the demo router.
pub fn build_router() -> Router {
    Router::new()
        .get("/", |_| async { Response::redirect("/health") })
        .get("/music/:band/:song", song)
        .get("/images/", image)
        .post("/echo", echo)
        .any("/health", |_| async { Response::text("ok") })
        .not_found(not_found)
}
