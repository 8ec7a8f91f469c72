//! Glue between hyper and [`way_router`].

use std::convert::Infallible;
use std::error::Error as StdError;
use std::sync::Arc;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request as HyperRequest, Response as HyperResponse, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, warn};

use way_router::{Method, Request, Response, Router};

/// Largest request body, in bytes, read before answering 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Converts a hyper request into a router request.
///
/// The path is percent-decoded before routing, `+` included verbatim.
/// An invalid method is answered with 400 and a body over
/// [`MAX_BODY_BYTES`] with 413. Any other body read failure is treated
/// as an empty body.
///
/// # Errors
///
/// Returns the response to send instead of dispatching.
pub async fn to_router_request<B>(req: HyperRequest<B>) -> Result<Request, Response>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let (parts, body) = req.into_parts();

    let method = Method::parse(parts.method.as_str())
        .map_err(|_| Response::text("Bad Request").status(400))?;
    let target = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
    let mut request = Request::with_target(method, target);

    for (key, value) in &parts.headers {
        if let Ok(v) = value.to_str() {
            request.headers.insert(key.to_string(), v.to_string());
        }
    }

    request.body = match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes().to_vec(),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(path = %request.path, limit = MAX_BODY_BYTES, "request body too large");
            return Err(Response::text("Payload Too Large").status(413));
        }
        Err(err) => {
            warn!(%err, "failed to read request body");
            Vec::new()
        }
    };

    Ok(request)
}

/// Converts a router response into a hyper response.
///
/// Headers that are not valid HTTP header names or values are dropped.
pub fn to_hyper_response(res: Response) -> HyperResponse<Full<Bytes>> {
    let status = StatusCode::from_u16(res.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = HyperResponse::new(Full::new(Bytes::from(res.body)));
    *response.status_mut() = status;

    for (key, value) in res.headers {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => warn!(header = %key, "dropping invalid response header"),
        }
    }

    response
}

/// Routes one hyper request through `router`.
pub async fn handle_request<B>(
    req: HyperRequest<B>,
    router: Arc<Router>,
) -> Result<HyperResponse<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let request = match to_router_request(req).await {
        Ok(request) => request,
        Err(rejection) => return Ok(to_hyper_response(rejection)),
    };

    let method = request.method.clone();
    let path = request.path.clone();
    let response = router.dispatch(request).await;
    debug!(%method, %path, status = response.status, "dispatched");

    Ok(to_hyper_response(response))
}

/// Accepts connections forever, serving each on its own task.
///
/// # Errors
///
/// Returns the listener's error if accepting a connection fails.
pub async fn serve(listener: TcpListener, router: Arc<Router>) -> std::io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);

        tokio::task::spawn(async move {
            let service = service_fn(move |req| handle_request(req, Arc::clone(&router)));

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                warn!(%peer, %err, "error serving connection");
            }
        });
    }
}
