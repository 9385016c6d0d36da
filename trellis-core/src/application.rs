// Application bridge: mounts assembled routers and serves them over HTTP/1

use crate::{Error, HttpRequest, HttpResponse, Router};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming as IncomingBody;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Host application that controller routers are mounted into.
///
/// # Example
///
/// ```ignore
/// let app = Application::new().mount(HelloController::routers());
/// app.listen(3000).await?;
/// ```
#[derive(Default)]
pub struct Application {
    router: Router,
}

impl Application {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Mount an assembled router, typically the result of a controller's
    /// `routers()` accessor
    pub fn mount(mut self, router: Router) -> Self {
        self.router.merge(router);
        self
    }

    /// Get the mounted router
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Start the HTTP server on the specified port
    pub async fn listen(self, port: u16) -> Result<(), Error> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%addr, routes = self.router.routes.len(), "server listening");

        let router = Arc::new(self.router);

        loop {
            let (stream, _) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let router = router.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<IncomingBody>| {
                    let router = router.clone();
                    async move { handle_request(req, router).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::error!(error = ?err, "error serving connection");
                }
            });
        }
    }
}

/// Handle an incoming HTTP request
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
) -> Result<Response<Full<bytes::Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut trellis_req = HttpRequest::new(method, path);

    for (name, value) in req.headers() {
        if let Ok(value_str) = value.to_str() {
            trellis_req
                .headers
                .insert(name.to_string(), value_str.to_string());
        }
    }

    let body_bytes = req.collect().await?.to_bytes();
    trellis_req.body = body_bytes.to_vec();

    // Route the request. Handler failures were already translated inside the
    // bridged handlers; errors surfacing here are framework-level (no route).
    let response = match router.route(trellis_req).await {
        Ok(resp) => resp,
        Err(err) => {
            let status = err.status_code();
            let body = serde_json::json!({
                "error": err.to_string(),
                "status": status,
            });
            HttpResponse::new(status)
                .with_json(&body)
                .unwrap_or_else(|_| HttpResponse::internal_server_error())
        }
    };

    let mut builder = Response::builder().status(response.status);

    for (key, value) in response.headers {
        builder = builder.header(key, value);
    }

    let body = Full::new(bytes::Bytes::from(response.body));
    Ok(builder
        .body(body)
        .unwrap_or_else(|_| Response::new(Full::new(bytes::Bytes::new()))))
}
