//! HTTP transport for the JSON-RPC API.

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, CONTENT_LENGTH, CONTENT_TYPE,
};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use tokio::sync::oneshot;

use crate::error::RpcError;
use crate::handlers::handle_method;
use crate::host::LedgerHost;
use crate::{JsonRpcRequest, JsonRpcResponse, RpcServerConfig};

/// RPC Server
pub struct RpcServer {
    config: Arc<RpcServerConfig>,
    host: Arc<LedgerHost>,
    local_addr: Option<SocketAddr>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, host: Arc<LedgerHost>) -> Self {
        Self {
            config: Arc::new(config),
            host,
            local_addr: None,
            shutdown_tx: None,
        }
    }

    /// Bind and serve in the background. Returns the bound address.
    pub async fn start(&mut self) -> anyhow::Result<SocketAddr> {
        let config = self.config.clone();
        let host = self.host.clone();

        let make_svc = make_service_fn(move |_| {
            let config = config.clone();
            let host = host.clone();
            async move {
                Ok::<_, hyper::Error>(service_fn(move |req| {
                    handle_rpc_request(req, host.clone(), config.clone())
                }))
            }
        });

        let server = Server::try_bind(&self.config.http_addr)?.serve(make_svc);
        let addr = server.local_addr();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let server = server.with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });

        tokio::spawn(async move {
            if let Err(e) = server.await {
                tracing::error!("RPC server error: {}", e);
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.local_addr = Some(addr);
        tracing::info!("Ballot RPC server listening on {}", addr);

        Ok(addr)
    }

    /// Stop accepting connections.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("RPC server stopped");
        }
        self.local_addr = None;
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

async fn handle_rpc_request(
    req: Request<Body>,
    host: Arc<LedgerHost>,
    config: Arc<RpcServerConfig>,
) -> Result<Response<Body>, hyper::Error> {
    if req.method() == Method::OPTIONS && config.cors {
        let response = with_cors(Response::builder().status(StatusCode::OK), true)
            .header(ACCESS_CONTROL_MAX_AGE, "86400")
            .body(Body::empty())
            .unwrap_or_else(|_| Response::new(Body::empty()));
        return Ok(response);
    }

    if req.method() != Method::POST {
        return Ok(plain_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Only POST allowed",
            config.cors,
        ));
    }

    let limit = config.max_body_size as usize;
    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.map_or(false, |len| len > limit) {
        return Ok(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            &RpcError::LimitExceeded(format!("body exceeds {} bytes", limit)),
            config.cors,
        ));
    }

    let body_bytes = hyper::body::to_bytes(req.into_body()).await?;
    if body_bytes.len() > limit {
        return Ok(error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            &RpcError::LimitExceeded(format!("body exceeds {} bytes", limit)),
            config.cors,
        ));
    }

    let rpc_req: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                &RpcError::ParseError(e.to_string()),
                config.cors,
            ));
        }
    };

    let response = if rpc_req.jsonrpc != "2.0" {
        JsonRpcResponse::failure(
            rpc_req.id.clone(),
            &RpcError::InvalidRequest(format!("unsupported jsonrpc version {}", rpc_req.jsonrpc)),
        )
    } else {
        handle_method(&rpc_req, &host)
    };

    Ok(json_response(StatusCode::OK, &response, config.cors))
}

fn with_cors(builder: hyper::http::response::Builder, cors: bool) -> hyper::http::response::Builder {
    if !cors {
        return builder;
    }
    builder
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS")
        .header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization")
}

fn json_response(status: StatusCode, response: &JsonRpcResponse, cors: bool) -> Response<Body> {
    let body = serde_json::to_string(response).unwrap_or_default();
    with_cors(Response::builder().status(status), cors)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| {
            Response::new(Body::from(
                r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error"},"id":null}"#,
            ))
        })
}

fn error_response(status: StatusCode, err: &RpcError, cors: bool) -> Response<Body> {
    json_response(status, &JsonRpcResponse::failure(None, err), cors)
}

fn plain_response(status: StatusCode, text: &'static str, cors: bool) -> Response<Body> {
    with_cors(Response::builder().status(status), cors)
        .body(Body::from(text))
        .unwrap_or_else(|_| Response::new(Body::from(text)))
}
