//! # HTTP Server
//!
//! Wraps the pet router with transport timeouts and request tracing, and
//! serves it until a shutdown signal, draining in-flight requests for at
//! most the configured grace period.
//!
//! The accept loop tracks every connection task. Header reads are bounded
//! by the read timeout; connections left when the grace period ends are
//! closed.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tower::ServiceBuilder;
use tower_http::normalize_path::NormalizePath;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use crate::rest_api::{pet_router, ApiState};
use crate::store::PetStore;

use super::config::HttpServerConfig;

/// The pet router behind trailing-slash normalization (`/v2/pets/` routes
/// as `/v2/pets`)
pub type PetService = NormalizePath<Router>;

/// Pause after a failed accept (e.g. out of file descriptors)
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// HTTP server for the pet API
pub struct HttpServer {
    config: HttpServerConfig,
    service: PetService,
}

impl HttpServer {
    /// Create a server over the given store
    pub fn new<S: PetStore + 'static>(config: HttpServerConfig, store: S) -> Self {
        Self::with_shared_store(config, Arc::new(store))
    }

    /// Create a server over a store the caller keeps a handle to
    pub fn with_shared_store<S: PetStore + 'static>(
        config: HttpServerConfig,
        store: Arc<S>,
    ) -> Self {
        let router = Self::build_router(&config, ApiState::from_arc(store));
        Self {
            config,
            service: NormalizePath::trim_trailing_slash(router),
        }
    }

    fn build_router<S: PetStore + 'static>(config: &HttpServerConfig, state: ApiState<S>) -> Router {
        pet_router(state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyTimeoutLayer::new(config.read_timeout()))
                // Bounds the whole request, handler included
                .layer(TimeoutLayer::new(config.write_timeout())),
        )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> &str {
        self.config.socket_addr()
    }

    /// Get the request service (for testing)
    pub fn service(self) -> PetService {
        self.service
    }

    /// Bind the configured address
    pub async fn bind(&self) -> io::Result<TcpListener> {
        TcpListener::bind(self.config.socket_addr()).await
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let listener = self.bind().await?;
        self.serve_until(listener, ctrl_c()).await
    }

    /// Serve on `listener` until `shutdown` resolves.
    ///
    /// Once `shutdown` fires the listener is closed and idle connections
    /// are told to finish. Connections still open after the grace period
    /// are dropped.
    pub async fn serve_until<F>(self, listener: TcpListener, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let HttpServer { config, service } = self;
        let grace = config.shutdown_grace();

        let mut http = http1::Builder::new();
        http.timer(TokioTimer::new())
            .header_read_timeout(config.read_timeout());

        tracing::info!(addr = %listener.local_addr()?, "pet API listening");

        let (drain_tx, drain_rx) = watch::channel(false);
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tracing::trace!(%peer, "connection accepted");
                        connections.spawn(serve_connection(
                            http.clone(),
                            stream,
                            service.clone(),
                            drain_rx.clone(),
                        ));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        drop(listener);
        tracing::info!(
            open_connections = connections.len(),
            "shutdown requested, draining in-flight requests"
        );
        let _ = drain_tx.send(true);

        let drained = tokio::time::timeout(grace, async {
            while connections.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                open_connections = connections.len(),
                "grace period elapsed, closing remaining connections"
            );
            connections.shutdown().await;
        }

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Serve one connection, finishing gracefully once `drain` flips
async fn serve_connection(
    http: http1::Builder,
    stream: TcpStream,
    service: PetService,
    mut drain: watch::Receiver<bool>,
) {
    let conn = http.serve_connection(TokioIo::new(stream), TowerToHyperService::new(service));
    tokio::pin!(conn);

    let mut draining = false;
    loop {
        tokio::select! {
            result = conn.as_mut() => {
                if let Err(e) = result {
                    tracing::debug!(error = %e, "connection closed with error");
                }
                return;
            }
            _ = drain.changed(), if !draining => {
                draining = true;
                conn.as_mut().graceful_shutdown();
            }
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
