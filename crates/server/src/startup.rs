use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use service::PokemonStore;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// A running mock server that can be torn down from tests or embedding code.
/// Dropping the handle without calling [`MockServer::stop`] leaves the task
/// running until the process exits, mirroring how the mock was used before.
pub struct MockServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MockServer {
    /// Actual bound address; useful when started on port 0.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop listening. In-flight requests finish first; the store is discarded.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}

/// Start a mock server on `127.0.0.1:port` (0 picks a free port) with a fresh
/// empty store per instance.
pub async fn start(port: u16) -> anyhow::Result<MockServer> {
    let store = PokemonStore::new();
    let app = routes::build_router(store, build_cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, port)).await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = rx.await;
        });
        if let Err(e) = serve.await {
            tracing::error!(error = %e, "mock server error");
        }
    });

    info!(%addr, "pokemon mock api listening");
    Ok(MockServer { addr, shutdown: Some(tx), task })
}

/// Public entry for the binary: build the app and serve until the process exits.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let store = PokemonStore::new();
    let app: Router = routes::build_router(store, build_cors());

    let addr = load_bind_addr()?;
    info!(%addr, "starting pokemon mock api");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
