use std::future::Future;

use tokio::net::TcpListener;
use tracing::{info, warn};

use packcalc_config::Config;
use packcalc_utils::error::PackCalcError;

use crate::router;
use crate::state::AppState;

/// Bind the configured address and serve until Ctrl-C / SIGTERM.
pub async fn serve(config: &Config) -> Result<(), PackCalcError> {
    let addr = config.server.bind;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| PackCalcError::Server {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;

    serve_on(listener, AppState::from_config(config), shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), PackCalcError> {
    let local_addr = listener.local_addr()?;
    let catalog: Vec<u64> = state.catalog.iter().map(|size| size.get()).collect();

    info!(
        addr = %local_addr,
        pack_sizes = ?catalog,
        max_quantity = state.max_quantity,
        allowed_origin = state.allowed_origin.as_deref().unwrap_or("(none)"),
        "Server running on http://{local_addr}"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| PackCalcError::Server {
            addr: local_addr.to_string(),
            reason: e.to_string(),
        })?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use packcalc_allocator::PackSize;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_over_tcp_and_shuts_down() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState {
            catalog: [23, 31, 53].into_iter().filter_map(PackSize::new).collect(),
            max_quantity: 1_000,
            allowed_origin: None,
        };

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve_on(listener, state, async {
            let _ = stop_rx.await;
        }));

        let health = raw_get(addr, "/health").await;
        assert!(health.starts_with("HTTP/1.1 200"), "{health}");
        assert!(health.ends_with("ok"), "{health}");

        let packs = raw_get(addr, "/packs?quantity=263").await;
        assert!(packs.starts_with("HTTP/1.1 200"), "{packs}");
        assert!(packs.contains(r#""packs":"#), "{packs}");

        let too_big = raw_get(addr, "/packs?quantity=1001").await;
        assert!(too_big.starts_with("HTTP/1.1 400"), "{too_big}");
        assert!(too_big.contains("Provide quantity between 1 and 1 000"), "{too_big}");

        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn bind_failure_is_server_error() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupied.local_addr().unwrap();

        let config = Config::builder().bind(addr).build().unwrap();
        let err = serve(&config).await.unwrap_err();
        assert!(matches!(err, PackCalcError::Server { .. }));
    }
}
