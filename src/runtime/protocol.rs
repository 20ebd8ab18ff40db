//! TCP protocol listener.
//!
//! # Responsibilities
//! - Bind the protocol's host/port
//! - Accept connections up to the `accepts` limit via semaphore
//! - Close the listener and every open connection on destroy

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::dubbo::ProtocolConfig;
use crate::lifecycle::Shutdown;
use crate::runtime::{LifecycleError, Protocol};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_ACCEPTS: usize = 1024;

/// A protocol instance backed by a bounded TCP listener.
pub struct TcpProtocol {
    name: String,
    local_addr: SocketAddr,
    connection_limit: Arc<Semaphore>,
    shutdown: Arc<Shutdown>,
    destroyed: AtomicBool,
}

impl TcpProtocol {
    /// Bind the listener and start accepting connections.
    pub async fn bind(config: &ProtocolConfig) -> Result<Self, LifecycleError> {
        let host = config.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = config.port.unwrap_or(0);
        let max_connections = config.accepts.unwrap_or(DEFAULT_ACCEPTS).max(1);

        let listener = TcpListener::bind((host, port)).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!(
            protocol = %config.name,
            address = %local_addr,
            max_connections,
            "Protocol listener bound"
        );

        let connection_limit = Arc::new(Semaphore::new(max_connections));
        let shutdown = Arc::new(Shutdown::new());

        let stop = shutdown.subscribe();
        tokio::spawn(accept_loop(
            config.name.clone(),
            listener,
            connection_limit.clone(),
            shutdown.clone(),
            stop,
        ));

        Ok(Self {
            name: config.name.clone(),
            local_addr,
            connection_limit,
            shutdown,
            destroyed: AtomicBool::new(false),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Currently free connection slots.
    pub fn available_permits(&self) -> usize {
        self.connection_limit.available_permits()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }
}

impl Protocol for TcpProtocol {
    fn name(&self) -> &str {
        &self.name
    }

    fn destroy(&self) -> Result<(), LifecycleError> {
        if self.destroyed.swap(true, Ordering::AcqRel) {
            return Err(LifecycleError::AlreadyDestroyed {
                component: "protocol",
                name: self.name.clone(),
            });
        }
        self.shutdown.trigger();
        tracing::info!(protocol = %self.name, address = %self.local_addr, "Protocol destroyed");
        Ok(())
    }
}

async fn accept_loop(
    name: String,
    listener: TcpListener,
    connection_limit: Arc<Semaphore>,
    shutdown: Arc<Shutdown>,
    mut stop: tokio::sync::broadcast::Receiver<()>,
) {
    loop {
        let permit = tokio::select! {
            _ = stop.recv() => break,
            permit = connection_limit.clone().acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        let accepted = tokio::select! {
            _ = stop.recv() => break,
            accepted = listener.accept() => accepted,
        };

        match accepted {
            Ok((stream, peer_addr)) => {
                // Subscribe first: `trigger` sets the flag before it sends.
                let stop = shutdown.subscribe();
                if shutdown.is_triggered() {
                    drop(stream);
                    break;
                }
                tracing::debug!(protocol = %name, peer_addr = %peer_addr, "Connection accepted");
                tokio::spawn(async move {
                    serve_connection(stream, stop).await;
                    drop(permit);
                });
            }
            Err(e) => {
                tracing::warn!(protocol = %name, error = %e, "Failed to accept connection");
            }
        }
    }

    tracing::debug!(protocol = %name, "Listener closed");
}

/// Hold the connection open until the peer hangs up or the protocol is destroyed.
async fn serve_connection(mut stream: TcpStream, mut stop: tokio::sync::broadcast::Receiver<()>) {
    let mut buf = [0u8; 1024];
    loop {
        tokio::select! {
            _ = stop.recv() => return,
            read = stream.read(&mut buf) => match read {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            },
        }
    }
}
