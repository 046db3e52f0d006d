//! Network server frontends
//!
//! Servers accept TCP clients and translate protocol requests into calls on
//! the controller handle.

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tokio::net::{TcpListener, TcpStream};

use crate::{models::ServerConfig, screensaver::ScreensaverHandle};

mod common;
pub mod json;

/// Running server task
///
/// Dropping the handle stops accepting new connections.
pub struct ServerHandle {
    join: tokio::task::JoinHandle<()>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// Bind a protocol server on the configured port and start accepting clients
///
/// Each client runs in its own task with a clone of the controller handle.
pub async fn bind<F, Fut, E>(
    name: &'static str,
    config: impl ServerConfig,
    screensaver: ScreensaverHandle,
    handle_client: F,
) -> Result<ServerHandle, std::io::Error>
where
    F: Fn((TcpStream, SocketAddr), ScreensaverHandle) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let address = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.port());
    let listener = TcpListener::bind(address).await?;

    info!(address = %address, "{} server listening", name);

    let join = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok(connection) => {
                    let client = handle_client(connection, screensaver.clone());

                    tokio::spawn(async move {
                        if let Err(error) = client.await {
                            warn!(server = %name, error = %error, "client error");
                        }
                    });
                }
                Err(error) => {
                    error!(server = %name, error = %error, "accept error");
                    break;
                }
            }
        }
    });

    Ok(ServerHandle { join })
}
