//! # Client construction
//!
//! Turns client options into a [`ConnectionRequest`](crate::ConnectionRequest)
//! and hands it to a [`ConnectionEngine`].
//!
//! ## Modules
//!
//! - [`options`] - Raw option surface
//! - [`resolve`] - Option resolution and request assembly
//! - [`builder`] - Client builder
//! - [`engine`] - Engine boundary

use std::fmt;

pub use crate::request::error::{Error, Result};

/// Client builder configuration.
pub mod builder;
/// Engine boundary.
pub mod engine;
/// Raw client options.
pub mod options;
pub mod resolve;

mod url;

use self::engine::ConnectionEngine;
use self::options::{ClientMode, ClientOptions};

/// A connected client.
///
/// Owns the engine and the connection it opened. Everything past
/// connection setup is the engine's business.
///
/// # Example
///
/// ```no_run
/// use connreq::{AddressEntry, Client, ClientMode, ClientOptions, ConnectionEngine};
///
/// async fn run<E: ConnectionEngine>(engine: E) -> connreq::Result<()> {
///     let options = ClientOptions {
///         addresses: vec![AddressEntry::new("localhost", 6379)],
///         ..Default::default()
///     };
///     let client = Client::connect(engine, &options, ClientMode::Standalone).await?;
///     client.update_connection_password("new-secret", true).await?;
///     Ok(())
/// }
/// ```
pub struct Client<E: ConnectionEngine> {
    engine: E,
    connection: E::Connection,
    cluster_mode: bool,
}

impl<E: ConnectionEngine> Client<E> {
    /// Assembles a request from `options` and opens it with `engine`.
    ///
    /// Telemetry is initialized first when `advanced_config.otel` is set.
    ///
    /// # Errors
    ///
    /// Validation errors are returned before the engine is touched.
    /// Engine errors are propagated unchanged.
    pub async fn connect(engine: E, options: &ClientOptions, mode: ClientMode) -> Result<Self> {
        let request = resolve::assemble(options, mode)?;

        if let Some(otel) = options.otel() {
            engine.init_telemetry(otel)?;
        }

        let cluster_mode = request.cluster_mode_enabled;
        let connection = engine.open(request).await?;
        tracing::info!(cluster = cluster_mode, "client connected");

        Ok(Self {
            engine,
            connection,
            cluster_mode,
        })
    }

    /// Returns `true` if the connection was opened in cluster mode.
    #[inline]
    pub fn is_cluster(&self) -> bool {
        self.cluster_mode
    }

    /// The engine's connection handle.
    #[inline]
    pub fn connection(&self) -> &E::Connection {
        &self.connection
    }

    /// The engine this client was connected with.
    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Replaces the password used for reconnection.
    ///
    /// # Arguments
    ///
    /// * `password` - New password, must not be empty
    /// * `immediate_auth` - Re-authenticate the live connection now
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty password without contacting
    /// the engine.
    pub async fn update_connection_password(
        &self,
        password: &str,
        immediate_auth: bool,
    ) -> Result<()> {
        if password.is_empty() {
            return Err(Error::validation("password", "Password cannot be empty"));
        }
        self.engine
            .update_password(&self.connection, Some(password.to_string()), immediate_auth)
            .await
    }

    /// Removes the password used for reconnection.
    pub async fn clear_connection_password(&self, immediate_auth: bool) -> Result<()> {
        self.engine
            .update_password(&self.connection, None, immediate_auth)
            .await
    }
}

impl<E: ConnectionEngine> fmt::Debug for Client<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("cluster_mode", &self.cluster_mode)
            .finish_non_exhaustive()
    }
}
