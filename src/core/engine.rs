use futures::future::BoxFuture;

use crate::request::ConnectionRequest;
use crate::telemetry::OpenTelemetryConfig;
use crate::Result;

/// The execution engine that owns sockets, authentication and commands.
///
/// This crate only produces the [`ConnectionRequest`]; everything after
/// that happens behind this trait. Implementations report failures with
/// [`Error::Connection`], [`Error::Auth`] or [`Error::Io`].
///
/// [`Error::Connection`]: crate::Error::Connection
/// [`Error::Auth`]: crate::Error::Auth
/// [`Error::Io`]: crate::Error::Io
pub trait ConnectionEngine: Send + Sync {
    /// Live connection handle returned by [`ConnectionEngine::open`].
    type Connection: Send + Sync;

    /// Opens a connection described by `request`. The request is moved in;
    /// the caller keeps no copy.
    fn open(&self, request: ConnectionRequest) -> BoxFuture<'_, Result<Self::Connection>>;

    /// Replaces (`Some`) or clears (`None`) the password used on reconnect.
    /// With `immediate_auth` the engine re-authenticates right away.
    fn update_password<'a>(
        &'a self,
        connection: &'a Self::Connection,
        password: Option<String>,
        immediate_auth: bool,
    ) -> BoxFuture<'a, Result<()>>;

    /// Starts telemetry export. Called at most once per connect, before
    /// [`ConnectionEngine::open`].
    fn init_telemetry(&self, _config: &OpenTelemetryConfig) -> Result<()> {
        Ok(())
    }
}
