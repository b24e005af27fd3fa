//! Test helpers.
//!
//! [`RecordingEngine`] stands in for a real engine: it records every call
//! and hands out numbered connection handles.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{self, BoxFuture, FutureExt};

use crate::core::engine::ConnectionEngine;
use crate::request::ConnectionRequest;
use crate::telemetry::OpenTelemetryConfig;
use crate::{Error, Result};

/// Handle returned by [`RecordingEngine::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedConnection {
    /// Zero-based index of the `open` call that produced this handle.
    pub id: usize,
}

/// A password update observed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordUpdate {
    /// The connection it was applied to.
    pub connection: RecordedConnection,
    /// New password, `None` when cleared.
    pub password: Option<String>,
    /// Whether re-authentication was requested immediately.
    pub immediate_auth: bool,
}

#[derive(Debug, Default)]
struct Recorded {
    requests: Vec<ConnectionRequest>,
    password_updates: Vec<PasswordUpdate>,
    telemetry: Vec<OpenTelemetryConfig>,
}

/// An in-memory engine that records what it is asked to do.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    recorded: Arc<Mutex<Recorded>>,
    open_error: Option<String>,
}

impl RecordingEngine {
    /// Creates an engine whose `open` succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose `open` fails with [`Error::Connection`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            open_error: Some(message.into()),
            ..Self::default()
        }
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        // A panicking test thread must not hide the record from others.
        self.recorded.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Requests passed to `open`, oldest first.
    pub fn requests(&self) -> Vec<ConnectionRequest> {
        self.lock().requests.clone()
    }

    /// Password updates, oldest first.
    pub fn password_updates(&self) -> Vec<PasswordUpdate> {
        self.lock().password_updates.clone()
    }

    /// Telemetry configs passed to `init_telemetry`.
    pub fn telemetry(&self) -> Vec<OpenTelemetryConfig> {
        self.lock().telemetry.clone()
    }
}

impl ConnectionEngine for RecordingEngine {
    type Connection = RecordedConnection;

    fn open(&self, request: ConnectionRequest) -> BoxFuture<'_, Result<Self::Connection>> {
        let mut recorded = self.lock();
        let id = recorded.requests.len();
        recorded.requests.push(request);
        let result = match &self.open_error {
            Some(message) => Err(Error::Connection {
                message: message.clone(),
            }),
            None => Ok(RecordedConnection { id }),
        };
        future::ready(result).boxed()
    }

    fn update_password<'a>(
        &'a self,
        connection: &'a Self::Connection,
        password: Option<String>,
        immediate_auth: bool,
    ) -> BoxFuture<'a, Result<()>> {
        self.lock().password_updates.push(PasswordUpdate {
            connection: *connection,
            password,
            immediate_auth,
        });
        future::ready(Ok(())).boxed()
    }

    fn init_telemetry(&self, config: &OpenTelemetryConfig) -> Result<()> {
        self.lock().telemetry.push(config.clone());
        Ok(())
    }
}
