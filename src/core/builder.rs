use crate::cluster::PeriodicChecksOption;
use crate::core::engine::ConnectionEngine;
use crate::core::options::{
    AddressEntry, AdvancedConfig, ClientMode, ClientOptions, CompressionOptions, Credentials,
    ReconnectStrategy, StreamContext,
};
use crate::core::resolve;
use crate::core::url::parse_connection_url;
use crate::request::{ConnectionRequest, ReadFrom};
use crate::{Client, Result};

/// Builder for configuring and creating a [`Client`] connection.
///
/// Setters only record options; nothing is validated until
/// [`build_request`](Self::build_request) or [`connect`](Self::connect).
///
/// # Example
///
/// ```
/// use connreq::{ClientBuilder, TlsMode};
///
/// let request = ClientBuilder::new()
///     .address("localhost", 6379)
///     .use_tls(true)
///     .password("secret")
///     .database_id(2)
///     .build_request()
///     .unwrap();
/// assert_eq!(request.tls_mode, TlsMode::SecureTls);
/// assert_eq!(request.database_id, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    options: ClientOptions,
    mode: ClientMode,
}

impl ClientBuilder {
    /// Creates a new [`ClientBuilder`] instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-filled from a connection URL.
    ///
    /// Accepts `redis://`, `rediss://`, `valkey://` and `valkeys://` in the
    /// form `scheme://[user[:password]@]host[:port][/db]`. The secure schemes
    /// turn on TLS. Percent-encoded user names and passwords are decoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) for an
    /// unparsable URL, an unknown scheme, a missing host or userinfo that
    /// does not decode to UTF-8.
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = parse_connection_url(url)?;
        let mut builder = Self::new()
            .addresses([parsed.address])
            .use_tls(parsed.use_tls);
        if let Some(username) = parsed.username {
            builder = builder.username(username);
        }
        if let Some(password) = parsed.password {
            builder = builder.password(password);
        }
        if let Some(database_id) = parsed.database_id {
            builder = builder.database_id(database_id);
        }
        Ok(builder)
    }

    /// Adds a seed address.
    ///
    /// # Arguments
    ///
    /// * `host` - Host name or IP, optionally prefixed with `tls://` or `ssl://`
    /// * `port` - TCP port
    #[inline]
    pub fn address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.options.addresses.push(AddressEntry::new(host, port));
        self
    }

    /// Replaces all seed addresses.
    #[inline]
    pub fn addresses(mut self, addresses: impl IntoIterator<Item = AddressEntry>) -> Self {
        self.options.addresses = addresses.into_iter().collect();
        self
    }

    /// Requests TLS explicitly.
    #[inline]
    pub fn use_tls(mut self, enabled: bool) -> Self {
        self.options.use_tls = enabled;
        self
    }

    /// Sets the credentials block, replacing any username or password set
    /// earlier.
    #[inline]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.options.credentials = Some(credentials);
        self
    }

    /// Sets the username for ACL authentication.
    ///
    /// # Arguments
    ///
    /// * `username` - Username string
    #[inline]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.credentials_mut().username = Some(username.into());
        self
    }

    /// Sets the password for authentication.
    ///
    /// # Arguments
    ///
    /// * `password` - Password string
    #[inline]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.credentials_mut().password = Some(password.into());
        self
    }

    /// Sets the read routing strategy.
    #[inline]
    pub fn read_from(mut self, read_from: ReadFrom) -> Self {
        self.options.read_from = read_from;
        self
    }

    /// Sets the client availability zone.
    ///
    /// # Arguments
    ///
    /// * `az` - Zone name, used by the AZ-affinity read strategies
    #[inline]
    pub fn client_az(mut self, az: impl Into<String>) -> Self {
        self.options.client_az = Some(az.into());
        self
    }

    /// Sets the request timeout in milliseconds.
    #[inline]
    pub fn request_timeout(mut self, timeout_ms: u32) -> Self {
        self.options.request_timeout = Some(timeout_ms);
        self
    }

    /// Sets the reconnect backoff parameters.
    #[inline]
    pub fn reconnect_strategy(mut self, strategy: ReconnectStrategy) -> Self {
        self.options.reconnect_strategy = Some(strategy);
        self
    }

    /// Sets the client connection name.
    ///
    /// # Arguments
    ///
    /// * `name` - Client name displayed in `CLIENT LIST`
    #[inline]
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.options.client_name = Some(name.into());
        self
    }

    /// Sets the topology check policy. Ignored outside cluster mode.
    #[inline]
    pub fn periodic_checks(mut self, checks: PeriodicChecksOption) -> Self {
        self.options.periodic_checks = Some(checks);
        self
    }

    /// Sets the logical database to select after connecting.
    ///
    /// # Arguments
    ///
    /// * `database_id` - Database number, must be non-negative
    #[inline]
    pub fn database_id(mut self, database_id: i64) -> Self {
        self.options.database_id = Some(database_id);
        self
    }

    /// Sets the advanced configuration block.
    #[inline]
    pub fn advanced_config(mut self, config: AdvancedConfig) -> Self {
        self.options.advanced_config = Some(config);
        self
    }

    /// Defers connecting until the first command.
    #[inline]
    pub fn lazy_connect(mut self, lazy: bool) -> Self {
        self.options.lazy_connect = Some(lazy);
        self
    }

    /// Sets legacy stream-context TLS options.
    #[inline]
    pub fn stream_context(mut self, context: StreamContext) -> Self {
        self.options.stream_context = Some(context);
        self
    }

    /// Sets value compression options.
    #[inline]
    pub fn compression(mut self, compression: CompressionOptions) -> Self {
        self.options.compression = Some(compression);
        self
    }

    /// Caps the number of in-flight requests.
    #[inline]
    pub fn inflight_requests_limit(mut self, limit: u32) -> Self {
        self.options.inflight_requests_limit = Some(limit);
        self
    }

    /// Selects cluster (`true`) or standalone (`false`) mode.
    #[inline]
    pub fn cluster_mode(mut self, enabled: bool) -> Self {
        self.mode = if enabled {
            ClientMode::Cluster
        } else {
            ClientMode::Standalone
        };
        self
    }

    /// The options recorded so far.
    #[inline]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Assembles the connection request without connecting.
    ///
    /// # Errors
    ///
    /// See [`assemble`](crate::assemble).
    pub fn build_request(self) -> Result<ConnectionRequest> {
        resolve::assemble(&self.options, self.mode)
    }

    /// Builds the [`Client`] connection.
    ///
    /// # Errors
    ///
    /// Returns validation errors before the engine is called, then any
    /// error the engine reports.
    pub async fn connect<E: ConnectionEngine>(self, engine: E) -> Result<Client<E>> {
        Client::connect(engine, &self.options, self.mode).await
    }

    fn credentials_mut(&mut self) -> &mut Credentials {
        self.options
            .credentials
            .get_or_insert_with(Credentials::default)
    }
}
