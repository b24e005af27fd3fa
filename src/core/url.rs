use ::url::Url;
use percent_encoding::percent_decode_str;

use crate::core::options::AddressEntry;
use crate::request::DEFAULT_PORT;
use crate::{Error, Result};

const SCHEMES: &[(&str, bool)] = &[
    ("redis", false),
    ("rediss", true),
    ("valkey", false),
    ("valkeys", true),
];

/// The parts of a connection URL that map onto client options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectionUrl {
    pub(crate) address: AddressEntry,
    pub(crate) use_tls: bool,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) database_id: Option<i64>,
}

/// Parses `scheme://[user[:password]@]host[:port][/db]`.
pub(crate) fn parse_connection_url(input: &str) -> Result<ConnectionUrl> {
    let parsed = Url::parse(input)
        .map_err(|e| Error::validation("url", format!("invalid address format: {}", e)))?;

    let use_tls = SCHEMES
        .iter()
        .find(|(scheme, _)| *scheme == parsed.scheme())
        .map(|(_, secure)| *secure)
        .ok_or_else(|| {
            Error::validation(
                "url",
                "invalid scheme, expected redis://, rediss://, valkey:// or valkeys://",
            )
        })?;

    let host = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| Error::validation("url", "missing host in address"))?;
    // IPv6 literals come back bracketed.
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let port = parsed.port().unwrap_or(DEFAULT_PORT);

    let username = Some(parsed.username())
        .filter(|user| !user.is_empty())
        .map(|user| decode_userinfo(user, "username"))
        .transpose()?;
    let password = parsed
        .password()
        .map(|password| decode_userinfo(password, "password"))
        .transpose()?;

    let database_id = match parsed.path().trim_matches('/') {
        "" => None,
        db => Some(db.parse::<i64>().map_err(|_| {
            Error::validation("url", format!("invalid database in address: {}", db))
        })?),
    };

    Ok(ConnectionUrl {
        address: AddressEntry::new(host, port),
        use_tls,
        username,
        password,
        database_id,
    })
}

/// `Url` keeps userinfo percent-encoded; credentials need the raw text.
fn decode_userinfo(encoded: &str, field: &str) -> Result<String> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| Error::validation("url", format!("invalid {} encoding in address", field)))
}
