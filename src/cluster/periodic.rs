//! Periodic topology checks for cluster clients.

use crate::request::PeriodicChecks;

/// Option code selecting the engine's default check configuration.
pub const PERIODIC_CHECK_ENABLED_DEFAULT_CONFIGS: i64 = 0;

/// Option code disabling periodic checks.
pub const PERIODIC_CHECK_DISABLED: i64 = 1;

/// The `periodic_checks` option as supplied by the caller.
///
/// From JSON it reads either a numeric option code or one of
/// `"enabled_default"`, `"disabled"` and `{"manual_interval": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodicChecksOption {
    /// Run checks with the engine's default interval.
    EnabledDefault,
    /// Never run checks.
    Disabled,
    /// Run checks every `n` seconds.
    ManualInterval(u32),
}

impl PeriodicChecksOption {
    /// Maps the numeric option code.
    ///
    /// Any code other than [`PERIODIC_CHECK_DISABLED`] selects the default
    /// configuration.
    pub fn from_code(code: i64) -> Self {
        if code == PERIODIC_CHECK_DISABLED {
            PeriodicChecksOption::Disabled
        } else {
            PeriodicChecksOption::EnabledDefault
        }
    }
}

#[cfg(feature = "json")]
impl<'de> serde::Deserialize<'de> for PeriodicChecksOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        enum Named {
            EnabledDefault,
            Disabled,
            ManualInterval(u32),
        }

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(i64),
            Named(Named),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Code(code) => PeriodicChecksOption::from_code(code),
            Repr::Named(Named::EnabledDefault) => PeriodicChecksOption::EnabledDefault,
            Repr::Named(Named::Disabled) => PeriodicChecksOption::Disabled,
            Repr::Named(Named::ManualInterval(secs)) => PeriodicChecksOption::ManualInterval(secs),
        })
    }
}

/// Resolves the periodic check variant for a cluster client.
///
/// Absent input selects a manual interval left to the engine's default.
pub(crate) fn build_periodic_checks(option: Option<PeriodicChecksOption>) -> PeriodicChecks {
    match option {
        Some(PeriodicChecksOption::Disabled) => PeriodicChecks::Disabled,
        Some(PeriodicChecksOption::ManualInterval(secs)) => PeriodicChecks::ManualInterval {
            duration_in_sec: Some(secs),
        },
        Some(PeriodicChecksOption::EnabledDefault) | None => PeriodicChecks::ManualInterval {
            duration_in_sec: None,
        },
    }
}
