//! Runtime configuration read from the environment.

/// Environment variable enabling debug logging.
pub const VERBOSE_VAR: &str = "HYPERSCHEDULE_VERBOSE";

/// Environment variable enabling indented JSON output.
pub const PRETTY_VAR: &str = "HYPERSCHEDULE_PRETTY";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has unrecognized boolean value {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

/// Configuration for the `hyperschedule` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log at debug level as well as info.
    pub verbose: bool,

    /// Indent JSON output.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: true,
            pretty: true,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration using `lookup` to fetch variables.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |var: &'static str, default: bool| match lookup(var) {
            Some(value) if !value.trim().is_empty() => parse_bool(&value)
                .ok_or(ConfigError::InvalidBool { var, value }),
            _ => Ok(default),
        };
        Ok(Self {
            verbose: flag(VERBOSE_VAR, defaults.verbose)?,
            pretty: flag(PRETTY_VAR, defaults.pretty)?,
        })
    }
}

/// Parse a human-written boolean.
///
/// Accepts `1`/`0`, `on`/`off`, and any prefix of `yes`, `true`, `enabled`
/// or `no`, `false`, `disabled`, ignoring case.
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim().to_lowercase();
    if value.is_empty() {
        return None;
    }
    let prefix_of = |words: &[&str]| words.iter().any(|word| word.starts_with(&value));
    if value == "1" || value == "on" || prefix_of(&["yes", "true", "enabled"]) {
        Some(true)
    } else if value == "0" || value == "off" || prefix_of(&["no", "false", "disabled"]) {
        Some(false)
    } else {
        None
    }
}
