//! The normalised connection configuration handed to the execution engine.
use std::collections::BTreeMap;

use serde::Serialize;

/// Authenticator tag for username and password authentication.
pub const AUTHENTICATOR_PASSWORD: &str = "Snowflake";

/// Authenticator tag for key-pair (JWT) authentication.
pub const AUTHENTICATOR_JWT: &str = "SNOWFLAKE_JWT";

/// Typed keys of the resolved connection configuration.
///
/// These match the parameter names agreed with the execution engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigKey {
    OrganizationName,
    AccountName,
    Warehouse,
    User,
    Password,
    PrivateKey,
    PrivateKeyPassphrase,
    Role,
    Authenticator,
}

impl ConfigKey {
    /// Parameter name for the key in the configuration handed to the engine.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigKey::OrganizationName => "organization_name",
            ConfigKey::AccountName => "account_name",
            ConfigKey::Warehouse => "warehouse",
            ConfigKey::User => "user",
            ConfigKey::Password => "password",
            ConfigKey::PrivateKey => "private_key",
            ConfigKey::PrivateKeyPassphrase => "private_key_passphrase",
            ConfigKey::Role => "role",
            ConfigKey::Authenticator => "authenticator",
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalised connection configuration handed to the execution engine.
///
/// Values are only ever inserted by a successful resolution: callers never
/// observe a partially populated configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl ResolvedConfiguration {
    /// Value of a configuration parameter, if set.
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(key.key()).map(String::as_str)
    }

    /// Iterate over the parameter names set in the configuration.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Consume the configuration into the flat map the engine expects.
    pub fn into_values(self) -> BTreeMap<String, String> {
        self.values
    }

    /// Set a configuration parameter.
    pub(crate) fn set<V>(&mut self, key: ConfigKey, value: V)
    where
        V: Into<String>,
    {
        self.values.insert(key.key().to_string(), value.into());
    }
}
