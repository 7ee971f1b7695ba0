//! Declarative connection spec consumed by the resolver.
//!
//! The spec is owned and supplied by the external configuration management
//! layer; this core only reads it.
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use snowlink_secrets::SecretReference;

use crate::errors::MissingIdentity;

/// Authentication schemes supported for Snowflake connections.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthMethod {
    /// Username and password authentication.
    Password,

    /// Key-pair (JWT) authentication with an unencrypted private key.
    KeyPair,

    /// Key-pair (JWT) authentication with a passphrase protected private key.
    KeyPairPassphrase,
}

impl AuthMethod {
    /// Match a declared method tag, `None` for unrecognised tags.
    pub fn from_tag(tag: &str) -> Option<AuthMethod> {
        match tag {
            "password" => Some(AuthMethod::Password),
            "keyPair" => Some(AuthMethod::KeyPair),
            "keyPairPassphrase" => Some(AuthMethod::KeyPairPassphrase),
            _ => None,
        }
    }

    /// Tag declaring the method in connection specs.
    pub fn tag(&self) -> &'static str {
        match self {
            AuthMethod::Password => "password",
            AuthMethod::KeyPair => "keyPair",
            AuthMethod::KeyPairPassphrase => "keyPairPassphrase",
        }
    }
}

/// Identity of the Snowflake account a connection targets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    /// Snowflake organization name.
    pub organization: String,

    /// Snowflake account name as declared, normalisation is applied on read.
    pub account: String,
}

impl ProviderIdentity {
    /// Normalised account name: uppercased, with `.` replaced by `-`.
    ///
    /// Normalisation is idempotent, already normalised names pass through unchanged.
    pub fn account_name(&self) -> String {
        self.account.replace('.', "-").to_uppercase()
    }

    /// Ensure both identity fields are set.
    ///
    /// Absence of either field is a fatal configuration error surfaced before
    /// any secret access, not retried.
    pub fn check(&self) -> Result<()> {
        if self.organization.is_empty() {
            anyhow::bail!(MissingIdentity::new("organization"));
        }
        if self.account.is_empty() {
            anyhow::bail!(MissingIdentity::new("account"));
        }
        Ok(())
    }
}

/// Declarative description of how to connect to a Snowflake account.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSpec {
    /// Identity of the target account.
    #[serde(flatten)]
    pub identity: ProviderIdentity,

    /// Declared authentication method tag.
    ///
    /// Kept as the declared string until dispatch so unsupported tags are
    /// reported verbatim.
    pub auth_method: String,

    /// Reference to the secret entry holding the credential bundle.
    #[serde(default)]
    pub credentials: Option<SecretReference>,

    /// Reference to the secret entry holding the SHA-256 fingerprint of the
    /// public key registered with Snowflake.
    ///
    /// Only used by the direct REST API path.
    #[serde(default)]
    pub key_fingerprint: Option<SecretReference>,
}

#[cfg(test)]
mod tests {
    use super::AuthMethod;
    use super::ProviderIdentity;
    use crate::errors::MissingIdentity;

    fn identity(organization: &str, account: &str) -> ProviderIdentity {
        ProviderIdentity {
            organization: organization.to_string(),
            account: account.to_string(),
        }
    }

    #[test]
    fn account_name_normalised() {
        let identity = identity("ACME", "my.org.account");
        assert_eq!(identity.account_name(), "MY-ORG-ACCOUNT");
    }

    #[test]
    fn account_name_normalisation_idempotent() {
        let identity = identity("ACME", "MY-ORG-ACCOUNT");
        assert_eq!(identity.account_name(), "MY-ORG-ACCOUNT");
    }

    #[test]
    fn check_missing_organization() {
        let error = identity("", "account").check().unwrap_err();
        let error = error.downcast::<MissingIdentity>().unwrap();
        assert_eq!(error.field, "organization");
    }

    #[test]
    fn check_missing_account() {
        let error = identity("ACME", "").check().unwrap_err();
        let error = error.downcast::<MissingIdentity>().unwrap();
        assert_eq!(error.field, "account");
    }

    #[test]
    fn method_tags_round_trip() {
        for method in [
            AuthMethod::Password,
            AuthMethod::KeyPair,
            AuthMethod::KeyPairPassphrase,
        ] {
            assert_eq!(AuthMethod::from_tag(method.tag()), Some(method));
        }
        assert_eq!(AuthMethod::from_tag("unknown"), None);
    }

    #[test]
    fn spec_decodes_from_json() {
        let spec: super::ConnectionSpec = serde_json::from_value(serde_json::json!({
            "organization": "ACME",
            "account": "my.account",
            "authMethod": "password",
            "credentials": {
                "namespace": "infra",
                "name": "snowflake-creds",
                "key": "credentials",
            },
        }))
        .unwrap();
        assert_eq!(spec.identity.organization, "ACME");
        assert_eq!(spec.auth_method, "password");
        assert!(spec.credentials.is_some());
        assert!(spec.key_fingerprint.is_none());
    }
}
