//! Resolution of connection specs into execution engine configuration.
use anyhow::Context as _;
use anyhow::Result;

use snowlink_context::Context;
use snowlink_secrets::errors::SecretNotFound;
use snowlink_secrets::CredentialBundle;
use snowlink_secrets::CredentialField;
use snowlink_secrets::Secrets;

use crate::config::ConfigKey;
use crate::config::ResolvedConfiguration;
use crate::config::AUTHENTICATOR_JWT;
use crate::config::AUTHENTICATOR_PASSWORD;
use crate::errors::UnsupportedAuthMethod;
use crate::spec::AuthMethod;
use crate::spec::ConnectionSpec;


/// Resolve connection specs into configuration for the execution engine.
///
/// The resolver holds no state across calls: every resolution fetches and
/// decodes the referenced credentials fresh so rotated secrets are always
/// picked up.
#[derive(Clone)]
pub struct AuthResolver {
    secrets: Secrets,
}

impl AuthResolver {
    /// Create a resolver reading credentials through the given store capability.
    pub fn new(secrets: Secrets) -> AuthResolver {
        AuthResolver { secrets }
    }

    /// Resolve a connection spec into a normalised connection configuration.
    ///
    /// Validation is ordered deterministically: identity first, then secret
    /// fetch, then bundle decode, then per-method field checks. On error no
    /// configuration is returned at all.
    pub async fn resolve(
        &self,
        context: &Context,
        spec: &ConnectionSpec,
    ) -> Result<ResolvedConfiguration> {
        spec.identity.check()?;
        let reference = spec.credentials.as_ref().ok_or_else(SecretNotFound::unset)?;
        let raw = self
            .secrets
            .resolve(context, reference)
            .await
            .context("cannot extract connection credentials")?;
        let bundle =
            CredentialBundle::decode(&raw).context("cannot decode connection credentials")?;

        let params = match AuthMethod::from_tag(&spec.auth_method) {
            Some(AuthMethod::Password) => password_params(&bundle)?,
            Some(AuthMethod::KeyPair) => key_pair_params(&bundle)?,
            Some(AuthMethod::KeyPairPassphrase) => key_pair_passphrase_params(&bundle)?,
            None => anyhow::bail!(UnsupportedAuthMethod::new(&spec.auth_method)),
        };

        let mut config = ResolvedConfiguration::default();
        config.set(ConfigKey::OrganizationName, &spec.identity.organization);
        config.set(ConfigKey::AccountName, spec.identity.account_name());
        // Warehouse is orthogonal to the auth method and may be empty.
        config.set(ConfigKey::Warehouse, bundle.get(CredentialField::Warehouse));
        params.apply(&mut config);
        Ok(config)
    }
}

/// Connection parameters produced by a single authentication method.
///
/// Each method is validated by a pure function returning one of these values,
/// so the output configuration is never touched until validation succeeded.
#[derive(Debug, Eq, PartialEq)]
enum MethodParams {
    /// Username and password authentication.
    Password { user: String, password: String },

    /// Key-pair (JWT) authentication, with or without a key passphrase.
    KeyPair {
        user: String,
        private_key: String,
        passphrase: Option<String>,
        role: Option<String>,
    },
}

impl MethodParams {
    /// Merge the method parameters into the output configuration.
    fn apply(self, config: &mut ResolvedConfiguration) {
        match self {
            MethodParams::Password { user, password } => {
                config.set(ConfigKey::User, user);
                config.set(ConfigKey::Password, password);
                config.set(ConfigKey::Authenticator, AUTHENTICATOR_PASSWORD);
            }
            MethodParams::KeyPair {
                user,
                private_key,
                passphrase,
                role,
            } => {
                config.set(ConfigKey::User, user);
                config.set(ConfigKey::PrivateKey, private_key);
                if let Some(passphrase) = passphrase {
                    config.set(ConfigKey::PrivateKeyPassphrase, passphrase);
                }
                if let Some(role) = role {
                    config.set(ConfigKey::Role, role);
                }
                config.set(ConfigKey::Authenticator, AUTHENTICATOR_JWT);
            }
        }
    }
}

/// Validate the credential bundle for username and password authentication.
fn password_params(bundle: &CredentialBundle) -> Result<MethodParams> {
    let user = bundle.required(CredentialField::Username)?.to_string();
    let password = bundle.required(CredentialField::Password)?.to_string();
    Ok(MethodParams::Password { user, password })
}

/// Validate the credential bundle for key-pair authentication.
///
/// The role is a passthrough: read when present, never required.
fn key_pair_params(bundle: &CredentialBundle) -> Result<MethodParams> {
    let user = bundle.required(CredentialField::Username)?.to_string();
    let private_key = bundle.required(CredentialField::PrivateKey)?.to_string();
    let role = bundle.optional(CredentialField::Role).map(String::from);
    Ok(MethodParams::KeyPair {
        user,
        private_key,
        passphrase: None,
        role,
    })
}

/// Validate the credential bundle for key-pair authentication with a
/// passphrase protected private key.
fn key_pair_passphrase_params(bundle: &CredentialBundle) -> Result<MethodParams> {
    let user = bundle.required(CredentialField::Username)?.to_string();
    let private_key = bundle.required(CredentialField::PrivateKey)?.to_string();
    let passphrase = bundle
        .required(CredentialField::PrivateKeyPassphrase)?
        .to_string();
    let role = bundle.optional(CredentialField::Role).map(String::from);
    Ok(MethodParams::KeyPair {
        user,
        private_key,
        passphrase: Some(passphrase),
        role,
    })
}
