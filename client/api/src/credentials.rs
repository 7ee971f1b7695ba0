//! Resolution of identity and key material for the direct REST API path.
use anyhow::Context as _;
use anyhow::Result;
use time::OffsetDateTime;

use snowlink_auth::ConnectionSpec;
use snowlink_context::Context;
use snowlink_secrets::errors::SecretNotFound;
use snowlink_secrets::CredentialBundle;
use snowlink_secrets::CredentialField;
use snowlink_secrets::Secrets;

use crate::token;
use crate::token::SignedToken;

/// Identity and key material to authenticate direct REST API calls.
///
/// Account and user are normalised on construction so they can be handed to
/// the token minter as is.
#[derive(Clone, Debug)]
pub struct ApiCredentials {
    /// Normalised account name.
    pub account: String,

    /// Normalised (uppercased) user name.
    pub user: String,

    /// SHA-256 fingerprint of the public key registered with Snowflake.
    pub fingerprint: String,

    /// RSA private key in PEM form.
    pub private_key: String,
}

impl ApiCredentials {
    /// Resolve REST API credentials for a connection spec.
    ///
    /// The username and private key are read from the referenced credential
    /// bundle, the public key fingerprint from its own secret entry. Nothing
    /// is cached: credentials are fetched fresh on every resolution.
    pub async fn resolve(
        context: &Context,
        secrets: &Secrets,
        spec: &ConnectionSpec,
    ) -> Result<ApiCredentials> {
        spec.identity.check()?;
        let reference = spec
            .credentials
            .as_ref()
            .ok_or_else(SecretNotFound::unset)?;
        let raw = secrets
            .resolve(context, reference)
            .await
            .context("cannot extract connection credentials")?;
        let bundle =
            CredentialBundle::decode(&raw).context("cannot decode connection credentials")?;
        let user = bundle.required(CredentialField::Username)?.to_uppercase();
        let private_key = bundle.required(CredentialField::PrivateKey)?.to_string();

        let reference = spec
            .key_fingerprint
            .as_ref()
            .ok_or_else(SecretNotFound::unset)?;
        let fingerprint = secrets
            .resolve(context, reference)
            .await
            .context("cannot extract the public key fingerprint")?;
        let fingerprint = String::from_utf8(fingerprint)
            .context("cannot decode the public key fingerprint as UTF-8")?;

        Ok(ApiCredentials {
            account: spec.identity.account_name(),
            user,
            fingerprint: fingerprint.trim().to_string(),
            private_key,
        })
    }

    /// Mint an API token for these credentials issued at the given instant.
    pub fn mint(&self, now: OffsetDateTime) -> Result<SignedToken> {
        token::mint(
            &self.account,
            &self.user,
            &self.fingerprint,
            &self.private_key,
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use snowlink_auth::ConnectionSpec;
    use snowlink_auth::ProviderIdentity;
    use snowlink_context::Context;
    use snowlink_secrets::errors::MissingCredentialField;
    use snowlink_secrets::errors::SecretNotFound;
    use snowlink_secrets::CredentialField;
    use snowlink_secrets::SecretReference;
    use snowlink_secrets::Secrets;
    use snowlink_secrets::SecretsFixture;

    use super::ApiCredentials;

    fn credentials_reference() -> SecretReference {
        SecretReference::secret("infra", "snowflake-creds", "credentials")
    }

    fn fingerprint_reference() -> SecretReference {
        SecretReference::secret("infra", "snowflake-creds", "fingerprint")
    }

    fn spec() -> ConnectionSpec {
        ConnectionSpec {
            identity: ProviderIdentity {
                organization: "ACME".to_string(),
                account: "my.account".to_string(),
            },
            auth_method: "keyPair".to_string(),
            credentials: Some(credentials_reference()),
            key_fingerprint: Some(fingerprint_reference()),
        }
    }

    fn secrets() -> Secrets {
        let fixture = SecretsFixture::new();
        fixture.store(
            &credentials_reference(),
            r#"{"username": "bob", "privateKey": "PEM"}"#,
        );
        fixture.store(&fingerprint_reference(), "abc123\n");
        Secrets::from(fixture.backend())
    }

    #[tokio::test]
    async fn resolve_normalises_identity() {
        let context = Context::fixture();
        let credentials = ApiCredentials::resolve(&context, &secrets(), &spec())
            .await
            .unwrap();
        assert_eq!(credentials.account, "MY-ACCOUNT");
        assert_eq!(credentials.user, "BOB");
        assert_eq!(credentials.fingerprint, "abc123");
        assert_eq!(credentials.private_key, "PEM");
    }

    #[tokio::test]
    async fn resolve_requires_private_key() {
        let context = Context::fixture();
        let fixture = SecretsFixture::new();
        fixture.store(&credentials_reference(), r#"{"username": "bob"}"#);
        fixture.store(&fingerprint_reference(), "abc123");
        let secrets = Secrets::from(fixture.backend());

        let error = ApiCredentials::resolve(&context, &secrets, &spec())
            .await
            .unwrap_err();
        let error = error.downcast::<MissingCredentialField>().unwrap();
        assert_eq!(error.field, CredentialField::PrivateKey);
    }

    #[tokio::test]
    async fn resolve_requires_fingerprint_reference() {
        let context = Context::fixture();
        let mut spec = spec();
        spec.key_fingerprint = None;
        let error = ApiCredentials::resolve(&context, &secrets(), &spec)
            .await
            .unwrap_err();
        let error = error.downcast::<SecretNotFound>().unwrap();
        assert!(matches!(error, SecretNotFound::Unset));
    }

    #[tokio::test]
    async fn resolve_requires_credentials_reference() {
        let context = Context::fixture();
        let mut spec = spec();
        spec.credentials = None;
        let error = ApiCredentials::resolve(&context, &secrets(), &spec)
            .await
            .unwrap_err();
        assert!(error.is::<SecretNotFound>());
    }
}
