//! Secret store access and credential bundle decoding for the Snowlink connection core.
//!
//! Access to the secret store is modelled as an injected capability:
//! the [`SecretStore`] trait is implemented by store backends while the rest
//! of the core only sees the [`Secrets`] handle. This keeps the resolution
//! logic free of any live cluster dependency and testable with the in-memory
//! [`SecretsFixture`].
use std::sync::Arc;

use anyhow::Result;

use snowlink_context::Context;

mod bundle;
mod reference;

pub mod errors;

pub use self::bundle::CredentialBundle;
pub use self::bundle::CredentialField;
pub use self::reference::SecretReference;
pub use self::reference::SecretSource;

/// Resolve secret values from the backing store.
#[derive(Clone)]
pub struct Secrets(Arc<dyn SecretStore>);

impl Secrets {
    /// Fetch the raw value of the referenced secret entry.
    ///
    /// For details see [`SecretStore::resolve`].
    pub async fn resolve(&self, context: &Context, reference: &SecretReference) -> Result<Vec<u8>> {
        self.0.resolve(context, reference).await
    }
}

impl<T> From<T> for Secrets
where
    T: SecretStore + 'static,
{
    fn from(value: T) -> Self {
        Secrets(Arc::new(value))
    }
}

/// Operations implemented by secret store backends supported by Snowlink.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the raw value of the referenced secret entry.
    ///
    /// [`SecretStore`] implementations must respect the following expectations:
    ///
    /// - Perform a point lookup for the referenced entry, no caching of values.
    /// - Return a [`SecretNotFound`](errors::SecretNotFound) error if the
    ///   referenced object or key does not exist.
    /// - Return errors from the store itself (access denied, network failure)
    ///   wrapped with [`SecretReadError`](errors::SecretReadError) context.
    /// - Propagate cancellation of the ambient operation untranslated.
    async fn resolve(&self, context: &Context, reference: &SecretReference) -> Result<Vec<u8>>;
}

#[cfg(any(test, feature = "test-fixture"))]
pub use self::fixture::SecretsFixture;
#[cfg(any(test, feature = "test-fixture"))]
pub use self::fixture::SecretsFixtureBackend;

#[cfg(any(test, feature = "test-fixture"))]
mod fixture {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::Mutex;

    use anyhow::Result;

    use snowlink_context::Context;

    use super::errors::SecretNotFound;
    use super::SecretReference;
    use super::SecretStore;

    type Entries = Arc<Mutex<HashMap<(String, String, String), Vec<u8>>>>;

    /// In-memory secret store for unit tests.
    #[derive(Clone, Default)]
    pub struct SecretsFixture {
        entries: Entries,
    }

    impl SecretsFixture {
        /// Create an empty in-memory secret store.
        pub fn new() -> SecretsFixture {
            SecretsFixture::default()
        }

        /// Create a backend that will serve entries stored in this fixture.
        pub fn backend(&self) -> SecretsFixtureBackend {
            SecretsFixtureBackend {
                entries: Arc::clone(&self.entries),
            }
        }

        /// Store an entry to be served by backends attached to this fixture.
        pub fn store<V>(&self, reference: &SecretReference, value: V)
        where
            V: Into<Vec<u8>>,
        {
            let coordinates = (
                reference.namespace.clone(),
                reference.name.clone(),
                reference.key.clone(),
            );
            self.entries
                .lock()
                .expect("SecretsFixture entries lock poisoned")
                .insert(coordinates, value.into());
        }
    }

    /// Backend serving entries stored in a [`SecretsFixture`].
    pub struct SecretsFixtureBackend {
        entries: Entries,
    }

    #[async_trait::async_trait]
    impl SecretStore for SecretsFixtureBackend {
        async fn resolve(&self, _: &Context, reference: &SecretReference) -> Result<Vec<u8>> {
            let coordinates = (
                reference.namespace.clone(),
                reference.name.clone(),
                reference.key.clone(),
            );
            let entries = self
                .entries
                .lock()
                .expect("SecretsFixture entries lock poisoned");
            match entries.get(&coordinates) {
                Some(value) => Ok(value.clone()),
                None => anyhow::bail!(SecretNotFound::entry(reference)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use snowlink_context::Context;

    use super::errors::SecretNotFound;
    use super::errors::SecretReadError;
    use super::SecretReference;
    use super::Secrets;
    use super::SecretsFixture;
    use super::SecretStore;

    /// Test backend to simulate store failures.
    struct FailingStore;

    #[async_trait::async_trait]
    impl SecretStore for FailingStore {
        async fn resolve(&self, _: &Context, reference: &SecretReference) -> Result<Vec<u8>> {
            let error = anyhow::anyhow!("store is unreachable");
            Err(error.context(SecretReadError::entry(reference)))
        }
    }

    #[tokio::test]
    async fn resolve_stored_entry() {
        let context = Context::fixture();
        let fixture = SecretsFixture::new();
        let reference = SecretReference::secret("infra", "snowflake-creds", "credentials");
        fixture.store(&reference, r#"{"username": "bob"}"#);

        let secrets = Secrets::from(fixture.backend());
        let value = secrets.resolve(&context, &reference).await.unwrap();
        assert_eq!(value, br#"{"username": "bob"}"#);
    }

    #[tokio::test]
    async fn resolve_missing_entry() {
        let context = Context::fixture();
        let fixture = SecretsFixture::new();
        let reference = SecretReference::secret("infra", "snowflake-creds", "credentials");

        let secrets = Secrets::from(fixture.backend());
        let error = secrets.resolve(&context, &reference).await.unwrap_err();
        assert!(error.is::<SecretNotFound>());
    }

    #[tokio::test]
    async fn resolve_store_failure() {
        let context = Context::fixture();
        let reference = SecretReference::secret("infra", "snowflake-creds", "credentials");

        let secrets = Secrets::from(FailingStore);
        let error = secrets.resolve(&context, &reference).await.unwrap_err();
        assert!(error.is::<SecretReadError>());
    }
}
