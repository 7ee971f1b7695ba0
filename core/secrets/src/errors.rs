//! Errors from secret store access and credential bundle decoding.
use crate::CredentialField;
use crate::SecretReference;

/// The credentials secret payload could not be decoded as a flat JSON object of strings.
#[derive(Debug, thiserror::Error)]
#[error("cannot decode credentials as a JSON object of strings")]
pub struct MalformedCredentials;

/// A required credential field is absent from the decoded bundle.
#[derive(Debug, thiserror::Error)]
#[error("credentials are missing the required '{field}' field")]
pub struct MissingCredentialField {
    pub field: CredentialField,
}

impl MissingCredentialField {
    /// A required credential field is absent from the decoded bundle.
    pub fn new(field: CredentialField) -> Self {
        Self { field }
    }
}

/// The referenced credentials secret was not found.
#[derive(Debug, thiserror::Error)]
pub enum SecretNotFound {
    /// The referenced entry does not exist in the store.
    #[error("credentials secret '{namespace}/{name}' has no entry for key '{key}'")]
    Entry {
        namespace: String,
        name: String,
        key: String,
    },

    /// No credentials secret is referenced at all.
    #[error("no credentials secret referenced")]
    Unset,
}

impl SecretNotFound {
    /// The referenced credentials secret entry was not found in the store.
    pub fn entry(reference: &SecretReference) -> Self {
        Self::Entry {
            namespace: reference.namespace.clone(),
            name: reference.name.clone(),
            key: reference.key.clone(),
        }
    }

    /// The connection spec does not reference a credentials secret.
    pub fn unset() -> Self {
        Self::Unset
    }
}

/// The store failed while reading the referenced credentials secret.
#[derive(Debug, thiserror::Error)]
#[error("cannot read credentials secret '{namespace}/{name}' from the store")]
pub struct SecretReadError {
    pub namespace: String,
    pub name: String,
}

impl SecretReadError {
    /// The store failed while reading the referenced credentials secret.
    pub fn entry(reference: &SecretReference) -> Self {
        Self {
            namespace: reference.namespace.clone(),
            name: reference.name.clone(),
        }
    }
}
