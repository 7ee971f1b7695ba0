//! References to entries in the external secret store.
use serde::Deserialize;
use serde::Serialize;

/// Kind of store a [`SecretReference`] points into.
///
/// Only cluster secrets are supported but the kind is kept explicit so specs
/// declaring an unsupported store fail to decode instead of silently reading
/// from the wrong place.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum SecretSource {
    /// The entry lives in a cluster secret object.
    #[default]
    Secret,
}

/// Reference to a single entry in the external secret store.
///
/// References are resolved on demand and never cached across resolutions:
/// credentials may rotate between reconciliations and staleness must never
/// be possible.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SecretReference {
    /// Kind of store holding the entry.
    #[serde(default)]
    pub source: SecretSource,

    /// Namespace of the secret object holding the entry.
    pub namespace: String,

    /// Name of the secret object holding the entry.
    pub name: String,

    /// Key of the entry within the secret object.
    pub key: String,
}

impl SecretReference {
    /// Reference an entry in a cluster secret object.
    pub fn secret<S1, S2, S3>(namespace: S1, name: S2, key: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            source: SecretSource::Secret,
            namespace: namespace.into(),
            name: name.into(),
            key: key.into(),
        }
    }
}
