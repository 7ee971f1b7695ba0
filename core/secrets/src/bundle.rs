//! Decoding of raw credentials secrets into named fields.
use std::collections::HashMap;

use anyhow::Result;

use crate::errors::MalformedCredentials;

/// Typed identifiers for the fields of a [`CredentialBundle`].
///
/// These are the single source of truth for the JSON keys expected in
/// credentials secret payloads, shared between the decoder and the
/// authentication method resolvers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CredentialField {
    Username,
    Password,
    PrivateKey,
    PrivateKeyPassphrase,
    Role,
    Warehouse,
}

impl CredentialField {
    /// Canonical JSON key for the field in credentials secret payloads.
    pub fn key(&self) -> &'static str {
        match self {
            CredentialField::Username => "username",
            CredentialField::Password => "password",
            CredentialField::PrivateKey => "privateKey",
            CredentialField::PrivateKeyPassphrase => "privateKeyPassphrase",
            CredentialField::Role => "role",
            CredentialField::Warehouse => "warehouse",
        }
    }
}

impl std::fmt::Display for CredentialField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Decoded credentials secret payload.
///
/// Bundles are produced fresh for every resolution by [`CredentialBundle::decode`].
/// Decoding does not validate the presence of any specific field because the
/// required set differs per authentication method.
#[derive(Clone, Debug, Default)]
pub struct CredentialBundle {
    fields: HashMap<String, String>,
}

impl CredentialBundle {
    /// Decode a raw credentials secret payload into named fields.
    ///
    /// The payload is trimmed of surrounding whitespace and parsed as a flat
    /// string-keyed JSON object. Unknown keys are kept but never read.
    pub fn decode(raw: &[u8]) -> Result<CredentialBundle> {
        let text = std::str::from_utf8(raw)
            .map_err(|error| anyhow::anyhow!(error).context(MalformedCredentials))?;
        let fields = serde_json::from_str(text.trim())
            .map_err(|error| anyhow::anyhow!(error).context(MalformedCredentials))?;
        Ok(CredentialBundle { fields })
    }

    /// Value of a field, or the empty string when the field is absent.
    pub fn get(&self, field: CredentialField) -> &str {
        self.fields.get(field.key()).map(String::as_str).unwrap_or("")
    }

    /// Value of a field, or `None` when the field is absent or empty.
    pub fn optional(&self, field: CredentialField) -> Option<&str> {
        match self.get(field) {
            "" => None,
            value => Some(value),
        }
    }

    /// Value of a field that must be present and non-empty.
    ///
    /// Fails with [`MissingCredentialField`](crate::errors::MissingCredentialField)
    /// when the field is absent or empty.
    pub fn required(&self, field: CredentialField) -> Result<&str> {
        match self.optional(field) {
            Some(value) => Ok(value),
            None => anyhow::bail!(crate::errors::MissingCredentialField::new(field)),
        }
    }
}
