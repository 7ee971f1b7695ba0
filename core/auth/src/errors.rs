//! Errors from connection spec validation and authentication method resolution.

// Shared with the bundle decoder: the "present and non-empty" rule lives in
// `snowlink_secrets` next to the credential field identifiers.
pub use snowlink_secrets::errors::MissingCredentialField;

/// A required identity field is missing from the connection spec.
#[derive(Debug, thiserror::Error)]
#[error("connection spec is missing the '{field}' identity field")]
pub struct MissingIdentity {
    pub field: String,
}

impl MissingIdentity {
    /// A required identity field is missing from the connection spec.
    pub fn new<S: Into<String>>(field: S) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// The declared authentication method is not supported.
#[derive(Debug, thiserror::Error)]
#[error("authentication method '{method}' is not supported")]
pub struct UnsupportedAuthMethod {
    pub method: String,
}

impl UnsupportedAuthMethod {
    /// The declared authentication method is not supported.
    pub fn new<S: Into<String>>(method: S) -> Self {
        Self {
            method: method.into(),
        }
    }
}
