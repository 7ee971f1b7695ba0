//! Errors from API token minting.

/// The supplied private key could not be parsed as an RSA key in PEM form.
#[derive(Debug, thiserror::Error)]
#[error("cannot parse the private key as an RSA key in PEM form")]
pub struct InvalidPrivateKey;

/// The signature operation over the API token failed.
#[derive(Debug, thiserror::Error)]
#[error("cannot sign the API token")]
pub struct SigningFailed;
