//! Snowflake authentication method resolution for the Snowlink connection core.
//!
//! Given a declarative [`ConnectionSpec`] and access to the secret store the
//! [`AuthResolver`] produces a normalised [`ResolvedConfiguration`]: the flat
//! set of connection parameters the execution engine uses to reach Snowflake.
//!
//! Three authentication methods are supported:
//!
//! - `password`: username and password.
//! - `keyPair`: username and an unencrypted RSA private key (JWT authenticator).
//! - `keyPairPassphrase`: username and a passphrase protected RSA private key
//!   (JWT authenticator).
//!
//! Validation order is deterministic so the same misconfiguration always
//! surfaces the same first error: identity, secret fetch, bundle decode,
//! per-method field checks.
mod config;
mod resolve;
mod spec;

pub mod errors;

pub use self::config::ConfigKey;
pub use self::config::ResolvedConfiguration;
pub use self::config::AUTHENTICATOR_JWT;
pub use self::config::AUTHENTICATOR_PASSWORD;
pub use self::resolve::AuthResolver;
pub use self::spec::AuthMethod;
pub use self::spec::ConnectionSpec;
pub use self::spec::ProviderIdentity;
