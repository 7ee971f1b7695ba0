//! Snowflake REST API client assembly for the direct (non engine) path.
//!
//! This crate builds everything an API call needs short of sending it:
//! credentials resolution, token minting and request assembly with the
//! headers Snowflake expects for key-pair JWT authentication.
use anyhow::Result;
use reqwest::Client as ReqwestClient;
use reqwest::Method;
use reqwest::RequestBuilder;

mod config;
mod credentials;
mod token;

pub mod errors;

pub use self::config::ClientOptions;
pub use self::config::ClientOptionsBuilder;
pub use self::credentials::ApiCredentials;
pub use self::token::mint;
pub use self::token::SignedToken;
pub use self::token::TOKEN_LIFETIME;

/// String to set as the user agent in HTTP request.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Marker header identifying the bearer token as a signed key-pair JWT.
const TOKEN_TYPE_HEADER: &str = "X-Snowflake-Authorization-Token-Type";
const TOKEN_TYPE_KEYPAIR_JWT: &str = "KEYPAIR_JWT";

/// Snowflake REST API client for a single account endpoint.
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
    /// Base URL of the API server to send requests to.
    base: String,

    /// Low-level [`Client`](reqwest::Client) to perform HTTP requests with.
    client: ReqwestClient,
}

impl ApiClient {
    /// Initialise a client with [`ClientOptions`].
    pub fn with<O>(options: O) -> Result<ApiClient>
    where
        O: Into<ClientOptions>,
    {
        let options = options.into();
        let client = ReqwestClient::builder()
            .connect_timeout(options.timeout_connect)
            .timeout(options.timeout)
            .user_agent(CLIENT_USER_AGENT);
        let client = ApiClient {
            base: options.address,
            client: client.build()?,
        };
        Ok(client)
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Start a request to a path under the account endpoint.
    ///
    /// The returned builder carries all headers Snowflake expects for
    /// key-pair JWT authentication. No network call is made until the
    /// builder is sent; callers should check [`SignedToken::expired`]
    /// before sending.
    pub fn request(&self, method: Method, path: &str, token: &SignedToken) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .header(TOKEN_TYPE_HEADER, TOKEN_TYPE_KEYPAIR_JWT)
            .bearer_auth(&token.value)
    }
}
