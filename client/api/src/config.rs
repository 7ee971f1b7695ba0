//! Configuration options for Snowflake REST API clients.
use std::time::Duration;

/// Domain all account API endpoints live under.
const SERVICE_DOMAIN: &str = "snowflakecomputing.com";

/// Options to initialise clients with.
pub struct ClientOptions {
    /// Address of the API server to connect to, with trailing slash.
    pub address: String,

    /// Timeout for requests made by the client.
    pub timeout: Duration,

    /// Timeout for new connections initialised by the client.
    pub timeout_connect: Duration,
}

impl ClientOptions {
    /// Define options for the API endpoint of a Snowflake account.
    ///
    /// The account name is expected already normalised and is lowercased
    /// into the fixed service domain template.
    pub fn account<S>(account: S) -> ClientOptionsBuilder
    where
        S: AsRef<str>,
    {
        let address = format!("https://{}.{}", account.as_ref().to_lowercase(), SERVICE_DOMAIN);
        ClientOptions::url(address)
    }

    /// Define options for an explicit API server address.
    pub fn url<S>(address: S) -> ClientOptionsBuilder
    where
        S: Into<String>,
    {
        ClientOptionsBuilder {
            address: address.into(),
            timeout: Duration::from_secs(30),
            timeout_connect: Duration::from_secs(1),
        }
    }
}

/// Incrementally build [`ClientOptions`] objects.
pub struct ClientOptionsBuilder {
    address: String,
    timeout: Duration,
    timeout_connect: Duration,
}

impl ClientOptionsBuilder {
    /// All options are set, get a usable options object.
    pub fn client(self) -> ClientOptions {
        self.into()
    }
}

impl From<ClientOptionsBuilder> for ClientOptions {
    fn from(value: ClientOptionsBuilder) -> Self {
        let mut address = value.address;
        if !address.ends_with('/') {
            address.push('/');
        }
        ClientOptions {
            address,
            timeout: value.timeout,
            timeout_connect: value.timeout_connect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClientOptions;

    #[test]
    fn account_endpoint_template() {
        let options = ClientOptions::account("MY-ACCOUNT").client();
        assert_eq!(options.address, "https://my-account.snowflakecomputing.com/");
    }

    #[test]
    fn url_gains_trailing_slash() {
        let options = ClientOptions::url("http://localhost:8080").client();
        assert_eq!(options.address, "http://localhost:8080/");
    }
}
