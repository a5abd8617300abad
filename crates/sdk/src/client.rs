//! Codefresh Client

use crate::classic::V1;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::platform::V2;
use crate::transport::Transport;

/// Codefresh platform client
///
/// Cheap to clone; every clone shares one connection pool.
///
/// # Example
///
/// ```no_run
/// use codefresh_sdk::{ClientOptions, Codefresh, CancellationToken};
/// use codefresh_sdk::port::UserApi;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Codefresh::new(ClientOptions::new("https://g.codefresh.io", "my-api-key"))?;
/// let me = client.v2().user().current(&CancellationToken::new()).await?;
/// println!("logged in as {}", me.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Codefresh {
    transport: Transport,
}

impl Codefresh {
    /// Build a client
    ///
    /// Fails if the host is not a valid base URL or the token cannot be sent
    /// as a header. No request is made.
    pub fn new(options: ClientOptions) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(options)?,
        })
    }

    pub fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// Classic REST resources
    pub fn v1(&self) -> V1 {
        V1::new(self.transport.clone())
    }

    /// Platform GraphQL resources
    pub fn v2(&self) -> V2 {
        V2::new(self.transport.clone())
    }

    /// Raw transport, for calls no adapter covers
    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}
