// Platform user adapter

use crate::error::Result;
use crate::graphql::graphql_data;
use crate::transport::Transport;
use async_trait::async_trait;
use codefresh_core::domain::platform::User;
use codefresh_core::port::UserApi;
use serde_json::json;
use tokio_util::sync::CancellationToken;

const ME: &str = r#"
query Me {
	me {
		id
		name
		email
		isAdmin
		accounts {
			id
			name
		}
		activeAccount {
			id
			name
			gitProvider
			gitApiUrl
			sharedConfigRepo
			admins
		}
	}
}"#;

#[derive(Debug, Clone)]
pub struct Users {
    transport: Transport,
}

impl Users {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl UserApi for Users {
    async fn current(&self, ctx: &CancellationToken) -> Result<User> {
        graphql_data(ctx, &self.transport, ME, &json!({}))
            .await
            .map_err(|e| e.context("failed getting current user"))
    }
}
