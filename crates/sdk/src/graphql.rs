//! GraphQL Invoker
//!
//! Every operation answers with `{"data": {"<operationField>": ...}, "errors": [...]}`.
//! The field name is unknown to the caller, so the single value under `data`
//! is decoded into the caller's type whatever its key.

use crate::error::{ClientError, GraphqlError, GraphqlErrorResponse, Result};
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

/// Decoded GraphQL answer
///
/// Both halves may be present at once (partial success). Callers that want
/// the data despite errors use [`GraphqlOutcome::into_parts`].
#[derive(Debug, Clone)]
pub struct GraphqlOutcome<T> {
    pub data: Option<T>,
    pub errors: Option<GraphqlErrorResponse>,
}

impl<T> GraphqlOutcome<T> {
    /// Data if the server reported no errors
    pub fn into_result(self) -> Result<T> {
        if let Some(errors) = self.errors {
            return Err(errors.into());
        }
        self.data.ok_or(ClientError::MissingData)
    }

    pub fn into_parts(self) -> (Option<T>, Option<GraphqlErrorResponse>) {
        (self.data, self.errors)
    }

    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }
}

/// Run a GraphQL operation and decode its single data entry into `T`
///
/// Transport failures and malformed envelopes are errors. GraphQL logical
/// errors are not: they come back in [`GraphqlOutcome::errors`] next to
/// whatever data was decoded.
pub async fn graphql_api<T, V>(
    ctx: &CancellationToken,
    transport: &Transport,
    query: &str,
    variables: &V,
) -> Result<GraphqlOutcome<T>>
where
    T: DeserializeOwned,
    V: Serialize + ?Sized,
{
    let bytes = transport.graphql_call(ctx, query, variables).await?;
    decode_envelope(&bytes)
}

/// Shorthand for `graphql_api(..).await?.into_result()`
pub(crate) async fn graphql_data<T, V>(
    ctx: &CancellationToken,
    transport: &Transport,
    query: &str,
    variables: &V,
) -> Result<T>
where
    T: DeserializeOwned,
    V: Serialize + ?Sized,
{
    graphql_api(ctx, transport, query, variables)
        .await?
        .into_result()
}

fn decode_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<GraphqlOutcome<T>> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(ClientError::Decode)?;

    let data = match envelope.data {
        Some(entries) => {
            if entries.len() > 1 {
                warn!(
                    keys = ?entries.keys().collect::<Vec<_>>(),
                    "GraphQL response has more than one data entry, decoding the first"
                );
            }
            match entries.into_iter().next() {
                Some((_, Value::Null)) | None => None,
                Some((_, value)) => Some(serde_json::from_value(value).map_err(ClientError::Decode)?),
            }
        }
        None => None,
    };

    let errors = envelope
        .errors
        .filter(|errors| !errors.is_empty())
        .map(GraphqlErrorResponse::new);

    Ok(GraphqlOutcome { data, errors })
}
