//! SDK Error Types
//!
//! The taxonomy lives in `codefresh-core` so ports can name it; this module
//! maps reqwest failures onto it.

pub use codefresh_core::error::{
    ApiError, ClientError, GraphqlError, GraphqlErrorResponse, Result,
};

use tracing::debug;

/// Network-level failure while sending (DNS, connect, timeout)
pub(crate) fn send_error(err: reqwest::Error) -> ClientError {
    debug!(
        error = %err,
        timeout = err.is_timeout(),
        connect = err.is_connect(),
        "HTTP request failed"
    );
    ClientError::Send(Box::new(err))
}

pub(crate) fn read_error(err: reqwest::Error) -> ClientError {
    ClientError::ReadBody(Box::new(err))
}
