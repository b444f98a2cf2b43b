//! Interception framework errors.

use thiserror::Error;

use raidhub_core::AppError;
use raidhub_core::error::ErrorKind;

use crate::hooks::definitions::Operation;

/// Errors raised by the interception framework itself.
#[derive(Debug, Error)]
pub enum InterceptionError {
    /// A hook handler returned an error and the dispatcher is configured
    /// to propagate failures.
    #[error("hook handler '{handler}' failed during {operation}: {source}")]
    HandlerFailed {
        /// The operation being dispatched.
        operation: Operation,
        /// The failing handler's name.
        handler: String,
        /// The handler's error.
        #[source]
        source: AppError,
    },

    /// A plugin requested a hook on an operation the host does not
    /// dispatch. Fatal at load time: the override contract cannot be
    /// honored.
    #[error("operation '{operation}' is not exposed by this host")]
    UnsupportedOperation {
        /// The missing target operation.
        operation: Operation,
    },
}

impl From<InterceptionError> for AppError {
    fn from(err: InterceptionError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::Plugin, message, err)
    }
}
