// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::ExitCode;
use encoding::Error as EncodingError;
use thiserror::Error;

/// The error type returned by actor method calls. The exit code becomes part
/// of the receipt; the message is for diagnostics only and never persists on
/// chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ActorError(exit_code: {exit_code:?}, msg: {msg})")]
pub struct ActorError {
    /// The exit code of this invocation, must not be `Ok`.
    exit_code: ExitCode,
    /// Diagnostic message.
    msg: String,
}

impl ActorError {
    pub fn new(exit_code: ExitCode, msg: String) -> Self {
        Self { exit_code, msg }
    }

    /// Returns the exit code of the error.
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    /// Error message of the actor error.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Prefixes the error message with a context string.
    pub fn wrap(mut self, msg: &str) -> Self {
        self.msg = format!("{}: {}", msg, self.msg);
        self
    }
}

impl From<EncodingError> for ActorError {
    fn from(e: EncodingError) -> Self {
        Self {
            exit_code: ExitCode::ErrSerialization,
            msg: e.to_string(),
        }
    }
}

/// Convenience macro for generating actor errors.
#[macro_export]
macro_rules! actor_error {
    // Error with only one stringable expression
    ( $code:ident; $msg:expr ) => {
        $crate::ActorError::new($crate::ExitCode::$code, $msg.to_string())
    };

    // String with positional arguments
    ( $code:ident; $msg:literal $(, $ex:expr)+ ) => {
        $crate::ActorError::new($crate::ExitCode::$code, format!($msg, $($ex,)*))
    };
}
