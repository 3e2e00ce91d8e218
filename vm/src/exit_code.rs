// Copyright 2019-2023 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use num_derive::FromPrimitive;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Exit code of a method invocation, persisted in the message receipt.
#[derive(
    Debug, PartialEq, Eq, Clone, Copy, Hash, FromPrimitive, Serialize_repr, Deserialize_repr,
)]
#[repr(u64)]
pub enum ExitCode {
    Ok = 0,

    /// Indicates the message sender doesn't exist.
    SysErrSenderInvalid = 1,
    /// Indicates the message sender was not in a valid state to send this message.
    SysErrSenderStateInvalid = 2,
    /// Indicates the message receiver doesn't export the method.
    SysErrInvalidMethod = 3,
    /// Indicates the message parameters were rejected before invocation.
    SysErrInvalidParameters = 4,
    /// Indicates the message receiver doesn't exist and can't be created.
    SysErrInvalidReceiver = 5,
    /// Indicates the sender didn't have the balance to cover the message transfer.
    SysErrInsufficientFunds = 6,
    /// Indicates the gas limit was exceeded.
    SysErrOutOfGas = 7,
    /// Indicates the message sender is not allowed to perform the call.
    SysErrForbidden = 8,
    /// Indicates the actor attempted an illegal operation.
    SysErrIllegalActor = 9,
    /// Indicates an invalid argument passed to a runtime method.
    SysErrIllegalArgument = 10,
    /// Indicates serialization failure within the VM.
    SysErrSerialization = 11,

    // Common error codes shared by all actors.
    ErrIllegalArgument = 16,
    ErrNotFound = 17,
    ErrForbidden = 18,
    ErrInsufficientFunds = 19,
    ErrIllegalState = 20,
    ErrSerialization = 21,
}

impl ExitCode {
    /// Returns the raw exit code value recorded in receipts.
    pub fn value(self) -> u64 {
        self as u64
    }

    /// Returns true if the exit code was a success.
    pub fn is_success(self) -> bool {
        self == ExitCode::Ok
    }

    /// Returns true if the execution was a system error, as opposed to an
    /// error raised by actor code.
    pub fn is_sys_error(self) -> bool {
        let v = self.value();
        v >= 1 && v <= 11
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn code_classes() {
        assert!(ExitCode::Ok.is_success());
        assert!(ExitCode::SysErrForbidden.is_sys_error());
        assert!(!ExitCode::ErrForbidden.is_sys_error());
        assert_eq!(ExitCode::ErrIllegalArgument.value(), 16);
    }

    #[test]
    fn from_receipt_value() {
        assert_eq!(ExitCode::from_u64(18), Some(ExitCode::ErrForbidden));
        assert_eq!(ExitCode::from_u64(12), None);
    }
}
