//! Runtime errors for the stackvm interpreter.
//!
//! Every execution error carries the byte offset (`at`) of the instruction
//! that failed, for matching against the dump.

use std::fmt;

use thiserror::Error;

/// Faults recorded by a [`Stack`](crate::stack::Stack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// Pop on an empty stack.
    #[error("stack underflow")]
    Underflow,

    /// Push would exceed [`MAX_CAPACITY`](crate::stack::MAX_CAPACITY).
    #[error("stack exceeded its maximum capacity")]
    CapacityExceeded,
}

/// Classified floating-point fault, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericFault {
    #[error("invalid mathematical operation")]
    InvalidOperation,

    #[error("division by zero")]
    DivideByZero,

    #[error("value is too big")]
    Overflow,

    #[error("value is too small")]
    Underflow,
}

/// Which of the two machine stacks a fault came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Operand,
    Call,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackKind::Operand => f.write_str("operand"),
            StackKind::Call => f.write_str("call"),
        }
    }
}

/// Errors that end an execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `execute` called without a freshly loaded program.
    #[error("no program loaded")]
    NotLoaded,

    /// Opcode byte with no command table entry.
    #[error("unknown command {opcode:#04x} at offset {at}")]
    UnknownOpcode { opcode: u8, at: usize },

    /// Operand bytes run past the end of the program.
    #[error("{mnemonic} at offset {at} is truncated")]
    TruncatedInstruction { mnemonic: &'static str, at: usize },

    /// Program counter left the program without reaching HALT.
    #[error("command counter crossed the program limits at offset {at} (bad jump or missing HALT)")]
    NoHalt { at: usize },

    /// An operation produced a floating-point fault.
    #[error("{fault} at offset {at}")]
    Numeric { fault: NumericFault, at: usize },

    /// Operand or call stack fault.
    #[error("{stack} {fault} at offset {at}")]
    Stack {
        stack: StackKind,
        fault: StackError,
        at: usize,
    },

    /// IN found no more input.
    #[error("input exhausted at offset {at}")]
    InputExhausted { at: usize },

    /// IN read something that is not a finite number.
    #[error("invalid input '{text}' at offset {at}")]
    InvalidInput { text: String, at: usize },

    /// Reading input or writing output failed.
    #[error("i/o failure at offset {at}: {message}")]
    Io { message: String, at: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::Numeric {
                fault: NumericFault::DivideByZero,
                at: 5
            }
            .to_string(),
            "division by zero at offset 5"
        );
        assert_eq!(
            RuntimeError::Stack {
                stack: StackKind::Call,
                fault: StackError::Underflow,
                at: 12
            }
            .to_string(),
            "call stack underflow at offset 12"
        );
        assert_eq!(
            RuntimeError::UnknownOpcode { opcode: 0xAB, at: 0 }.to_string(),
            "unknown command 0xab at offset 0"
        );
    }
}
