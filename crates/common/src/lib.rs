//! stackvm common types and binary encoding.
//!
//! This crate provides what the assembler and the VM must agree on:
//!
//! - [`Opcode`] and the [`command`] table describing every instruction
//! - [`Instruction`] / [`Operand`] record encoding
//! - [`container`] header layout, signature and version
//! - [`Program`] — an encoded instruction stream
//! - [`FormatError`] / [`DecodeError`]
//!
//! # Dependencies
//!
//! This crate uses `thiserror` and has no other dependencies.

pub mod command;
pub mod container;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use command::{lookup_by_mnemonic, lookup_by_opcode, Command, OperandKind, COMMANDS};
pub use container::Header;
pub use error::{DecodeError, FormatError};
pub use instruction::{Instruction, Operand};
pub use opcode::Opcode;
pub use program::Program;
