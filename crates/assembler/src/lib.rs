//! stackvm assembler — two-pass translation of assembly text to programs.
//!
//! Pass 1 ([`resolve_labels`]) walks the tokens summing instruction widths
//! and binds each label to the offset of the next instruction. Pass 2
//! ([`encode`]) walks them again and writes every record, resolving jump
//! operands through the label table, so forward references just work.
//!
//! # Usage
//!
//! ```
//! use stackvm_assembler::{assemble, disassemble};
//!
//! let program = assemble("PUSH 3\nPUSH 4\nADD\nHALT\n").unwrap();
//! assert_eq!(program.len(), 9 + 9 + 1 + 1);
//! assert_eq!(disassemble(&program).unwrap(), "PUSH 3.0\nPUSH 4.0\nADD\nHALT\n");
//! ```
//!
//! # Syntax
//!
//! - `;` starts a comment running to end of line
//! - `name:` defines a label at the next instruction
//! - mnemonics are case-insensitive; labels and register names are not
//! - register operands are `R0` to `R255`
//! - immediates are decimal floating-point literals
//!
//! Operands follow their mnemonic as the next token, on any line.

pub mod error;

mod disassembler;
mod encoder;
mod labels;
mod lexer;
mod parser;

pub use encoder::encode;
pub use error::AsmError;
pub use labels::{resolve_labels, LabelTable};
pub use lexer::{tokenize, Token};

use stackvm_common::{DecodeError, Program};

/// Assemble text into a program body.
///
/// Returns the first error encountered.
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    let tokens = tokenize(source);
    let labels = resolve_labels(&tokens)?;
    encode(&tokens, &labels)
}

/// Disassemble a program body into text that reassembles to the same bytes.
pub fn disassemble(program: &Program) -> Result<String, DecodeError> {
    disassembler::disassemble(program)
}
