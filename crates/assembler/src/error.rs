//! Error types for the stackvm assembler.

use thiserror::Error;

/// Errors produced while assembling source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A label was defined twice.
    #[error("line {line}: multiple definition of label '{label}'")]
    DuplicateLabel { line: usize, label: String },

    /// A token in mnemonic position is not in the command table.
    #[error("line {line}: unknown command '{token}'")]
    UnknownMnemonic { line: usize, token: String },

    /// An operand-taking command is the last token of the source.
    #[error("line {line}: {mnemonic} expects an operand, but end of file is reached")]
    MissingOperand { line: usize, mnemonic: &'static str },

    /// Register operand is not `R` followed by an integer.
    #[error("line {line}: incorrect register name '{token}'")]
    InvalidRegister { line: usize, token: String },

    /// Register number outside `0..=255`.
    #[error("line {line}: register number out of range '{token}'")]
    RegisterOutOfRange { line: usize, token: String },

    /// Jump operand names a label that was never defined.
    #[error("line {line}: label '{label}' not found")]
    UnresolvedLabel { line: usize, label: String },

    /// Immediate operand is not a finite floating-point literal.
    #[error("line {line}: invalid immediate '{token}'")]
    InvalidImmediate { line: usize, token: String },

    /// Immediate literal does not fit in a double.
    #[error("line {line}: immediate out of range '{token}'")]
    ImmediateOutOfRange { line: usize, token: String },
}
