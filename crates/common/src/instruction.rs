//! Instruction records: one opcode byte followed by an optional operand.
//!
//! ```text
//! None        [opcode]
//! Register    [opcode][index: u8]
//! JumpTarget  [opcode][offset: usize, native endian]
//! Immediate   [opcode][value: f64, native endian]
//! ```
//!
//! Records are concatenated without delimiters; the opcode's
//! [`Command::width`] gives the record length.

use std::fmt;

use crate::command::{lookup_by_opcode, Command, OperandKind};
use crate::error::DecodeError;
use crate::opcode::Opcode;

/// A decoded operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    None,
    Register(u8),
    Target(usize),
    Immediate(f64),
}

impl Operand {
    /// The operand kind this value belongs to.
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::None => OperandKind::None,
            Operand::Register(_) => OperandKind::Register,
            Operand::Target(_) => OperandKind::JumpTarget,
            Operand::Immediate(_) => OperandKind::Immediate,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Register(r) => write!(f, "R{r}"),
            Operand::Target(t) => write!(f, "{t}"),
            Operand::Immediate(v) => write!(f, "{v:?}"),
        }
    }
}

/// One instruction: its command table entry plus operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    pub command: &'static Command,
    pub operand: Operand,
}

impl Instruction {
    /// Pair an opcode with an operand.
    ///
    /// Returns `None` if the operand kind does not match the opcode's.
    pub fn new(opcode: Opcode, operand: Operand) -> Option<Self> {
        let command = opcode.command();
        (command.operand == operand.kind()).then_some(Self { command, operand })
    }

    /// Encoded width in bytes.
    pub fn width(&self) -> usize {
        self.command.width
    }

    /// Append the encoded record to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.command.byte());
        match self.operand {
            Operand::None => {}
            Operand::Register(r) => out.push(r),
            Operand::Target(t) => out.extend_from_slice(&t.to_ne_bytes()),
            Operand::Immediate(v) => out.extend_from_slice(&v.to_ne_bytes()),
        }
    }

    /// Decode the record starting at `offset` in a program body.
    pub fn decode(body: &[u8], offset: usize) -> Result<Self, DecodeError> {
        let byte = *body.get(offset).ok_or(DecodeError::OutOfRange { at: offset })?;
        let command = lookup_by_opcode(byte).ok_or(DecodeError::UnknownOpcode {
            opcode: byte,
            at: offset,
        })?;
        let truncated = DecodeError::Truncated {
            mnemonic: command.mnemonic,
            at: offset,
        };
        let raw = body
            .get(offset + 1..offset + command.width)
            .ok_or(truncated.clone())?;

        let operand = match command.operand {
            OperandKind::None => Operand::None,
            OperandKind::Register => Operand::Register(raw[0]),
            OperandKind::JumpTarget => {
                let bytes = raw.try_into().map_err(|_| truncated)?;
                Operand::Target(usize::from_ne_bytes(bytes))
            }
            OperandKind::Immediate => {
                let bytes = raw.try_into().map_err(|_| truncated)?;
                Operand::Immediate(f64::from_ne_bytes(bytes))
            }
        };

        Ok(Self { command, operand })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operand {
            Operand::None => f.write_str(self.command.mnemonic),
            operand => write!(f, "{} {operand}", self.command.mnemonic),
        }
    }
}
