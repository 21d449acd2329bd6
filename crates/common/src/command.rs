//! The command table: one declarative descriptor per instruction.
//!
//! Both the assembler's encoder and the interpreter's decoder consult this
//! table. Adding an instruction means adding an [`Opcode`] variant and one
//! row here; the VM then needs a handler for it.

use std::fmt;
use std::mem::size_of;

use crate::opcode::Opcode;

/// What follows the opcode byte in the binary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// No operand.
    None,
    /// One byte: register index.
    Register,
    /// A native-endian `usize` byte offset into the program body.
    JumpTarget,
    /// A native-endian IEEE-754 double.
    Immediate,
}

impl OperandKind {
    /// Encoded size of the operand in bytes.
    pub const fn size(self) -> usize {
        match self {
            OperandKind::None => 0,
            OperandKind::Register => 1,
            OperandKind::JumpTarget => size_of::<usize>(),
            OperandKind::Immediate => size_of::<f64>(),
        }
    }
}

/// Static description of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Upper-case assembly mnemonic.
    pub mnemonic: &'static str,
    /// Numeric opcode.
    pub opcode: Opcode,
    /// Total encoded width in bytes, opcode byte included.
    pub width: usize,
    /// Kind of the operand following the opcode byte.
    pub operand: OperandKind,
}

impl Command {
    const fn new(opcode: Opcode, mnemonic: &'static str, operand: OperandKind) -> Self {
        Self {
            mnemonic,
            opcode,
            width: 1 + operand.size(),
            operand,
        }
    }

    /// The opcode byte written to the binary stream.
    pub fn byte(&self) -> u8 {
        self.opcode as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)
    }
}

const TABLE: [Command; 28] = [
    Command::new(Opcode::Halt, "HALT", OperandKind::None),
    Command::new(Opcode::Push, "PUSH", OperandKind::Immediate),
    Command::new(Opcode::PushR, "PUSHR", OperandKind::Register),
    Command::new(Opcode::PopR, "POPR", OperandKind::Register),
    Command::new(Opcode::Pop, "POP", OperandKind::None),
    Command::new(Opcode::Dup, "DUP", OperandKind::None),
    Command::new(Opcode::Swap, "SWAP", OperandKind::None),
    Command::new(Opcode::Add, "ADD", OperandKind::None),
    Command::new(Opcode::Sub, "SUB", OperandKind::None),
    Command::new(Opcode::Mul, "MUL", OperandKind::None),
    Command::new(Opcode::Div, "DIV", OperandKind::None),
    Command::new(Opcode::Pow, "POW", OperandKind::None),
    Command::new(Opcode::Neg, "NEG", OperandKind::None),
    Command::new(Opcode::Abs, "ABS", OperandKind::None),
    Command::new(Opcode::Sqrt, "SQRT", OperandKind::None),
    Command::new(Opcode::Sin, "SIN", OperandKind::None),
    Command::new(Opcode::Cos, "COS", OperandKind::None),
    Command::new(Opcode::In, "IN", OperandKind::None),
    Command::new(Opcode::Out, "OUT", OperandKind::None),
    Command::new(Opcode::Jmp, "JMP", OperandKind::JumpTarget),
    Command::new(Opcode::Je, "JE", OperandKind::JumpTarget),
    Command::new(Opcode::Jne, "JNE", OperandKind::JumpTarget),
    Command::new(Opcode::Ja, "JA", OperandKind::JumpTarget),
    Command::new(Opcode::Jae, "JAE", OperandKind::JumpTarget),
    Command::new(Opcode::Jb, "JB", OperandKind::JumpTarget),
    Command::new(Opcode::Jbe, "JBE", OperandKind::JumpTarget),
    Command::new(Opcode::Call, "CALL", OperandKind::JumpTarget),
    Command::new(Opcode::Ret, "RET", OperandKind::None),
];

// Row `i` must describe opcode byte `i`; lookup by opcode indexes directly.
const _: () = {
    let mut i = 0;
    while i < TABLE.len() {
        assert!(TABLE[i].opcode as usize == i, "command table out of opcode order");
        assert!(TABLE[i].width == 1 + TABLE[i].operand.size());
        i += 1;
    }
};

/// Every instruction, ordered by opcode byte.
pub static COMMANDS: [Command; 28] = TABLE;

/// Find a command by mnemonic, ignoring ASCII case.
pub fn lookup_by_mnemonic(name: &str) -> Option<&'static Command> {
    COMMANDS
        .iter()
        .find(|cmd| cmd.mnemonic.eq_ignore_ascii_case(name))
}

/// Find a command by its opcode byte.
pub fn lookup_by_opcode(byte: u8) -> Option<&'static Command> {
    COMMANDS.get(byte as usize)
}
