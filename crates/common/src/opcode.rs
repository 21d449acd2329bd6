//! Opcode definitions for the stackvm instruction set.
//!
//! Opcode bytes are dense from `0x00`, so the byte value doubles as the
//! index into [`COMMANDS`](crate::command::COMMANDS).

use crate::command::{Command, COMMANDS};

/// Identifies the operation to perform.
///
/// Binary operators pop `b` (top of stack) and then `a`, and push `a op b`.
/// Conditional jumps pop the same way and jump when `a cmp b` holds.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // VM control
    /// Stop execution successfully.
    Halt = 0x00,

    // Data movement
    /// Push an immediate double.
    Push = 0x01,
    /// Push the value of a register.
    PushR = 0x02,
    /// Pop the top of stack into a register.
    PopR = 0x03,
    /// Discard the top of stack.
    Pop = 0x04,
    /// Duplicate the top of stack.
    Dup = 0x05,
    /// Swap the two topmost values.
    Swap = 0x06,

    // Arithmetic
    /// Pop two values, push `a + b`.
    Add = 0x07,
    /// Pop two values, push `a - b`.
    Sub = 0x08,
    /// Pop two values, push `a * b`.
    Mul = 0x09,
    /// Pop two values, push `a / b`. Zero divisor is a numeric fault.
    Div = 0x0A,
    /// Pop two values, push `a` raised to `b`.
    Pow = 0x0B,
    /// Pop one value, push its negation.
    Neg = 0x0C,
    /// Pop one value, push its absolute value.
    Abs = 0x0D,
    /// Pop one value, push its square root.
    Sqrt = 0x0E,
    /// Pop one value, push its sine.
    Sin = 0x0F,
    /// Pop one value, push its cosine.
    Cos = 0x10,

    // I/O
    /// Read one number from the machine input and push it.
    In = 0x11,
    /// Pop one value and write it to the machine output.
    Out = 0x12,

    // Control flow
    /// Unconditional jump.
    Jmp = 0x13,
    /// Jump if `a == b`.
    Je = 0x14,
    /// Jump if `a != b`.
    Jne = 0x15,
    /// Jump if `a > b`.
    Ja = 0x16,
    /// Jump if `a >= b`.
    Jae = 0x17,
    /// Jump if `a < b`.
    Jb = 0x18,
    /// Jump if `a <= b`.
    Jbe = 0x19,
    /// Push the return offset on the call stack and jump.
    Call = 0x1A,
    /// Pop a return offset from the call stack and jump to it.
    Ret = 0x1B,
}

/// All opcodes, in byte order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 28] = [
    Opcode::Halt,
    Opcode::Push,
    Opcode::PushR,
    Opcode::PopR,
    Opcode::Pop,
    Opcode::Dup,
    Opcode::Swap,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Pow,
    Opcode::Neg,
    Opcode::Abs,
    Opcode::Sqrt,
    Opcode::Sin,
    Opcode::Cos,
    Opcode::In,
    Opcode::Out,
    Opcode::Jmp,
    Opcode::Je,
    Opcode::Jne,
    Opcode::Ja,
    Opcode::Jae,
    Opcode::Jb,
    Opcode::Jbe,
    Opcode::Call,
    Opcode::Ret,
];

impl Opcode {
    /// The command table entry describing this opcode.
    pub fn command(self) -> &'static Command {
        &COMMANDS[self as usize]
    }

    /// The assembly mnemonic for this opcode.
    pub fn mnemonic(self) -> &'static str {
        self.command().mnemonic
    }

    /// Decode an opcode byte. Returns `None` for bytes with no table entry.
    pub fn from_byte(byte: u8) -> Option<Self> {
        crate::command::lookup_by_opcode(byte).map(|cmd| cmd.opcode)
    }
}
