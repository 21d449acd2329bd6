//! stackvm virtual machine — loads and executes binary containers.
//!
//! The VM is a stack-based machine with:
//! - An operand stack of doubles
//! - A call-return stack of byte offsets
//! - 256 double registers
//!
//! Floating-point faults are detected per instruction from the operation's
//! results (see [`flags`]) and abort execution with a full state dump.
//!
//! # Usage
//!
//! ```
//! use stackvm_common::{Instruction, Opcode, Operand, Program};
//! use stackvm_vm::run;
//!
//! let program = Program::from_instructions(&[
//!     Instruction::new(Opcode::Push, Operand::Immediate(3.0)).unwrap(),
//!     Instruction::new(Opcode::Push, Operand::Immediate(4.0)).unwrap(),
//!     Instruction::new(Opcode::Add, Operand::None).unwrap(),
//!     Instruction::new(Opcode::Out, Operand::None).unwrap(),
//!     Instruction::new(Opcode::Halt, Operand::None).unwrap(),
//! ]);
//!
//! let output = run(&program.encode(), "").unwrap();
//! assert_eq!(output, "7.0000000000\n");
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod flags;
pub mod machine;
pub mod stack;

pub use config::MachineConfig;
pub use error::{NumericFault, RuntimeError, StackError, StackKind};
pub use execute::{Flow, Handler};
pub use machine::{Machine, MachineState, NUM_REGISTERS};
pub use stack::Stack;

/// Rejection of a container by [`Machine::load`].
pub use stackvm_common::FormatError as LoadError;

use std::io::Cursor;
use thiserror::Error;

/// Failure of [`run`]: either the container or the execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Format(#[from] LoadError),

    /// Execution failed; `output` holds everything written, dump included.
    #[error("{error}")]
    Runtime { error: RuntimeError, output: String },
}

/// Load and execute a container with in-memory input, returning the output.
///
/// # Errors
///
/// Returns [`RunError::Format`] if the container is rejected and
/// [`RunError::Runtime`] if execution fails.
pub fn run(container: &[u8], input: &str) -> Result<String, RunError> {
    let mut vm = Machine::new(Cursor::new(input.as_bytes()), Vec::new());
    vm.load(container)?;
    let result = vm.execute();
    let output = String::from_utf8_lossy(&vm.into_output()).into_owned();
    match result {
        Ok(()) => Ok(output),
        Err(error) => Err(RunError::Runtime { error, output }),
    }
}
