//! VM state management: program, registers, stacks, load and dump.

use std::io::{self, BufRead, Write};

use stackvm_common::{container, lookup_by_opcode, FormatError};

use crate::config::MachineConfig;
use crate::error::{RuntimeError, StackKind};
use crate::flags::FpFlags;
use crate::stack::Stack;

/// Size of the register file.
pub const NUM_REGISTERS: usize = 256;

/// Lifecycle of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    /// Nothing loaded, or the last load failed.
    Unloaded,
    /// A program is loaded and ready to execute.
    Loaded,
    /// Inside `execute`.
    Running,
    /// Stopped on HALT.
    Halted,
    /// Stopped on a runtime error.
    Faulted,
}

/// The stackvm virtual machine.
///
/// `R` feeds the IN instruction; `W` receives OUT values, traces, error
/// messages and dumps.
pub struct Machine<R, W> {
    /// Program body, header stripped.
    pub(crate) program: Vec<u8>,
    /// Byte offset of the next instruction.
    pub(crate) pc: usize,
    /// Operand stack.
    pub(crate) operands: Stack<f64>,
    /// Return offsets pushed by CALL.
    pub(crate) calls: Stack<usize>,
    pub(crate) registers: [f64; NUM_REGISTERS],
    pub(crate) flags: FpFlags,
    pub(crate) state: MachineState,
    pub(crate) config: MachineConfig,
    pub(crate) input: R,
    pub(crate) output: W,
}

impl Machine<io::StdinLock<'static>, io::Stdout> {
    /// A machine reading stdin and writing stdout.
    pub fn stdio(config: MachineConfig) -> Self {
        Self::with_config(io::stdin().lock(), io::stdout(), config)
    }
}

impl<R: BufRead, W: Write> Machine<R, W> {
    /// Create an unloaded machine with default configuration.
    pub fn new(input: R, output: W) -> Self {
        Self::with_config(input, output, MachineConfig::default())
    }

    /// Create an unloaded machine.
    pub fn with_config(input: R, output: W, config: MachineConfig) -> Self {
        Self {
            program: Vec::new(),
            pc: 0,
            operands: Stack::new(),
            calls: Stack::new(),
            registers: [0.0; NUM_REGISTERS],
            flags: FpFlags::default(),
            state: MachineState::Unloaded,
            config,
            input,
            output,
        }
    }

    /// Load a container, replacing any previous program.
    ///
    /// On success the registers are zeroed, both stacks emptied and the
    /// program counter reset. On failure the machine is left unloaded.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        self.program.clear();
        self.state = MachineState::Unloaded;

        let body = container::split(bytes)?;

        self.program.extend_from_slice(body);
        self.registers = [0.0; NUM_REGISTERS];
        self.operands.reset();
        self.calls.reset();
        self.flags.clear();
        self.pc = 0;
        self.state = MachineState::Loaded;
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MachineState {
        self.state
    }

    /// Program counter (byte offset into the body).
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Loaded program body.
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    pub fn operand_stack(&self) -> &Stack<f64> {
        &self.operands
    }

    pub fn call_stack(&self) -> &Stack<usize> {
        &self.calls
    }

    pub fn registers(&self) -> &[f64; NUM_REGISTERS] {
        &self.registers
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The output sink.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consume the machine, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write the diagnostic dump to the machine output.
    pub fn dump(&mut self) -> io::Result<()> {
        let mut out = Vec::new();
        self.write_dump(&mut out)?;
        self.output.write_all(&out)?;
        self.output.flush()
    }

    /// Write the diagnostic dump to `w`.
    pub fn write_dump(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "MACHINE DUMP STATE")?;
        let current = match self.program.get(self.pc) {
            Some(&byte) => lookup_by_opcode(byte).map_or("unknown", |cmd| cmd.mnemonic),
            None => "out of program range",
        };
        writeln!(
            w,
            "Program size: {}, current offset: {} ({current})",
            self.program.len(),
            self.pc
        )?;
        writeln!(w, "OPERAND STACK")?;
        self.operands.dump(w)?;
        writeln!(w, "CALL STACK")?;
        self.calls.dump(w)?;
        writeln!(w, "Registers:")?;
        for (i, value) in self.registers.iter().enumerate() {
            writeln!(w, "R{i}: {value}")?;
        }
        Ok(())
    }

    // ---- Stack access with fault mapping ----

    pub(crate) fn push(&mut self, value: f64) -> Result<(), RuntimeError> {
        self.operands
            .push(value)
            .map(drop)
            .map_err(|fault| RuntimeError::Stack {
                stack: StackKind::Operand,
                fault,
                at: self.pc,
            })
    }

    pub(crate) fn pop(&mut self) -> Result<f64, RuntimeError> {
        self.operands.pop().map_err(|fault| RuntimeError::Stack {
            stack: StackKind::Operand,
            fault,
            at: self.pc,
        })
    }

    /// Pop `b` then `a`, returning `(a, b)`.
    pub(crate) fn pop_pair(&mut self) -> Result<(f64, f64), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        Ok((a, b))
    }

    pub(crate) fn push_return(&mut self, offset: usize) -> Result<(), RuntimeError> {
        self.calls
            .push(offset)
            .map(drop)
            .map_err(|fault| RuntimeError::Stack {
                stack: StackKind::Call,
                fault,
                at: self.pc,
            })
    }

    pub(crate) fn pop_return(&mut self) -> Result<usize, RuntimeError> {
        self.calls.pop().map_err(|fault| RuntimeError::Stack {
            stack: StackKind::Call,
            fault,
            at: self.pc,
        })
    }
}
