//! Main execution loop and the operation table.

use std::io::{BufRead, Write};

use stackvm_common::{DecodeError, Instruction, Opcode, Operand};

use crate::error::{NumericFault, RuntimeError};
use crate::flags::FpFlags;
use crate::machine::{Machine, MachineState};

/// What the loop does after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance past the instruction.
    Next,
    /// Set the program counter.
    Jump(usize),
    /// Stop successfully.
    Halt,
}

/// An entry of the operation table.
pub type Handler<R, W> = fn(&mut Machine<R, W>, Operand) -> Result<Flow, RuntimeError>;

/// Comparison used by a conditional jump.
type Compare = fn(f64, f64) -> bool;

impl<R: BufRead, W: Write> Machine<R, W> {
    /// Look up the handler implementing `opcode`.
    pub fn handler(opcode: Opcode) -> Handler<R, W> {
        match opcode {
            Opcode::Halt => |_, _| Ok(Flow::Halt),

            Opcode::Push => Self::op_push,
            Opcode::PushR => Self::op_push_register,
            Opcode::PopR => Self::op_pop_register,
            Opcode::Pop => Self::op_pop,
            Opcode::Dup => Self::op_dup,
            Opcode::Swap => Self::op_swap,

            Opcode::Add => |m, _| m.binary(|_, a, b| a + b),
            Opcode::Sub => |m, _| m.binary(|_, a, b| a - b),
            Opcode::Mul => |m, _| m.binary(|flags, a, b| flags.mul(a, b)),
            Opcode::Div => |m, _| m.binary(|flags, a, b| flags.div(a, b)),
            Opcode::Pow => |m, _| m.binary(|flags, a, b| flags.pow(a, b)),
            Opcode::Neg => |m, _| m.unary(|a| -a),
            Opcode::Abs => |m, _| m.unary(f64::abs),
            Opcode::Sqrt => |m, _| m.unary(f64::sqrt),
            Opcode::Sin => |m, _| m.unary(f64::sin),
            Opcode::Cos => |m, _| m.unary(f64::cos),

            Opcode::In => Self::op_in,
            Opcode::Out => Self::op_out,

            Opcode::Jmp => |_, operand| Ok(Flow::Jump(target(operand))),
            Opcode::Je => |m, operand| m.jump_if(operand, |a, b| a == b),
            Opcode::Jne => |m, operand| m.jump_if(operand, |a, b| a != b),
            Opcode::Ja => |m, operand| m.jump_if(operand, |a, b| a > b),
            Opcode::Jae => |m, operand| m.jump_if(operand, |a, b| a >= b),
            Opcode::Jb => |m, operand| m.jump_if(operand, |a, b| a < b),
            Opcode::Jbe => |m, operand| m.jump_if(operand, |a, b| a <= b),
            Opcode::Call => Self::op_call,
            Opcode::Ret => Self::op_ret,
        }
    }

    /// Run the loaded program until HALT or error.
    ///
    /// Any failure writes an `Error:` line and the full dump to the machine
    /// output before it is returned.
    pub fn execute(&mut self) -> Result<(), RuntimeError> {
        if self.state != MachineState::Loaded {
            return Err(RuntimeError::NotLoaded);
        }
        self.state = MachineState::Running;

        match self.run_loop() {
            Ok(()) => {
                self.state = MachineState::Halted;
                // Diagnostics are best effort; the program itself succeeded.
                let _ = self.output.flush();
                Ok(())
            }
            Err(err) => {
                self.state = MachineState::Faulted;
                let _ = writeln!(self.output, "Error: {err}");
                let _ = self.dump();
                Err(err)
            }
        }
    }

    fn run_loop(&mut self) -> Result<(), RuntimeError> {
        while self.pc < self.program.len() {
            let instr = self.fetch()?;
            if self.config.trace {
                self.trace(&instr)?;
            }

            self.flags.clear();
            let flow = Self::handler(instr.command.opcode)(self, instr.operand)?;
            if let Some(fault) = self.flags.classify() {
                return Err(RuntimeError::Numeric {
                    fault,
                    at: self.pc,
                });
            }

            match flow {
                Flow::Next => self.pc += instr.width(),
                Flow::Jump(target) => self.pc = target,
                Flow::Halt => return Ok(()),
            }
        }
        Err(RuntimeError::NoHalt { at: self.pc })
    }

    fn fetch(&self) -> Result<Instruction, RuntimeError> {
        Instruction::decode(&self.program, self.pc).map_err(|e| match e {
            DecodeError::UnknownOpcode { opcode, at } => RuntimeError::UnknownOpcode { opcode, at },
            DecodeError::Truncated { mnemonic, at } => {
                RuntimeError::TruncatedInstruction { mnemonic, at }
            }
            DecodeError::OutOfRange { at } => RuntimeError::NoHalt { at },
            DecodeError::NonFiniteImmediate { at } => RuntimeError::Numeric {
                fault: NumericFault::InvalidOperation,
                at,
            },
        })
    }

    fn trace(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        writeln!(
            self.output,
            "{:08x}: {instr}  [depth {}]",
            self.pc,
            self.operands.len()
        )
        .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, e: std::io::Error) -> RuntimeError {
        RuntimeError::Io {
            message: e.to_string(),
            at: self.pc,
        }
    }

    // ---- Data movement ----

    /// Push the immediate as stored. Only NaN and infinities are refused;
    /// subnormal literals go through unchanged.
    fn op_push(&mut self, operand: Operand) -> Result<Flow, RuntimeError> {
        let value = immediate(operand);
        if value.is_finite() {
            self.push(value)?;
        } else {
            self.flags.raise(NumericFault::InvalidOperation);
        }
        Ok(Flow::Next)
    }

    fn op_push_register(&mut self, operand: Operand) -> Result<Flow, RuntimeError> {
        let value = self.registers[register(operand)];
        self.push(value)?;
        Ok(Flow::Next)
    }

    fn op_pop_register(&mut self, operand: Operand) -> Result<Flow, RuntimeError> {
        let value = self.pop()?;
        self.registers[register(operand)] = value;
        Ok(Flow::Next)
    }

    fn op_pop(&mut self, _: Operand) -> Result<Flow, RuntimeError> {
        self.pop()?;
        Ok(Flow::Next)
    }

    fn op_dup(&mut self, _: Operand) -> Result<Flow, RuntimeError> {
        let value = self.pop()?;
        self.push(value)?;
        self.push(value)?;
        Ok(Flow::Next)
    }

    fn op_swap(&mut self, _: Operand) -> Result<Flow, RuntimeError> {
        let (a, b) = self.pop_pair()?;
        self.push(b)?;
        self.push(a)?;
        Ok(Flow::Next)
    }

    // ---- Arithmetic ----

    /// Pop `b` then `a`, push `op(a, b)` unless it raised a fault.
    fn binary(
        &mut self,
        op: fn(&mut FpFlags, f64, f64) -> f64,
    ) -> Result<Flow, RuntimeError> {
        let (a, b) = self.pop_pair()?;
        let r = op(&mut self.flags, a, b);
        self.flags.observe(r);
        if self.flags.is_clear() {
            self.push(r)?;
        }
        Ok(Flow::Next)
    }

    /// Pop `a`, push `op(a)` unless it raised a fault.
    fn unary(&mut self, op: fn(f64) -> f64) -> Result<Flow, RuntimeError> {
        let a = self.pop()?;
        let r = self.flags.observe(op(a));
        if self.flags.is_clear() {
            self.push(r)?;
        }
        Ok(Flow::Next)
    }

    // ---- I/O ----

    fn op_in(&mut self, _: Operand) -> Result<Flow, RuntimeError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| self.io_error(e))?;
        if read == 0 {
            return Err(RuntimeError::InputExhausted { at: self.pc });
        }
        let text = line.trim();
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.push(value)?;
                Ok(Flow::Next)
            }
            _ => Err(RuntimeError::InvalidInput {
                text: text.to_string(),
                at: self.pc,
            }),
        }
    }

    fn op_out(&mut self, _: Operand) -> Result<Flow, RuntimeError> {
        let value = self.pop()?;
        let precision = self.config.precision;
        writeln!(self.output, "{value:.precision$}").map_err(|e| self.io_error(e))?;
        Ok(Flow::Next)
    }

    // ---- Control flow ----

    fn jump_if(&mut self, operand: Operand, cmp: Compare) -> Result<Flow, RuntimeError> {
        let (a, b) = self.pop_pair()?;
        if cmp(a, b) {
            Ok(Flow::Jump(target(operand)))
        } else {
            Ok(Flow::Next)
        }
    }

    fn op_call(&mut self, operand: Operand) -> Result<Flow, RuntimeError> {
        let width = Opcode::Call.command().width;
        self.push_return(self.pc + width)?;
        Ok(Flow::Jump(target(operand)))
    }

    fn op_ret(&mut self, _: Operand) -> Result<Flow, RuntimeError> {
        let offset = self.pop_return()?;
        Ok(Flow::Jump(offset))
    }
}

// Instruction::decode pairs every opcode with its operand kind, so the
// mismatched arms below cannot be reached from a fetched instruction.

/// Register index of a decoded register operand.
fn register(operand: Operand) -> usize {
    match operand {
        Operand::Register(r) => r as usize,
        other => unreachable!("{other:?} is not a register operand"),
    }
}

/// Offset of a decoded jump operand.
fn target(operand: Operand) -> usize {
    match operand {
        Operand::Target(t) => t,
        other => unreachable!("{other:?} is not a jump operand"),
    }
}

/// Value of a decoded immediate operand.
fn immediate(operand: Operand) -> f64 {
    match operand {
        Operand::Immediate(v) => v,
        other => unreachable!("{other:?} is not an immediate operand"),
    }
}
