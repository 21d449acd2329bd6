//! Disassembler: program body → assembly text.
//!
//! Output is flat text, one statement per line, no comments. Every jump
//! target gets a generated `L<offset>:` label so the text reassembles to
//! the same bytes.

use std::collections::BTreeSet;
use std::fmt::Write;

use stackvm_common::{DecodeError, Instruction, Operand, Program};

/// Prefix of generated label names.
const LABEL_PREFIX: char = 'L';

/// Disassemble a program into assembly text.
///
/// Fails if the body does not decode, if an immediate is NaN or infinite,
/// or if a jump target falls inside an instruction or beyond the end, where
/// no label can be placed.
pub fn disassemble(program: &Program) -> Result<String, DecodeError> {
    let instrs: Vec<(usize, Instruction)> = program.instructions().collect::<Result<_, _>>()?;

    if let Some((at, _)) = instrs
        .iter()
        .find(|(_, instr)| matches!(instr.operand, Operand::Immediate(v) if !v.is_finite()))
    {
        return Err(DecodeError::NonFiniteImmediate { at: *at });
    }

    let targets: BTreeSet<usize> = instrs
        .iter()
        .filter_map(|(_, instr)| match instr.operand {
            Operand::Target(t) => Some(t),
            _ => None,
        })
        .collect();

    let boundaries: BTreeSet<usize> = instrs
        .iter()
        .map(|(offset, _)| *offset)
        .chain(std::iter::once(program.len()))
        .collect();
    if let Some(&bad) = targets.difference(&boundaries).next() {
        return Err(DecodeError::OutOfRange { at: bad });
    }

    let mut text = String::new();
    for (offset, instr) in &instrs {
        write_label(&mut text, &targets, *offset);
        match instr.operand {
            Operand::Target(t) => {
                let _ = writeln!(text, "{} {LABEL_PREFIX}{t}", instr.command.mnemonic);
            }
            _ => {
                let _ = writeln!(text, "{instr}");
            }
        }
    }
    write_label(&mut text, &targets, program.len());

    Ok(text)
}

fn write_label(text: &mut String, targets: &BTreeSet<usize>, offset: usize) {
    if targets.contains(&offset) {
        let _ = writeln!(text, "{LABEL_PREFIX}{offset}:");
    }
}
