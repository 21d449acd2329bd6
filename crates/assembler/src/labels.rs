//! Pass 1: assign a byte offset to every label.

use std::collections::BTreeMap;

use crate::error::AsmError;
use crate::lexer::Token;
use crate::parser::{Statement, Statements};

/// Label name → byte offset of the next instruction after its definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    offsets: BTreeMap<String, usize>,
    program_len: usize,
}

impl LabelTable {
    /// Offset bound to `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.offsets.get(name).copied()
    }

    /// Number of labels defined.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Labels in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.offsets.iter().map(|(name, &offset)| (name.as_str(), offset))
    }

    /// Total encoded size of the instructions walked.
    pub fn program_len(&self) -> usize {
        self.program_len
    }
}

/// Walk the tokens once, summing instruction widths and binding labels.
///
/// Validates mnemonics and operand presence but not operand syntax.
pub fn resolve_labels(tokens: &[Token]) -> Result<LabelTable, AsmError> {
    let mut table = LabelTable::default();
    let mut offset = 0;

    for statement in Statements::new(tokens) {
        match statement? {
            Statement::Label { name, line } => {
                if table.offsets.contains_key(name) {
                    return Err(AsmError::DuplicateLabel {
                        line,
                        label: name.to_string(),
                    });
                }
                table.offsets.insert(name.to_string(), offset);
            }
            Statement::Instruction { command, .. } => offset += command.width,
        }
    }

    table.program_len = offset;
    Ok(table)
}
