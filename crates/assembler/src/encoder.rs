//! Pass 2: encode instructions with resolved jump targets.

use crate::error::AsmError;
use crate::labels::LabelTable;
use crate::lexer::Token;
use crate::parser::{expect_immediate, expect_register, Statement, Statements};
use stackvm_common::{Command, Instruction, Operand, OperandKind, Program};

/// Walk the tokens again and emit the program body.
pub fn encode(tokens: &[Token], labels: &LabelTable) -> Result<Program, AsmError> {
    let mut body = Vec::with_capacity(labels.program_len());

    for statement in Statements::new(tokens) {
        match statement? {
            Statement::Label { name, .. } => {
                debug_assert_eq!(labels.get(name), Some(body.len()));
            }
            Statement::Instruction {
                command,
                operand,
                line,
            } => {
                let operand = parse_operand(command, operand, line, labels)?;
                Instruction { command, operand }.encode_into(&mut body);
            }
        }
    }

    debug_assert_eq!(body.len(), labels.program_len());
    Ok(Program::new(body))
}

fn parse_operand(
    command: &'static Command,
    token: Option<&Token>,
    line: usize,
    labels: &LabelTable,
) -> Result<Operand, AsmError> {
    let token = match (command.operand, token) {
        (OperandKind::None, _) => return Ok(Operand::None),
        (_, Some(token)) => token,
        (_, None) => {
            return Err(AsmError::MissingOperand {
                line,
                mnemonic: command.mnemonic,
            })
        }
    };

    match command.operand {
        OperandKind::None => Ok(Operand::None),
        OperandKind::Register => expect_register(token).map(Operand::Register),
        OperandKind::Immediate => expect_immediate(token).map(Operand::Immediate),
        OperandKind::JumpTarget => labels
            .get(&token.text)
            .map(Operand::Target)
            .ok_or_else(|| AsmError::UnresolvedLabel {
                line: token.line,
                label: token.text.clone(),
            }),
    }
}
