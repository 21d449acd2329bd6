//! Parser for stackvm assembly tokens → statements and operands.
//!
//! Both assembler passes walk the token stream through [`Statements`], so
//! they agree on which token is a label, a mnemonic, or an operand.

use crate::error::AsmError;
use crate::lexer::Token;
use stackvm_common::{lookup_by_mnemonic, Command, OperandKind};

/// Register operands start with this character.
pub(crate) const REGISTER_PREFIX: char = 'R';

/// One label definition or one instruction, with its operand token unparsed.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Statement<'a> {
    Label {
        name: &'a str,
        line: usize,
    },
    Instruction {
        command: &'static Command,
        operand: Option<&'a Token>,
        line: usize,
    },
}

/// Iterator over the statements of a token stream.
///
/// Yields the first error and then stops.
pub(crate) struct Statements<'a> {
    tokens: &'a [Token],
    pos: usize,
    failed: bool,
}

impl<'a> Statements<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            failed: false,
        }
    }

    fn statement(&mut self) -> Result<Statement<'a>, AsmError> {
        let tokens = self.tokens;
        let token = &tokens[self.pos];
        self.pos += 1;

        if let Some(name) = token.label_name() {
            return Ok(Statement::Label {
                name,
                line: token.line,
            });
        }

        let command = lookup_by_mnemonic(&token.text).ok_or_else(|| AsmError::UnknownMnemonic {
            line: token.line,
            token: token.text.clone(),
        })?;

        let operand = match command.operand {
            OperandKind::None => None,
            _ => {
                let operand = tokens.get(self.pos).ok_or(AsmError::MissingOperand {
                    line: token.line,
                    mnemonic: command.mnemonic,
                })?;
                self.pos += 1;
                Some(operand)
            }
        };

        Ok(Statement::Instruction {
            command,
            operand,
            line: token.line,
        })
    }
}

impl<'a> Iterator for Statements<'a> {
    type Item = Result<Statement<'a>, AsmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.tokens.len() {
            return None;
        }
        let result = self.statement();
        self.failed = result.is_err();
        Some(result)
    }
}

/// Parse a register operand: `R` followed by a number in `0..=255`.
pub(crate) fn expect_register(token: &Token) -> Result<u8, AsmError> {
    let invalid = || AsmError::InvalidRegister {
        line: token.line,
        token: token.text.clone(),
    };
    let out_of_range = || AsmError::RegisterOutOfRange {
        line: token.line,
        token: token.text.clone(),
    };

    let digits = token.text.strip_prefix(REGISTER_PREFIX).ok_or_else(invalid)?;
    let number: i64 = match digits.parse() {
        Ok(n) => n,
        Err(_) if is_integer_literal(digits) => return Err(out_of_range()),
        Err(_) => return Err(invalid()),
    };
    u8::try_from(number).map_err(|_| out_of_range())
}

/// Parse an immediate operand: a finite decimal floating-point literal.
pub(crate) fn expect_immediate(token: &Token) -> Result<f64, AsmError> {
    let invalid = || AsmError::InvalidImmediate {
        line: token.line,
        token: token.text.clone(),
    };

    let value: f64 = token.text.parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else if value.is_nan() || token.text.to_ascii_lowercase().contains("inf") {
        Err(invalid())
    } else {
        Err(AsmError::ImmediateOutOfRange {
            line: token.line,
            token: token.text.clone(),
        })
    }
}

/// Optional sign followed by at least one ASCII digit.
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
