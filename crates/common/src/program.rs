//! Program image: the encoded instruction stream behind a container header.

use crate::container::{self, Header};
use crate::error::{DecodeError, FormatError};
use crate::instruction::Instruction;

/// An assembled program body. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    body: Vec<u8>,
}

impl Program {
    /// Wrap an already-encoded instruction stream.
    pub fn new(body: Vec<u8>) -> Self {
        Self { body }
    }

    /// Encode a sequence of instructions back to back.
    pub fn from_instructions<'a>(instructions: impl IntoIterator<Item = &'a Instruction>) -> Self {
        let mut body = Vec::new();
        for instr in instructions {
            instr.encode_into(&mut body);
        }
        Self { body }
    }

    /// The encoded instruction stream, without header.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body length in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Container bytes: header followed by the body, no padding.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(container::HEADER_LEN + self.body.len());
        bytes.extend_from_slice(&Header::current().to_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }

    /// Validate a container and copy out its body.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        container::split(bytes).map(|body| Self::new(body.to_vec()))
    }

    /// Iterate over `(offset, instruction)` records in order.
    ///
    /// Stops after the first decode error, which is yielded.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            body: &self.body,
            offset: 0,
            failed: false,
        }
    }
}

/// Iterator returned by [`Program::instructions`].
pub struct Instructions<'a> {
    body: &'a [u8],
    offset: usize,
    failed: bool,
}

impl Iterator for Instructions<'_> {
    type Item = Result<(usize, Instruction), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.body.len() {
            return None;
        }
        let at = self.offset;
        match Instruction::decode(self.body, at) {
            Ok(instr) => {
                self.offset += instr.width();
                Some(Ok((at, instr)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
