//! Errors for container validation and instruction decoding.

use thiserror::Error;

/// Errors raised while validating a binary container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Fewer bytes than the fixed header width.
    #[error("program has an incorrect format: {len} byte(s), header needs 4")]
    Truncated { len: usize },

    /// The first two header bytes are not the container signature.
    #[error("signature mismatch: found {:#04x} {:#04x}, expected \"VM\"", .found[0], .found[1])]
    SignatureMismatch { found: [u8; 2] },

    /// Signature matches but the version differs from this build.
    #[error(
        "incorrect program version: program {program_major}.{program_minor}, \
         processor {machine_major}.{machine_minor}"
    )]
    VersionMismatch {
        program_major: u8,
        program_minor: u8,
        machine_major: u8,
        machine_minor: u8,
    },
}

/// Errors raised while decoding instruction records from a program body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Opcode byte has no command table entry.
    #[error("unknown opcode {opcode:#04x} at offset {at}")]
    UnknownOpcode { opcode: u8, at: usize },

    /// Operand bytes run past the end of the program body.
    #[error("{mnemonic} at offset {at} is truncated")]
    Truncated { mnemonic: &'static str, at: usize },

    /// Offset is at or past the end of the program body.
    #[error("offset {at} is outside the program body")]
    OutOfRange { at: usize },

    /// Immediate operand is NaN or infinite, which no source text can express.
    #[error("non-finite immediate at offset {at}")]
    NonFiniteImmediate { at: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_truncated() {
        assert_eq!(
            FormatError::Truncated { len: 2 }.to_string(),
            "program has an incorrect format: 2 byte(s), header needs 4"
        );
    }

    #[test]
    fn display_signature_mismatch() {
        assert_eq!(
            FormatError::SignatureMismatch { found: *b"XY" }.to_string(),
            "signature mismatch: found 0x58 0x59, expected \"VM\""
        );
    }

    #[test]
    fn display_version_mismatch_names_both_versions() {
        let e = FormatError::VersionMismatch {
            program_major: 2,
            program_minor: 3,
            machine_major: 1,
            machine_minor: 0,
        };
        assert_eq!(
            e.to_string(),
            "incorrect program version: program 2.3, processor 1.0"
        );
    }

    #[test]
    fn display_unknown_opcode() {
        assert_eq!(
            DecodeError::UnknownOpcode { opcode: 0xEE, at: 9 }.to_string(),
            "unknown opcode 0xee at offset 9"
        );
    }
}
