//! Binary container header shared by the assembler and the VM.
//!
//! Every container starts with a 4-byte header followed directly by the
//! instruction stream:
//!
//! ```text
//! Byte 0: 'V'
//! Byte 1: 'M'
//! Byte 2: major version
//! Byte 3: minor version
//! ```
//!
//! As a single value the header is `sig0 << 24 | sig1 << 16 | major << 8 |
//! minor`, written big-endian. Decoding reassembles that value from the
//! individual bytes, never from a native-endian load.

use crate::error::FormatError;

/// Container signature bytes.
pub const SIGNATURE: [u8; 2] = *b"VM";
/// Format major version produced and accepted by this build.
pub const VERSION_MAJOR: u8 = 1;
/// Format minor version produced and accepted by this build.
pub const VERSION_MINOR: u8 = 0;
/// Header width in bytes.
pub const HEADER_LEN: usize = 4;

/// Decoded container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub signature: [u8; 2],
    pub major: u8,
    pub minor: u8,
}

impl Header {
    /// The header this build writes and expects.
    pub const fn current() -> Self {
        Self {
            signature: SIGNATURE,
            major: VERSION_MAJOR,
            minor: VERSION_MINOR,
        }
    }

    /// Pack into the canonical 32-bit value.
    pub fn encode(&self) -> u32 {
        (u32::from(self.signature[0]) << 24)
            | (u32::from(self.signature[1]) << 16)
            | (u32::from(self.major) << 8)
            | u32::from(self.minor)
    }

    /// Header bytes in file order.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        self.encode().to_be_bytes()
    }

    /// Unpack a header from the first four bytes of `bytes`.
    ///
    /// Only fails when fewer than [`HEADER_LEN`] bytes are supplied; use
    /// [`Header::validate`] to check compatibility.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_LEN {
            return Err(FormatError::Truncated { len: bytes.len() });
        }
        let value = (u32::from(bytes[0]) << 24)
            | (u32::from(bytes[1]) << 16)
            | (u32::from(bytes[2]) << 8)
            | u32::from(bytes[3]);

        Ok(Self {
            signature: [(value >> 24) as u8, (value >> 16) as u8],
            major: (value >> 8) as u8,
            minor: value as u8,
        })
    }

    /// Check this header against the running build.
    ///
    /// A foreign signature is rejected outright. A matching signature with
    /// any other version is rejected as a version mismatch naming both
    /// versions; no compatibility across versions is attempted.
    pub fn validate(&self) -> Result<(), FormatError> {
        let current = Self::current();
        if self.signature != current.signature {
            return Err(FormatError::SignatureMismatch {
                found: self.signature,
            });
        }
        if self.major != current.major || self.minor != current.minor {
            return Err(FormatError::VersionMismatch {
                program_major: self.major,
                program_minor: self.minor,
                machine_major: current.major,
                machine_minor: current.minor,
            });
        }
        Ok(())
    }
}

/// Validate the header of a container and return the program body.
pub fn split(bytes: &[u8]) -> Result<&[u8], FormatError> {
    Header::decode(bytes)?.validate()?;
    Ok(&bytes[HEADER_LEN..])
}
