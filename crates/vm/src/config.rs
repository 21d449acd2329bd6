//! Machine configuration.

/// Decimal places used when OUT writes a value.
pub const DEFAULT_PRECISION: usize = 10;

/// Runtime options for a [`Machine`](crate::Machine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Decimal places for OUT.
    pub precision: usize,
    /// Write each instruction to the output before executing it.
    pub trace: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            trace: false,
        }
    }
}
