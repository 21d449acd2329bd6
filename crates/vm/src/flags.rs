//! Per-machine floating-point status flags.
//!
//! Operations report faults here instead of through the process-wide
//! floating-point environment. The interpreter clears the flags before each
//! operation and classifies them right after it, before the next fetch.

use crate::error::NumericFault;

/// Sticky fault flags for the operation in progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FpFlags {
    pub invalid: bool,
    pub div_by_zero: bool,
    pub overflow: bool,
    pub underflow: bool,
}

impl FpFlags {
    /// Reset all flags.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns true if no flag is raised.
    pub fn is_clear(&self) -> bool {
        self.classify().is_none()
    }

    /// Raise the flag for `fault`.
    pub fn raise(&mut self, fault: NumericFault) {
        match fault {
            NumericFault::InvalidOperation => self.invalid = true,
            NumericFault::DivideByZero => self.div_by_zero = true,
            NumericFault::Overflow => self.overflow = true,
            NumericFault::Underflow => self.underflow = true,
        }
    }

    /// Inspect a result computed from finite operands.
    pub fn observe(&mut self, result: f64) -> f64 {
        if result.is_nan() {
            self.invalid = true;
        } else if result.is_infinite() {
            self.overflow = true;
        } else if result.is_subnormal() {
            self.underflow = true;
        }
        result
    }

    /// First raised flag, in order invalid, divide-by-zero, overflow, underflow.
    pub fn classify(&self) -> Option<NumericFault> {
        if self.invalid {
            Some(NumericFault::InvalidOperation)
        } else if self.div_by_zero {
            Some(NumericFault::DivideByZero)
        } else if self.overflow {
            Some(NumericFault::Overflow)
        } else if self.underflow {
            Some(NumericFault::Underflow)
        } else {
            None
        }
    }

    /// `a * b`, flagging a nonzero product that rounded to zero.
    pub fn mul(&mut self, a: f64, b: f64) -> f64 {
        let r = self.observe(a * b);
        if r == 0.0 && a != 0.0 && b != 0.0 {
            self.underflow = true;
        }
        r
    }

    /// `a / b`. A zero divisor is divide-by-zero, or invalid for `0 / 0`.
    pub fn div(&mut self, a: f64, b: f64) -> f64 {
        if b == 0.0 {
            if a == 0.0 {
                self.invalid = true;
            } else {
                self.div_by_zero = true;
            }
            return a / b;
        }
        let r = self.observe(a / b);
        if r == 0.0 && a != 0.0 {
            self.underflow = true;
        }
        r
    }

    /// `a` raised to `b`. Zero to a negative power is divide-by-zero.
    pub fn pow(&mut self, a: f64, b: f64) -> f64 {
        if a == 0.0 && b < 0.0 {
            self.div_by_zero = true;
            return a.powf(b);
        }
        let r = self.observe(a.powf(b));
        if r == 0.0 && a != 0.0 {
            self.underflow = true;
        }
        r
    }
}
