//! Auto-resizing array-backed stack used for the operand and call stacks.
//!
//! The backing buffer is always fully initialised: its length *is* the
//! capacity, and `len` counts the occupied prefix. Popped slots keep their
//! last value so the dump can show the unused tail as it is.
//!
//! Capacity starts at [`INITIAL_CAPACITY`], doubles when a push finds the
//! buffer full, and shrinks by [`SHRINK_FACTOR`] when a pop finds it at
//! most half occupied. The two factors differ so that alternating push/pop
//! at a boundary does not resize every time.

use std::fmt::Display;
use std::io::{self, Write};

use crate::error::StackError;

/// Capacity of a fresh stack.
pub const INITIAL_CAPACITY: usize = 16;
/// Hard ceiling on capacity. A push beyond it is a fatal fault.
pub const MAX_CAPACITY: usize = 65536;
/// Growth multiplier applied when a push finds the stack full.
pub const GROW_FACTOR: f64 = 2.0;
/// Shrink multiplier applied when a pop finds the stack half empty.
pub const SHRINK_FACTOR: f64 = 0.75;

/// A growable stack with explicit capacity tracking.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    data: Vec<T>,
    len: usize,
    fault: Option<StackError>,
}

impl<T: Copy + Default> Stack<T> {
    /// Create an empty stack with [`INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self {
            data: vec![T::default(); INITIAL_CAPACITY],
            len: 0,
            fault: None,
        }
    }

    /// Push a value, growing first if full. Returns the pushed value.
    pub fn push(&mut self, value: T) -> Result<T, StackError> {
        self.check()?;
        if self.len == self.data.len() {
            self.grow()?;
        }
        self.data[self.len] = value;
        self.len += 1;
        Ok(value)
    }

    /// Pop the top value, shrinking first if at most half occupied.
    ///
    /// An empty stack records [`StackError::Underflow`] and returns it; the
    /// stack then refuses further use until [`Stack::reset`].
    pub fn pop(&mut self) -> Result<T, StackError> {
        self.check()?;
        if self.len == 0 {
            self.fault = Some(StackError::Underflow);
            return Err(StackError::Underflow);
        }
        if self.len <= self.capacity() / 2 && self.capacity() > INITIAL_CAPACITY {
            self.shrink();
        }
        self.len -= 1;
        Ok(self.data[self.len])
    }

    /// Top value without removing it.
    pub fn peek(&self) -> Option<T> {
        self.len.checked_sub(1).map(|top| self.data[top])
    }

    /// The recorded fault, if any.
    pub fn is_failed(&self) -> Option<StackError> {
        self.fault
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the backing buffer.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Occupied slots, bottom first.
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    /// Drop all values and any recorded fault; back to initial capacity.
    pub fn reset(&mut self) {
        self.data.clear();
        self.data.resize(INITIAL_CAPACITY, T::default());
        self.len = 0;
        self.fault = None;
    }

    fn check(&self) -> Result<(), StackError> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    fn grow(&mut self) -> Result<(), StackError> {
        let old = self.capacity();
        if old >= MAX_CAPACITY {
            self.fault = Some(StackError::CapacityExceeded);
            return Err(StackError::CapacityExceeded);
        }
        let new = ((old as f64 * GROW_FACTOR) as usize).min(MAX_CAPACITY);
        self.data.resize(new, T::default());
        debug_assert!(self.capacity() > old && self.capacity() <= MAX_CAPACITY);
        Ok(())
    }

    fn shrink(&mut self) {
        let new = ((self.capacity() as f64 * SHRINK_FACTOR) as usize).max(INITIAL_CAPACITY);
        self.data.truncate(new);
        debug_assert!(self.len <= self.capacity() && self.capacity() >= INITIAL_CAPACITY);
    }
}

impl<T: Copy + Default> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default + Display> Stack<T> {
    /// Write the stack state, occupied slots, `||`, then the unused tail.
    pub fn dump(&self, w: &mut impl Write) -> io::Result<()> {
        let state = match self.fault {
            Some(fault) => fault.to_string(),
            None => "no errors".to_string(),
        };
        writeln!(w, "Stack state: {state}")?;
        writeln!(
            w,
            "Stack content (capacity: {}, items: {}):",
            self.capacity(),
            self.len
        )?;
        for value in &self.data[..self.len] {
            write!(w, "{value} ")?;
        }
        write!(w, "||")?;
        for value in &self.data[self.len..] {
            write!(w, " {value}")?;
        }
        writeln!(w)
    }
}
