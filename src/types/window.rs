//! Inclusive ranges over coerced values
//!
//! A filter request carries four bounds as text. They are coerced to numbers using
//! [coerce_str](crate::types::dvalue::coerce_str) and grouped into a [Window] of two [Range]s,
//! one for the input variable and one for the output variable.

use crate::types::dvalue::coerce_str;

/// An inclusive numeric range.
///
/// A NaN bound or value never compares as inside the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    /// Minimum value, inclusive
    pub min: f64,
    /// Maximum value, inclusive
    pub max: f64,
}

impl Range {
    /// Return a new Range object.
    pub fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }

    /// Return a Range from textual bounds.
    pub fn from_text(min: &str, max: &str) -> Self {
        Self::new(coerce_str(min), coerce_str(max))
    }

    /// Returns whether `x` lies within the range, including both ends.
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }
}

/// Input and output ranges of a filter request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    /// Range of the input variable
    pub input: Range,
    /// Range of the output variable
    pub output: Range,
}

impl Window {
    /// Return a new Window object.
    pub fn new(input: Range, output: Range) -> Self {
        Window { input, output }
    }

    /// Returns whether an (input, output) pair lies within the window.
    pub fn contains(&self, input: f64, output: f64) -> bool {
        self.input.contains(input) && self.output.contains(output)
    }
}
