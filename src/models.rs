//! Data types and associated functions and methods

use crate::types::dvalue::{self, DValue};
use crate::types::{Range, Window};

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use validator::{Validate, ValidationError};

/// Request data for the filter endpoint, taken from the path segments
///
/// `/:input_variable/:output_variable/:in_min/:in_max/:out_min/:out_max`
///
/// Bounds are kept as text. They are coerced to numbers when building the [Window], and text that
/// is not a number produces a range that matches nothing.
#[derive(Debug, Deserialize, PartialEq, Validate)]
pub struct RequestData {
    /// Name of the input (x axis) variable
    #[validate(custom = "validate_variable_name")]
    pub input_variable: String,
    /// Name of the output (y axis) variable
    #[validate(custom = "validate_variable_name")]
    pub output_variable: String,
    /// Minimum of the input variable
    pub in_min: String,
    /// Maximum of the input variable
    pub in_max: String,
    /// Minimum of the output variable
    pub out_min: String,
    /// Maximum of the output variable
    pub out_max: String,
}

impl RequestData {
    /// Returns the filter [Window] described by the request bounds.
    pub fn window(&self) -> Window {
        Window::new(
            Range::from_text(&self.in_min, &self.in_max),
            Range::from_text(&self.out_min, &self.out_max),
        )
    }
}

/// Validate a variable name
fn validate_variable_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("variable name must not be blank");
        error.add_param("name".into(), &name);
        return Err(error);
    }
    Ok(())
}

/// Query parameters for the filter endpoint
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterOptions {
    /// Whether to label each data point with the experiment it came from
    #[serde(default)]
    pub labels: bool,
}

/// A single scalar extracted from the dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// The value as it appears in the dataset
    pub value: DValue,
    /// Numeric view of the value used for range comparisons
    pub number: f64,
    /// Top-level key of the dataset the value was found under
    pub label: Option<String>,
}

impl Cell {
    /// Return a Cell object, coercing the value to a number.
    pub fn new(value: DValue, label: Option<String>) -> Self {
        let number = dvalue::coerce(&value);
        Cell {
            value,
            number,
            label,
        }
    }
}

/// All values of one variable, in dataset order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Column {
    /// Normalised name of the variable
    pub variable: String,
    /// Extracted values
    pub cells: Vec<Cell>,
}

impl Column {
    /// Returns the number of values in the column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the column has no values.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One row of a filter response
///
/// Serialised as a JSON array: `[input, output]` or `[input, output, label]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataPoint {
    /// Input and output values
    Pair(DValue, DValue),
    /// Input and output values with the experiment label of the input
    Triple(DValue, DValue, Option<String>),
}

/// Policy for columns of different lengths
#[derive(Clone, Copy, Debug, Display, PartialEq, clap::ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum Alignment {
    /// Pair values up to the length of the shorter column
    Truncate,
    /// Reject the request
    Strict,
}

/// Client side adjustment of a minimum bound before a request is sent
#[derive(Clone, Copy, Debug, Deserialize, Display, PartialEq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClampPolicy {
    /// Use `max(value, 0)`
    AtLeastZero,
    /// Use `min(value, 0)`
    AtMostZero,
    /// Use the value as entered, with an empty field meaning unbounded
    Unclamped,
}

/// Configuration served to the browser client
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClientConfig {
    /// Clamp policy for the input minimum
    pub in_min_clamp: ClampPolicy,
    /// Clamp policy for the output minimum
    pub out_min_clamp: ClampPolicy,
}
