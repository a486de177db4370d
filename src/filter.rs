//! Range filter over paired columns.

use crate::error::DatavizError;
use crate::models::{Alignment, Column, DataPoint};
use crate::types::Window;

use tracing::{event, Level};

/// Returns the data points whose input and output values both lie within a window.
///
/// Values are paired by position: the i'th input value with the i'th output value. Order is
/// preserved.
///
/// # Arguments
///
/// * `input`: Column of the input variable
/// * `output`: Column of the output variable
/// * `window`: Inclusive input and output ranges
/// * `alignment`: What to do when the columns have different lengths. With
///   [Alignment::Truncate] values beyond the end of the shorter column are dropped, with
///   [Alignment::Strict] an error is returned.
/// * `with_labels`: Whether to include the label of the input value in each data point
pub fn filter_datapoints(
    input: &Column,
    output: &Column,
    window: &Window,
    alignment: Alignment,
    with_labels: bool,
) -> Result<Vec<DataPoint>, DatavizError> {
    if input.len() != output.len() {
        match alignment {
            Alignment::Strict => {
                return Err(DatavizError::ColumnLengthMismatch {
                    input_variable: input.variable.clone(),
                    input_len: input.len(),
                    output_variable: output.variable.clone(),
                    output_len: output.len(),
                })
            }
            Alignment::Truncate => event!(
                Level::WARN,
                input_variable = %input.variable,
                input_len = input.len(),
                output_variable = %output.variable,
                output_len = output.len(),
                "column lengths differ, dropping unpaired values"
            ),
        }
    }
    let points = input
        .cells
        .iter()
        .zip(output.cells.iter())
        .filter(|(x, y)| window.contains(x.number, y.number))
        .map(|(x, y)| {
            if with_labels {
                DataPoint::Triple(x.value.clone(), y.value.clone(), x.label.clone())
            } else {
                DataPoint::Pair(x.value.clone(), y.value.clone())
            }
        })
        .collect();
    Ok(points)
}
