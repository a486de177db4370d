//! Column extraction from a dataset document.
//!
//! A dataset is a JSON document whose keys name experiments and variables. A column is every
//! value stored under keys matching a variable name, anywhere in the document, in the order in
//! which the keys are written. Key matching ignores case, and treats spaces as underscores.

use crate::models::{Cell, Column};
use crate::types::dvalue::DValue;

/// Returns the normalised form of a variable name: lower case with spaces replaced by
/// underscores.
pub fn normalise_variable_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Extract the column for a variable from a dataset document.
///
/// A member whose value is nested is searched before the member itself is matched, so an inner
/// match precedes the outer one. For a member whose key matches:
/// * An array value adds one cell for each of its elements.
/// * Any other value, including an object, adds one cell.
///
/// Arrays and objects coerce to NaN, so their cells never fall inside a window.
///
/// Each cell is labelled with the top-level key it was found under. If no key matches the result
/// is an empty column.
///
/// # Arguments
///
/// * `document`: Parsed dataset document
/// * `variable`: Variable name, in any case and with spaces or underscores
pub fn extract(document: &DValue, variable: &str) -> Column {
    let variable = normalise_variable_name(variable);
    let mut cells = Vec::new();
    visit(document, None, &variable, &mut cells);
    Column { variable, cells }
}

/// Recursively visit a value, appending cells for matching members.
fn visit(value: &DValue, label: Option<&str>, variable: &str, cells: &mut Vec<Cell>) {
    match value {
        DValue::Object(members) => {
            for (key, member) in members {
                // The first object level names the experiment.
                let label = label.or(Some(key.as_str()));
                visit(member, label, variable, cells);
                if normalise_variable_name(key) == variable {
                    collect(member, label, cells);
                }
            }
        }
        DValue::Array(elements) => {
            for element in elements {
                visit(element, label, variable, cells);
            }
        }
        _ => (),
    }
}

/// Append the cells of a matched member's value.
///
/// Every element of an array takes a position in the column, as does an object, so that values
/// which can never match still keep the columns aligned.
fn collect(value: &DValue, label: Option<&str>, cells: &mut Vec<Cell>) {
    let label = label.map(str::to_string);
    match value {
        DValue::Array(elements) => cells.extend(
            elements
                .iter()
                .map(|element| Cell::new(element.clone(), label.clone())),
        ),
        other => cells.push(Cell::new(other.clone(), label)),
    }
}
