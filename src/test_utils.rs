use crate::models::*;
use crate::types::DValue;

use serde_json::json;
use std::path::PathBuf;

/// Create a RequestData object for the flat test document.
pub(crate) fn get_test_request_data() -> RequestData {
    RequestData {
        input_variable: "temp".to_string(),
        output_variable: "yield".to_string(),
        in_min: "15".to_string(),
        in_max: "30".to_string(),
        out_min: "0".to_string(),
        out_max: "5".to_string(),
    }
}

/// Create a document with one array per variable.
pub(crate) fn get_test_flat_document() -> DValue {
    json!({
        "temp": [10, 20, 30],
        "yield": [1, 2, 3]
    })
}

/// Create a document with one object per experiment, each holding input and output variables.
pub(crate) fn get_test_nested_document() -> DValue {
    json!({
        "Exp 1": {
            "inputs": {"Oven Temperature": 100, "Polymer 1": 0.5},
            "outputs": {"Viscosity": 30.1, "Cure Time": 12}
        },
        "Exp 2": {
            "inputs": {"Oven Temperature": 150, "Polymer 1": 0.25},
            "outputs": {"Viscosity": 42.5, "Cure Time": 9}
        },
        "Exp 3": {
            "inputs": {"Oven Temperature": 200, "Polymer 1": 0.75},
            "outputs": {"Viscosity": 61, "Cure Time": 7}
        }
    })
}

/// Write a dataset file with a unique name in the temporary directory and return its path.
///
/// The caller is responsible for removing the file.
pub(crate) fn write_test_dataset(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dataviz-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).unwrap();
    path
}
