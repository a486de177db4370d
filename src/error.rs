//! Error handling.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{event, Level};

/// Message returned to the caller for every server error.
///
/// The underlying error is only logged.
pub const SERVER_ERROR: &str = "Something went wrong on the server, please try again later.";

/// Data visualisation server error type
///
/// This type encapsulates the various errors that may occur.
/// Each variant may result in a different API error response.
#[derive(Debug, Error)]
pub enum DatavizError {
    /// Columns of the input and output variables cannot be paired
    #[error("variable {input_variable} has {input_len} values but variable {output_variable} has {output_len}")]
    ColumnLengthMismatch {
        input_variable: String,
        input_len: usize,
        output_variable: String,
        output_len: usize,
    },

    /// Error parsing the dataset as JSON
    #[error("failed to parse dataset {}", .path.display())]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Error reading the dataset file
    #[error("failed to read dataset {}", .path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error encoding metrics
    #[error("failed to encode metrics")]
    Metrics(#[from] prometheus::Error),

    /// Metrics were not valid UTF-8
    #[error("failed to encode metrics")]
    MetricsUtf8(#[from] std::string::FromUtf8Error),

    /// Error deserialising the request path into RequestData
    #[error("request path is not valid")]
    RequestPathRejection(#[from] PathRejection),

    /// Error deserialising the request query string
    #[error("request query is not valid")]
    RequestQueryRejection(#[from] QueryRejection),

    /// Error validating RequestData
    #[error("request data is not valid")]
    RequestDataValidation(#[from] validator::ValidationErrors),
}

impl IntoResponse for DatavizError {
    /// Convert from a `DatavizError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// Body of a client error response
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorBody {
    /// Main error message
    message: String,

    /// Optional list of causes
    #[serde(skip_serializing_if = "Option::is_none")]
    caused_by: Option<Vec<String>>,
}

impl ErrorBody {
    /// Return a new ErrorBody
    ///
    /// # Arguments
    ///
    /// * `error`: The error that occurred
    fn new<E>(error: &E) -> Self
    where
        E: std::error::Error,
    {
        let message = error.to_string();
        let mut caused_by = None;
        let mut current = error.source();
        while let Some(source) = current {
            let mut causes: Vec<String> = caused_by.unwrap_or_default();
            causes.push(source.to_string());
            caused_by = Some(causes);
            current = source.source();
        }
        // Remove duplicate entries.
        if let Some(caused_by) = caused_by.as_mut() {
            caused_by.dedup()
        }
        ErrorBody { message, caused_by }
    }
}

/// A response to send in error cases
///
/// Client errors describe what was wrong with the request. Server errors carry no detail.
enum ErrorResponse {
    /// 400 bad request, rendered as JSON
    BadRequest(ErrorBody),
    /// 500 internal server error, rendered as the static [SERVER_ERROR] text
    InternalServerError,
}

impl ErrorResponse {
    /// Return a 400 bad request ErrorResponse
    fn bad_request<E>(error: &E) -> Self
    where
        E: std::error::Error,
    {
        Self::BadRequest(ErrorBody::new(error))
    }

    /// Return a 500 internal server error ErrorResponse, logging the error and its causes.
    fn internal_server_error<E>(error: &E) -> Self
    where
        E: std::error::Error,
    {
        event!(Level::ERROR, "{}", error.to_string());
        let mut current = error.source();
        while let Some(source) = current {
            event!(Level::ERROR, "Caused by: {}", source.to_string());
            current = source.source();
        }
        Self::InternalServerError
    }
}

impl From<DatavizError> for ErrorResponse {
    /// Convert from a `DatavizError` into an `ErrorResponse`.
    fn from(error: DatavizError) -> Self {
        match &error {
            // Bad request
            DatavizError::ColumnLengthMismatch { .. }
            | DatavizError::RequestPathRejection(_)
            | DatavizError::RequestQueryRejection(_)
            | DatavizError::RequestDataValidation(_) => Self::bad_request(&error),

            // Internal server error
            DatavizError::DatasetParse { .. }
            | DatavizError::DatasetRead { .. }
            | DatavizError::Metrics(_)
            | DatavizError::MetricsUtf8(_) => Self::internal_server_error(&error),
        }
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Client errors are rendered as JSON, server errors as plain text.
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(body) => match serde_json::to_string_pretty(&body) {
                Err(err) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to serialise error response: {}", err),
                )
                    .into_response(),
                Ok(json_body) => (
                    StatusCode::BAD_REQUEST,
                    [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                    json_body,
                )
                    .into_response(),
            },
            Self::InternalServerError => server_error_response(),
        }
    }
}

/// Returns the generic server error response.
pub fn server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(&header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.to_string())],
        SERVER_ERROR,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    use hyper::HeaderMap;

    // Jump through the hoops to get the body as a string.
    async fn body_string(response: Response) -> String {
        String::from_utf8(
            hyper::body::to_bytes(response.into_body())
                .await
                .unwrap()
                .to_vec(),
        )
        .unwrap()
    }

    async fn test_client_error(
        error: DatavizError,
        message: &str,
        caused_by: Option<Vec<&'static str>>,
    ) {
        let response = error.into_response();
        assert_eq!(StatusCode::BAD_REQUEST, response.status());
        let mut headers = HeaderMap::new();
        headers.insert(&header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert_eq!(headers, *response.headers());
        let error_body: ErrorBody = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(message.to_string(), error_body.message);
        // Map Vec items from str to String
        let caused_by = caused_by.map(|cb| cb.iter().map(|s| s.to_string()).collect());
        assert_eq!(caused_by, error_body.caused_by);
    }

    async fn test_server_error(error: DatavizError) {
        let response = error.into_response();
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        let mut headers = HeaderMap::new();
        headers.insert(
            &header::CONTENT_TYPE,
            "text/plain; charset=utf-8".parse().unwrap(),
        );
        assert_eq!(headers, *response.headers());
        assert_eq!(SERVER_ERROR, body_string(response).await);
    }

    #[tokio::test]
    async fn column_length_mismatch() {
        let error = DatavizError::ColumnLengthMismatch {
            input_variable: "temp".to_string(),
            input_len: 3,
            output_variable: "yield".to_string(),
            output_len: 2,
        };
        let message = "variable temp has 3 values but variable yield has 2";
        test_client_error(error, message, None).await;
    }

    #[tokio::test]
    async fn request_data_validation() {
        let mut validation_errors = validator::ValidationErrors::new();
        let validation_error = validator::ValidationError::new("foo");
        validation_errors.add("bar", validation_error);
        let error = DatavizError::RequestDataValidation(validation_errors);
        let message = "request data is not valid";
        let caused_by = Some(vec!["bar: Validation error: foo [{}]"]);
        test_client_error(error, message, caused_by).await;
    }

    #[tokio::test]
    async fn dataset_read() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = DatavizError::DatasetRead {
            path: "missing.json".into(),
            source: io_error,
        };
        test_server_error(error).await;
    }

    #[tokio::test]
    async fn dataset_parse() {
        let json_error = serde_json::from_str::<serde_json::Value>("{\"").unwrap_err();
        let error = DatavizError::DatasetParse {
            path: "broken.json".into(),
            source: json_error,
        };
        test_server_error(error).await;
    }

    #[tokio::test]
    async fn metrics_utf8() {
        let utf8_error = String::from_utf8(vec![0xff]).unwrap_err();
        test_server_error(DatavizError::MetricsUtf8(utf8_error)).await;
    }

    #[tokio::test]
    async fn server_error_hides_detail() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "secret detail");
        let error = DatavizError::DatasetRead {
            path: "/srv/private/dataset.json".into(),
            source: io_error,
        };
        let body = body_string(error.into_response()).await;
        assert!(!body.contains("secret detail"));
        assert!(!body.contains("/srv/private"));
    }

    #[test]
    fn dataset_read_message() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = DatavizError::DatasetRead {
            path: "missing.json".into(),
            source: io_error,
        };
        assert_eq!("failed to read dataset missing.json", error.to_string());
        assert_eq!("no such file", error.source().unwrap().to_string());
    }
}
