use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::http::StatusCode;
use lambda_http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::errors::Error;

const EMPTY_BODY: &[u8] = b"{}";

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

/// Parses the JSON body of `request`. An absent body reads as `{}`; anything
/// that is not a JSON object becomes a 400 response.
pub fn extract_request<T: DeserializeOwned>(request: &Request) -> Result<T, Error> {
    let body: &[u8] = request.body().as_ref();
    let body = if body.is_empty() { EMPTY_BODY } else { body };

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) if value.is_object() => {
            serde_json::from_value(value).map_err(|err| invalid_body(err.to_string()))
        }
        Ok(_) => Err(invalid_body("expected a JSON object".into())),
        Err(err) => Err(invalid_body(err.to_string())),
    }
}

fn invalid_body(reason: String) -> Error {
    http_error(
        StatusCode::BAD_REQUEST,
        &format!("Invalid request body: {reason}"),
    )
}

pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(serde_json::to_string(body)?)?;

    Ok(response)
}

pub fn message_response(status: StatusCode, message: &str) -> Result<Response<String>, Error> {
    json_response(status, &MessageBody { message })
}

pub fn error_response(status: StatusCode, error: &str) -> Result<Response<String>, Error> {
    json_response(status, &ErrorBody { error })
}

/// Wraps an error response so it can be returned early with `?`.
pub fn http_error(status: StatusCode, error: &str) -> Error {
    match error_response(status, error) {
        Ok(response) => Error::HttpError(response),
        Err(err) => err,
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();
}
