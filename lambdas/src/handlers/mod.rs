use lambda_http::{Error as LambdaError, Response};

use crate::common::errors::Error;

pub mod add_todo;
pub mod list_todos;

/// Turns a handler result into what the runtime expects. Error responses built
/// by the handler are returned as ordinary responses.
pub fn respond(result: Result<Response<String>, Error>) -> Result<Response<String>, LambdaError> {
    match result {
        Ok(val) => Ok(val),
        Err(Error::HttpError(val)) => Ok(val),
        Err(Error::LambdaError(err)) => Err(err),
    }
}
