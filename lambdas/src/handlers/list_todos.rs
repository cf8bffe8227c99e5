use lambda_http::http::StatusCode;
use lambda_http::{Request as LambdaRequest, Response as LambdaResponse};
use serde_json::Value;
use tracing::{error, info};

use crate::common::errors::Error;
use crate::common::utils::{http_error, json_response};
use crate::store::{unmarshall, ItemStore};

#[tracing::instrument(skip_all)]
pub async fn process_request<S: ItemStore + ?Sized>(
    _request: LambdaRequest,
    store: &S,
) -> Result<LambdaResponse<String>, Error> {
    let records = store.scan_all().await.map_err(|err| {
        error!("Failed to scan todos: {}", err);
        http_error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
    })?;

    info!("Listing {} todos", records.len());
    let todos: Vec<Value> = records
        .into_iter()
        .map(|record| Value::Object(unmarshall(record)))
        .collect();

    json_response(StatusCode::OK, &todos)
}
