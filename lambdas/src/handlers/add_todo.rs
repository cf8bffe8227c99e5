use lambda_http::http::StatusCode;
use lambda_http::{Request as LambdaRequest, Response as LambdaResponse};
use tracing::{error, info, warn};

use crate::common::errors::Error;
use crate::common::utils::{extract_request, http_error, message_response};
use crate::common::{CreateTodoRequest, TodoItem};
use crate::store::ItemStore;

pub const TASK_CREATED: &str = "Task created";

#[tracing::instrument(skip_all)]
pub async fn process_request<S: ItemStore + ?Sized>(
    request: LambdaRequest,
    store: &S,
) -> Result<LambdaResponse<String>, Error> {
    let request = extract_request::<CreateTodoRequest>(&request)?;
    let item = TodoItem::try_from(request).map_err(|err| {
        warn!("Rejected create request: {}", err);
        http_error(StatusCode::BAD_REQUEST, &err.to_string())
    })?;

    let id = item.id.clone();
    info!("Storing todo with id: {}", id);
    store.put(item).await.map_err(|err| {
        error!("Failed to store todo {}: {}", id, err);
        http_error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
    })?;

    message_response(StatusCode::CREATED, TASK_CREATED)
}
