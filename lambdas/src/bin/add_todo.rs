use aws_config::BehaviorVersion;
use lambda_http::{run, service_fn, Error as LambdaError, Request as LambdaRequest};
use tracing::info;

use todo_lambdas::common::table_name_from_env;
use todo_lambdas::common::utils::init_tracing;
use todo_lambdas::handlers::{add_todo, respond};
use todo_lambdas::store::DynamoItemStore;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing();

    let table_name = table_name_from_env();
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = DynamoItemStore::new(aws_sdk_dynamodb::Client::new(&config), table_name);
    info!("Writing todos to table: {}", store.table_name());

    run(service_fn(|request: LambdaRequest| async {
        respond(add_todo::process_request(request, &store).await)
    }))
    .await
}
