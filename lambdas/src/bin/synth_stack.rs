use std::error::Error;
use std::fs;

use tracing::info;

use todo_lambdas::topology::todo_stack;

/// Prints the CloudFormation template for the todo stack, or writes it to the
/// path given as the first argument.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let stack = todo_stack();
    let template = serde_json::to_string_pretty(&stack.template())?;

    match std::env::args().nth(1) {
        Some(path) => {
            fs::write(&path, template)?;
            info!("Template for {} functions written to {}", stack.functions.len(), path);
        }
        None => println!("{template}"),
    }

    Ok(())
}
