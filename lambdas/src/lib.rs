pub mod common;
pub mod handlers;
pub mod store;
pub mod topology;
