pub mod cli_args;
pub mod db;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod model;
pub mod openapi;
pub mod route;
pub mod server;
pub mod state;
