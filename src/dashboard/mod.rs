pub mod aggregation;
mod handlers;
pub mod models;

pub use handlers::*;
