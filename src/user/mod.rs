pub mod models;
pub mod password;
pub mod service;
mod signup;

pub use signup::register;
