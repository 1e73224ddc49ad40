pub mod account;
pub mod category;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod seed;
pub mod storage;
pub mod transaction;
pub mod user;
pub mod validation;
