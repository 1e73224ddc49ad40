use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};

use crate::errors::AppError;

/// Extractor for the `{id}` path segment. Rejects anything that is not a
/// positive integer with a 400 before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i32);

impl RecordId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(RecordId)
            .ok_or_else(|| {
                AppError::ValidationError(format!("Invalid id '{raw}': must be a positive integer"))
            })
    }
}

impl FromRequest for RecordId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.match_info().get("id") {
            Some(raw) => match Self::parse(raw) {
                Ok(id) => ok(id),
                Err(e) => err(e),
            },
            None => err(AppError::InternalError(
                "Route has no {id} segment".to_string(),
            )),
        }
    }
}
