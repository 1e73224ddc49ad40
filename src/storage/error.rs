use std::fmt;

/// The entity a storage operation was acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Category,
    Account,
    Transaction,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Category => "category",
            EntityKind::Account => "account",
            EntityKind::Transaction => "transaction",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad classification of a storage fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorKind {
    /// A unique, foreign key, not-null or check constraint rejected the write.
    Constraint,
    /// Connectivity, pool exhaustion or any other database fault.
    Database,
}

/// A storage fault, tagged with the entity and operation that raised it.
///
/// The `detail` string comes from the underlying driver and must only be logged,
/// never sent to API clients.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{operation} {entity} failed: {detail}")]
pub struct PersistenceError {
    pub entity: EntityKind,
    pub operation: &'static str,
    pub id: Option<i32>,
    pub kind: PersistenceErrorKind,
    pub detail: String,
}

impl PersistenceError {
    pub fn new(
        entity: EntityKind,
        operation: &'static str,
        id: Option<i32>,
        kind: PersistenceErrorKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            operation,
            id,
            kind,
            detail: detail.into(),
        }
    }

    pub fn constraint(
        entity: EntityKind,
        operation: &'static str,
        id: Option<i32>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(entity, operation, id, PersistenceErrorKind::Constraint, detail)
    }

    pub fn is_constraint_violation(&self) -> bool {
        self.kind == PersistenceErrorKind::Constraint
    }

    pub fn from_sqlx(
        entity: EntityKind,
        operation: &'static str,
        id: Option<i32>,
        err: sqlx::Error,
    ) -> Self {
        let kind = match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => PersistenceErrorKind::Constraint,
                _ => PersistenceErrorKind::Database,
            },
            _ => PersistenceErrorKind::Database,
        };

        Self::new(entity, operation, id, kind, err.to_string())
    }
}

/// Builds a `map_err` adapter for sqlx calls.
pub fn db_error(
    entity: EntityKind,
    operation: &'static str,
    id: Option<i32>,
) -> impl FnOnce(sqlx::Error) -> PersistenceError {
    move |err| PersistenceError::from_sqlx(entity, operation, id, err)
}

pub type StorageResult<T> = Result<T, PersistenceError>;
