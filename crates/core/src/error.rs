use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A parameter value that is malformed or out of bounds.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A foreign-key parameter naming a row that does not exist.
    #[error(
        "supplied '{param}' value '{value}' does not correspond to any row in the `{table}` table"
    )]
    Referential {
        param: String,
        value: DbId,
        table: &'static str,
    },

    #[error("required parameter '{0}' not present")]
    MissingParameter(String),

    #[error("update action executed with no parameters indicating fields to update")]
    NoOpUpdate,

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A mutation that would break relational integrity (a row still referenced elsewhere).
    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
