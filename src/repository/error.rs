//! Repository Errors
//!
//! Error types for persistence operations.

/// Errors that can occur in a repository
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A unique constraint (cpf, email, credit code) was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A foreign key points at a missing row
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// A stored row could not be mapped back to a domain value
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return RepositoryError::Conflict(constraint);
            }
            if db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or("foreign key").to_string();
                return RepositoryError::MissingReference(constraint);
            }
        }
        RepositoryError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_database_error() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[test]
    fn test_conflict_names_constraint() {
        let err = RepositoryError::Conflict("customers_cpf_key".to_string());
        assert!(err.to_string().contains("customers_cpf_key"));
    }
}
