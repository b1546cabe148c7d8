use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Converts diesel errors into structured `AppError` variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// `operation` is only used for the message of errors that cannot be
    /// mapped onto a client-facing variant.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.message(), info.constraint_name(), operation)
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        message: &str,
        constraint_name: Option<&str>,
        operation: &str,
    ) -> AppError {
        let parsed = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, constraint_name).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => ConstraintParser::parse_not_null_violation(message)
                .map(|(entity, field)| AppError::Validation {
                    field,
                    reason: format!("Field is required for {}", entity),
                }),
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, constraint_name).map(
                    |(entity, field, value)| AppError::Validation {
                        field,
                        reason: format!("Invalid reference from {} with value '{}'", entity, value),
                    },
                )
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
        })
    }
}
