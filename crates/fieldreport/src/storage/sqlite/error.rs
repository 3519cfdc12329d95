//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StoreError` from `fieldreport_core::storage`.
//! Every mapped error is logged here before it is returned to the caller.

use fieldreport_core::storage::StoreError;

/// Maps a rusqlite error to a StoreError.
///
/// # Error Mapping
///
/// - Cannot open / busy / locked / not a database → `StoreError::Unavailable`
/// - Row value conversion failures → `StoreError::Serialization`
/// - All other errors → `StoreError::Statement`
pub fn map_rusqlite_error(err: &rusqlite::Error, operation: &'static str) -> StoreError {
    let mapped = match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen
                    | rusqlite::ErrorCode::DatabaseBusy
                    | rusqlite::ErrorCode::DatabaseLocked
                    | rusqlite::ErrorCode::NotADatabase
            ) =>
        {
            StoreError::Unavailable(err.to_string())
        }

        // A stored value could not be turned back into a report
        rusqlite::Error::FromSqlConversionFailure(_, _, source) => {
            StoreError::Serialization(source.to_string())
        }
        rusqlite::Error::InvalidColumnType(idx, name, ty) => StoreError::Serialization(format!(
            "column {name} (index {idx}) has unexpected type {ty}"
        )),

        _ => StoreError::Statement(err.to_string()),
    };

    tracing::warn!(operation, error = %err, "report store operation failed");
    mapped
}

/// Maps a tokio_rusqlite error to a StoreError.
///
/// This is the main entry point for error mapping in async code.
/// It extracts the inner `rusqlite::Error` if present; a closed
/// connection means the store is unavailable.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, operation: &'static str) -> StoreError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, operation),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            tracing::warn!(operation, error = %err, "report store connection closed");
            StoreError::Unavailable("Connection closed unexpectedly".to_string())
        }
        _ => {
            tracing::warn!(operation, error = %err, "report store operation failed");
            StoreError::Statement(err.to_string())
        }
    }
}
