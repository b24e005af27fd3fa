use crate::{Error, Result};

/// Validates the logical database selector, defaulting to 0.
pub(crate) fn validate_database_id(database_id: Option<i64>) -> Result<u32> {
    let Some(id) = database_id else {
        return Ok(0);
    };
    if id < 0 {
        return Err(Error::validation(
            "database_id",
            "Database ID must be non-negative.",
        ));
    }
    u32::try_from(id).map_err(|_| Error::validation("database_id", "Database ID is out of range."))
}
