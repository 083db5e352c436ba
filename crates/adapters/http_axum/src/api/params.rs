//! Path segment parsing shared by the handlers.

use std::str::FromStr;

use hivekeep_domain::error::ValidationError;

use crate::error::ApiError;

/// Parse a record id from a path segment.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ValidationError::InvalidId(raw.to_string()).into())
}

/// Parse the `{deletedStatus}` segment of the status routes.
pub(crate) fn parse_status(raw: &str) -> Result<bool, ApiError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ValidationError::InvalidStatus(raw.to_string()).into())
    }
}
