pub mod create;
pub mod delete;
pub mod get;
pub mod health;
pub mod index;
pub mod list;
pub mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use get::get_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use list::list_handler;
pub use update::update_handler;

use crate::error::ApiError;

/// Parse a `{id}` path segment into a pet id
///
/// Only plain decimal digits are accepted; signs and whitespace are not.
pub(crate) fn parse_id(raw: &str) -> Result<u64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidId(raw.to_string()));
    }
    raw.parse::<u64>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_digits() {
        assert_eq!(parse_id("0").unwrap(), 0);
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn test_parse_id_rejects_signs_and_junk() {
        for raw in ["", "+1", "-1", " 1", "1.0", "index", "99999999999999999999"] {
            assert!(
                matches!(parse_id(raw), Err(ApiError::InvalidId(_))),
                "accepted {:?}",
                raw
            );
        }
    }
}
