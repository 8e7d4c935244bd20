//! Timestamps recorded in resource state
//!
//! State timestamps use the RFC 850 layout, always in UTC:
//! `Monday, 02-Jan-06 15:04:05 UTC`.

use crate::error::{CloudError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

const RFC850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S UTC";

/// Format an instant for storage in state
pub fn format_rfc850(at: DateTime<Utc>) -> String {
    at.format(RFC850_FORMAT).to_string()
}

/// Parse a timestamp previously produced by [`format_rfc850`]
pub fn parse_rfc850(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, RFC850_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| CloudError::StateError(format!("invalid timestamp '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_rfc850() {
        let at = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(format_rfc850(at), "Monday, 02-Jan-06 15:04:05 UTC");
    }

    #[test]
    fn test_parse_rfc850() {
        let parsed = parse_rfc850("Monday, 02-Jan-06 15:04:05 UTC").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap());
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        assert!(parse_rfc850("2006-01-02T15:04:05Z").is_err());
    }
}
