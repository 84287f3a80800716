//! Per-value decoding of ISS rows.

use chrono::{FixedOffset, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone};
use moexiss_types::ValueType;
use serde_json::Value;

use crate::DecodeError;

/// Literal format of ISS `datetime` values.
pub const ISS_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Turns untyped JSON values into output strings.
///
/// `datetime` values are read as exchange-local time at a fixed UTC offset
/// and re-emitted as RFC 3339 with that offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDecoder {
    offset: FixedOffset,
}

impl ValueDecoder {
    /// Creates a decoder for an exchange at the given UTC offset.
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Decodes one value of `column` declared as `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if a `datetime` value is not a string, does not
    /// match [`ISS_DATETIME_FORMAT`], or falls outside the representable
    /// range once shifted to UTC.
    pub fn decode(
        &self,
        column: &str,
        kind: ValueType,
        value: &Value,
    ) -> Result<String, DecodeError> {
        match (kind, value) {
            (ValueType::Datetime, Value::String(raw)) => self.decode_datetime(column, raw),
            (ValueType::Datetime, Value::Null) => Ok(String::new()),
            (ValueType::Datetime, other) => Err(DecodeError::NotATimestamp {
                column: column.to_string(),
                value: other.to_string(),
            }),
            (ValueType::Plain, value) => Ok(plain(value)),
        }
    }

    fn decode_datetime(&self, column: &str, raw: &str) -> Result<String, DecodeError> {
        let naive = NaiveDateTime::parse_from_str(raw, ISS_DATETIME_FORMAT).map_err(|source| {
            DecodeError::Datetime {
                column: column.to_string(),
                value: raw.to_string(),
                source,
            }
        })?;
        let utc = naive
            .checked_sub_signed(TimeDelta::seconds(i64::from(
                self.offset.local_minus_utc(),
            )))
            .ok_or_else(|| DecodeError::DatetimeOutOfRange {
                column: column.to_string(),
                value: raw.to_string(),
            })?;
        let local = self.offset.from_utc_datetime(&utc);
        Ok(local.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use moexiss_types::moscow_offset;
    use serde_json::json;

    fn decoder() -> ValueDecoder {
        ValueDecoder::new(moscow_offset())
    }

    #[test]
    fn test_datetime_keeps_exchange_offset() {
        let out = decoder()
            .decode("begin", ValueType::Datetime, &json!("2024-03-01 10:00:00"))
            .unwrap();
        assert_eq!(out, "2024-03-01T10:00:00+03:00");

        let instant = DateTime::parse_from_rfc3339(&out).unwrap();
        assert_eq!(
            instant.with_timezone(&Utc).to_rfc3339(),
            "2024-03-01T07:00:00+00:00"
        );
    }

    #[test]
    fn test_datetime_at_utc_uses_z() {
        let utc = ValueDecoder::new(FixedOffset::east_opt(0).unwrap());
        let out = utc
            .decode("begin", ValueType::Datetime, &json!("2024-03-01 10:00:00"))
            .unwrap();
        assert_eq!(out, "2024-03-01T10:00:00Z");
    }

    #[test]
    fn test_bad_datetime_is_an_error() {
        let err = decoder()
            .decode("begin", ValueType::Datetime, &json!("2024-03-01T10:00"))
            .unwrap_err();
        assert!(
            matches!(err, DecodeError::Datetime { ref value, .. } if value == "2024-03-01T10:00")
        );
    }

    #[test]
    fn test_datetime_at_range_edge_is_an_error() {
        for raw in ["-262143-01-01 00:00:00", "-262143-01-01 02:00:00"] {
            let err = decoder()
                .decode("begin", ValueType::Datetime, &json!(raw))
                .unwrap_err();
            assert!(
                matches!(err, DecodeError::DatetimeOutOfRange { ref value, .. } if value == raw)
            );
        }
    }

    #[test]
    fn test_datetime_number_is_an_error() {
        let err = decoder()
            .decode("begin", ValueType::Datetime, &json!(1_709_276_400))
            .unwrap_err();
        assert!(matches!(err, DecodeError::NotATimestamp { .. }));
    }

    #[test]
    fn test_datetime_null_is_empty() {
        let out = decoder()
            .decode("end", ValueType::Datetime, &Value::Null)
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_plain_values() {
        let d = decoder();
        assert_eq!(d.decode("open", ValueType::Plain, &json!(280.5)).unwrap(), "280.5");
        assert_eq!(d.decode("volume", ValueType::Plain, &json!(12000)).unwrap(), "12000");
        assert_eq!(d.decode("secid", ValueType::Plain, &json!("SBER")).unwrap(), "SBER");
        assert_eq!(d.decode("value", ValueType::Plain, &Value::Null).unwrap(), "");
        assert_eq!(d.decode("flag", ValueType::Plain, &json!(true)).unwrap(), "true");
    }
}
