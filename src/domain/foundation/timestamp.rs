//! Timestamp value object for immutable points in time.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Immutable point in time, always UTC.
///
/// Serializes to an ISO-8601 string with millisecond precision and a `Z`
/// suffix, so every timestamp on the wire has the same shape regardless
/// of which payload carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parses an RFC-3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Renders the wire representation, e.g. `2024-01-15T10:30:00.000Z`.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Returns the wire representation as a JSON value.
    ///
    /// Used when merging a server timestamp into a pass-through payload.
    pub fn as_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_rfc3339())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timestamp::from_rfc3339(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_serializes_as_iso8601_with_z_suffix() {
        let ts = Timestamp::from_rfc3339("2024-01-15T10:30:00.500Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-01-15T10:30:00.500Z\"");
    }

    #[test]
    fn timestamp_deserializes_from_rfc3339() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn timestamp_roundtrips_offset_input_to_utc() {
        let ts = Timestamp::from_rfc3339("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn timestamp_as_json_matches_serde_output() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_json(), serde_json::to_value(ts).unwrap());
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = Timestamp::from_rfc3339("2024-01-15T10:00:00Z").unwrap();
        let ts2 = Timestamp::from_rfc3339("2024-01-15T11:00:00Z").unwrap();
        assert!(ts1 < ts2);
    }
}
