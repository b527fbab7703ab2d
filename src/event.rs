//! Log event module
//!
//! The three-field record a browser posts for each console line, decoded
//! through serde and rendered as a single terminal line.

use chrono::{Local, TimeZone};
use serde::Deserialize;
use std::fmt;

/// One browser console log line forwarded by the client page.
///
/// Lives for the duration of a single request: decoded from the body,
/// printed, dropped.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Producer clock, milliseconds since epoch. Not validated.
    pub timestamp: i64,
    /// Severity label, uppercased on output.
    pub level: String,
    /// Free-form text, rendered verbatim.
    pub message: String,
}

/// Failure to turn a request body into a printable log line.
#[derive(Debug)]
pub enum DecodeError {
    /// Body is not valid JSON, or a required field is missing or mistyped.
    Json(serde_json::Error),
    /// Timestamp falls outside the representable datetime range.
    TimestampOutOfRange(i64),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid log event: {err}"),
            Self::TimestampOutOfRange(ms) => write!(f, "timestamp out of range: {ms}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::TimestampOutOfRange(_) => None,
        }
    }
}

impl LogEvent {
    /// Decode a JSON request body into a validated event.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        serde_json::from_slice(bytes).map_err(DecodeError::Json)
    }

    /// Render as `[HH:MM:SS] LEVEL: message` in the local timezone.
    pub fn format_line(&self) -> Result<String, DecodeError> {
        self.format_line_in(&Local)
    }

    /// Timezone-generic rendering. Production goes through [`format_line`];
    /// tests pin a fixed offset instead of mutating the process timezone.
    ///
    /// [`format_line`]: Self::format_line
    pub fn format_line_in<Tz>(&self, tz: &Tz) -> Result<String, DecodeError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let time = tz
            .timestamp_millis_opt(self.timestamp)
            .single()
            .ok_or(DecodeError::TimestampOutOfRange(self.timestamp))?;

        Ok(format!(
            "[{}] {}: {}",
            time.format("%H:%M:%S"),
            self.level.to_uppercase(),
            self.message
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn decode_valid_event() {
        let event =
            LogEvent::decode(br#"{"timestamp":1700000000000,"level":"warn","message":"low disk"}"#)
                .expect("valid body should decode");
        assert_eq!(event.timestamp, 1_700_000_000_000);
        assert_eq!(event.level, "warn");
        assert_eq!(event.message, "low disk");
    }

    #[test]
    fn decode_ignores_extra_keys() {
        let event = LogEvent::decode(
            br#"{"timestamp":0,"level":"info","message":"hi","source":"app.js"}"#,
        )
        .expect("extra keys are tolerated");
        assert_eq!(event.message, "hi");
    }

    #[test]
    fn missing_level_is_decode_error() {
        let err = LogEvent::decode(br#"{"timestamp":0,"message":"hi"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.to_string().contains("level"));
    }

    #[test]
    fn mistyped_field_is_decode_error() {
        let err = LogEvent::decode(br#"{"timestamp":"0","level":"info","message":"hi"}"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let err = LogEvent::decode(b"not json at all").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn epoch_zero_formats_as_midnight_utc() {
        let event = LogEvent {
            timestamp: 0,
            level: "info".to_string(),
            message: "hello".to_string(),
        };
        assert_eq!(
            event.format_line_in(&Utc).expect("epoch 0 is in range"),
            "[00:00:00] INFO: hello"
        );
    }

    #[test]
    fn offset_shifts_the_wall_clock() {
        let event = LogEvent {
            timestamp: 0,
            level: "error".to_string(),
            message: "boom".to_string(),
        };
        let plus_one = FixedOffset::east_opt(3600).expect("valid offset");
        assert_eq!(
            event.format_line_in(&plus_one).expect("epoch 0 is in range"),
            "[01:00:00] ERROR: boom"
        );
    }

    #[test]
    fn subsecond_millis_are_truncated() {
        let event = LogEvent {
            timestamp: 1500, // 1.5s after epoch
            level: "debug".to_string(),
            message: "tick".to_string(),
        };
        assert_eq!(
            event.format_line_in(&Utc).expect("in range"),
            "[00:00:01] DEBUG: tick"
        );
    }

    #[test]
    fn extreme_timestamp_is_rejected() {
        let event = LogEvent {
            timestamp: i64::MAX,
            level: "info".to_string(),
            message: "hi".to_string(),
        };
        let err = event.format_line_in(&Utc).unwrap_err();
        assert!(matches!(err, DecodeError::TimestampOutOfRange(_)));
    }
}
