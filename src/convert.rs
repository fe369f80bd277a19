use crate::models::Attachment;
use chrono::{
    format::{Item, StrftimeItems},
    TimeZone, Utc,
};
use serde::{Deserialize, Deserializer, Serializer};
use std::{
    fmt::{Display, Write},
    sync::Arc,
};

pub(crate) const INVALID_TIME: &str = "<invalid time>";

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn is_valid_time_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Renders milliseconds since the Unix epoch in UTC. `pattern` must have passed
/// [`is_valid_time_format`].
pub(crate) fn millis_to_string(millis: i64, pattern: &str) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(time) => time.format(pattern).to_string(),
        None => INVALID_TIME.into(),
    }
}

/// Renders caller supplied values. A `Display` impl that returns an error keeps whatever it
/// wrote before failing.
pub(crate) fn display_lossy<T: Display + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", value);
    out
}

pub(crate) fn serialize_attachment<S: Serializer>(
    attachment: &Option<Attachment>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match attachment {
        Some(attachment) => serializer.collect_str(&**attachment),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize_attachment<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Attachment>, D::Error> {
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.map(|text| Arc::new(text) as Attachment))
}
