/// Errors that occurred while configuring a formatter or encoding a record.
///
/// Capturing and rendering records never fails. These errors only come from the optional
/// surfaces around them.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The strftime pattern given to [`Formatter::with_time_format`] could not be parsed by
    /// chrono.
    ///
    /// [`Formatter::with_time_format`]: crate::Formatter::with_time_format
    #[error("invalid time format {0:?}")]
    InvalidTimeFormat(String),

    /// Exception record failed to serialize to JSON.
    ///
    /// Note: This is an error in this crate. If you spot this, please open an issue.
    #[error("serializing exception record failed with {0}")]
    Serialize(serde_json::Error),

    /// Input was not a valid JSON encoded exception record.
    #[error("deserializing exception record failed with {0}")]
    Deserialize(serde_json::Error),
}
