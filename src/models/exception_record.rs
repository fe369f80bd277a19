use crate::{
    convert::{deserialize_attachment, display_lossy, now_millis, serialize_attachment},
    models::{ErrorPayload, StackFrame},
    stack::capture_stack,
    Error, Formatter,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{
    any::Any,
    error::Error as StdError,
    fmt::{self, Display},
    sync::Arc,
};
use uuid::Uuid;

/// Caller supplied value shown at the end of a report.
///
/// The record keeps the `Arc` it was given, so [`Arc::ptr_eq`] against the original succeeds.
pub type Attachment = Arc<dyn Display + Send + Sync>;

/// Structured capture of an error event.
///
/// Records are built once, at the moment an error or panic is observed, and are read-only
/// afterwards.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionRecord {
    pub(crate) id: String,

    #[serde(rename = "err")]
    pub(crate) error: Option<ErrorPayload>,

    #[serde(default)]
    pub(crate) remark: String,

    #[serde(
        default,
        serialize_with = "serialize_attachment",
        deserialize_with = "deserialize_attachment"
    )]
    pub(crate) attachment: Option<Attachment>,

    /// Milliseconds since the Unix epoch.
    pub(crate) time: i64,

    #[serde(default)]
    pub(crate) traces: Vec<StackFrame>,

    #[serde(default)]
    pub(crate) exist: bool,
}

impl ExceptionRecord {
    /// Capture `error` unconditionally. The stack starts `skip` frames above the caller of this
    /// function.
    #[inline(never)]
    pub(crate) fn capture(
        remark: String,
        error: ErrorPayload,
        attachment: Option<Attachment>,
        skip: usize,
    ) -> Self {
        ExceptionRecord {
            id: Uuid::new_v4().to_string(),
            error: Some(error),
            remark,
            attachment,
            time: now_millis(),
            traces: capture_stack(skip + 1),
            exist: true,
        }
    }

    /// Capture a structured error value.
    ///
    /// Unlike [`new_record`](crate::new_record) this always produces a record.
    ///
    /// ```
    /// use exception_record::ExceptionRecord;
    ///
    /// let err = "x".parse::<u32>().unwrap_err();
    /// let record = ExceptionRecord::from_error("parsing retry count", err, None);
    /// assert!(record.has_error());
    /// assert_eq!("invalid digit found in string", record.error().unwrap().to_string());
    /// ```
    #[inline(never)]
    pub fn from_error<E>(remark: impl Into<String>, error: E, attachment: Option<Attachment>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::capture(remark.into(), ErrorPayload::from_error(error), attachment, 1)
    }

    /// Capture the payload of a panic that was caught by the caller, e.g. the `Err` of
    /// [`std::thread::JoinHandle::join`].
    ///
    /// Pass the payload itself (`&*payload`), not a reference to the `Box` holding it.
    #[inline(never)]
    pub fn from_panic(
        remark: impl Into<String>,
        payload: &(dyn Any + Send),
        attachment: Option<Attachment>,
    ) -> Self {
        Self::capture(
            remark.into(),
            ErrorPayload::Panic(crate::panic_message(payload)),
            attachment,
            1,
        )
    }

    /// Random UUID identifying this record.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Captured error, if any.
    pub fn error(&self) -> Option<&ErrorPayload> {
        self.error.as_ref()
    }

    /// Free-form remark given at capture time.
    pub fn remark(&self) -> &str {
        &self.remark
    }

    /// The attachment exactly as it was passed in.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Capture time in milliseconds since the Unix epoch.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// Capture time as a UTC date time. `None` if out of chrono's range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time).single()
    }

    /// Stack frames at capture time, innermost first.
    pub fn traces(&self) -> &[StackFrame] {
        &self.traces
    }

    /// Whether an actual error was captured.
    pub fn has_error(&self) -> bool {
        self.exist
    }

    /// Render the record with the default [`Formatter`].
    pub fn format(&self) -> String {
        Formatter::default().format(self)
    }

    /// Emit the rendered record at error level through the `log` facade.
    pub fn log(&self) {
        log::error!(target: "exception_record", "{}", self);
    }

    /// Encode the record as JSON. The error and the attachment are written as text.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::Serialize)
    }

    /// Decode a record previously written with [`to_json`](Self::to_json). Attachments come back
    /// as `Arc<String>`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::Deserialize)
    }
}

impl Display for ExceptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Formatter::default().write(f, self)
    }
}

impl fmt::Debug for ExceptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionRecord")
            .field("id", &self.id)
            .field("error", &self.error)
            .field("remark", &self.remark)
            .field(
                "attachment",
                &self.attachment.as_ref().map(|attachment| display_lossy(attachment)),
            )
            .field("time", &self.time)
            .field("traces", &self.traces)
            .field("exist", &self.exist)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn from_error_keeps_structured_error() {
        let record = ExceptionRecord::from_error(
            "opening cache",
            io::Error::new(io::ErrorKind::NotFound, "cache.db"),
            None,
        );
        assert!(record.has_error());
        assert_eq!("opening cache", record.remark());
        assert!(matches!(record.error(), Some(ErrorPayload::Error(_))));
        assert_eq!("cache.db", record.error().unwrap().to_string());
        assert!(record.attachment().is_none());
    }

    #[test]
    fn from_panic_uses_payload_text() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        let record = ExceptionRecord::from_panic("worker", &*payload, None);
        assert!(record.error().unwrap().is_panic());
        assert_eq!("boom", record.error().unwrap().to_string());
    }

    #[test]
    fn ids_are_unique() {
        let a = ExceptionRecord::from_error("a", io::Error::other("a"), None);
        let b = ExceptionRecord::from_error("b", io::Error::other("b"), None);
        assert_ne!(a.id(), b.id());
        assert_eq!(36, a.id().len());
    }

    #[test]
    fn time_is_taken_at_capture() {
        let before = Utc::now().timestamp_millis();
        let record = ExceptionRecord::from_error("t", io::Error::other("t"), None);
        let after = Utc::now().timestamp_millis();
        assert!(before <= record.time() && record.time() <= after);
        assert_eq!(Some(record.time()), record.timestamp().map(|t| t.timestamp_millis()));
    }

    #[derive(Debug)]
    struct Unprintable;

    impl Display for Unprintable {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    impl StdError for Unprintable {}

    #[test]
    fn failing_display_still_renders_whole_report() {
        let attachment: Attachment = Arc::new(Unprintable);
        let record = ExceptionRecord::from_error("unprintable", Unprintable, Some(attachment));

        let formatted = record.format();
        assert!(formatted.starts_with(&format!("Exception({})\n", record.id())));
        assert!(formatted.contains(" - Remark: unprintable\n"));
        assert!(formatted.ends_with(" - Error: \n - Attachment: \n"));

        assert_eq!(formatted, record.to_string());
        assert_eq!(formatted, format!("{}", record));
        assert!(format!("{:?}", record).contains("attachment: Some(\"\")"));
    }

    #[test]
    fn debug_renders_attachment_text() {
        let attachment: Attachment = Arc::new(42);
        let record = ExceptionRecord::from_error("d", io::Error::other("d"), Some(attachment));
        let debug = format!("{:?}", record);
        assert!(debug.contains("attachment: Some(\"42\")"));
    }
}
