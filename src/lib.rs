//! Capture errors and panics as structured exception records.
//!
//! An [`ExceptionRecord`] holds a random identifier, a remark, an attachment, the capture time
//! and the call stack at the point the error was observed. Records render as a multi-line
//! report for logs, and encode to JSON.
//!
//! # Usage
//!
//! Capture an error:
//!
//! ```rust
//! use exception_record::{new_record, ErrorPayload};
//! use std::sync::Arc;
//!
//! fn read_settings() -> Result<String, std::io::Error> {
//!     std::fs::read_to_string("/definitely/not/here.toml")
//! }
//!
//! let error = read_settings().err().map(ErrorPayload::from_error);
//! if let Some(record) = new_record("loading settings", error, Some(Arc::new("attempt 1"))) {
//!     record.log();
//!     println!("{}", record);
//! }
//! ```
//!
//! Convert a panic into a record at the top of a unit of work:
//!
//! ```rust
//! use exception_record::recover_into;
//!
//! let mut record = None;
//! recover_into(&mut record, "handling job 7", None, || {
//!     let jobs: Vec<u32> = Vec::new();
//!     jobs[7]
//! });
//! assert!(record.map_or(false, |r| r.has_error()));
//! ```
//!
//! # Report layout
//!
//! | Line            | Content                                                   |
//! | --------------- | --------------------------------------------------------- |
//! | `Exception(..)` | Record identifier (UUID v4)                               |
//! | `Time`          | Capture time in UTC, `%Y-%m-%d %H:%M:%S` unless configured |
//! | `Remark`        | Remark given at capture time                              |
//! | `Trace`         | Stack frames, innermost first, numbered from 1            |
//! | `Error`         | Error or panic message                                    |
//! | `Attachment`    | `Display` output of the attachment                        |
//!
//! Use [`Formatter`] to change the time pattern or the frame indentation.
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade. [`ExceptionRecord::log`] writes the report at
//! error level with target `exception_record`; recovered panics are noted at debug level.
#![doc(html_root_url = "https://docs.rs/exception-record/0.1.0")]
#![deny(missing_docs, unreachable_pub, missing_debug_implementations)]

mod convert;
mod error;
mod formatter;
mod models;
mod recover;
mod stack;

pub use error::Error;
pub use formatter::{Formatter, DEFAULT_TIME_FORMAT};
pub use models::{Attachment, ErrorPayload, ExceptionRecord, StackFrame};
pub use recover::{panic_message, recover_into};
pub use stack::capture_stack;

/// Capture an error as an exception record.
///
/// Returns `None` when there is no error, so a record always describes an actual error. The
/// stack starts at the caller of `new_record`. The attachment is stored as given.
///
/// ```
/// use exception_record::new_record;
///
/// assert!(new_record("nothing went wrong", None, None).is_none());
///
/// let record = new_record("parsing header", Some("unexpected byte 0x7f".into()), None).unwrap();
/// assert!(record.has_error());
/// ```
#[inline(never)]
pub fn new_record(
    remark: impl Into<String>,
    error: Option<ErrorPayload>,
    attachment: Option<Attachment>,
) -> Option<ExceptionRecord> {
    let error = error?;
    Some(ExceptionRecord::capture(remark.into(), error, attachment, 1))
}
