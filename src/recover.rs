use crate::models::{Attachment, ErrorPayload, ExceptionRecord};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

/// Run `f`, converting a panic inside it into an exception record.
///
/// If `f` returns normally its value is returned and `destination` is left untouched. If `f`
/// panics, the panic stops here: `destination` receives a record whose error is the panic
/// message, and `None` is returned. `Err` values returned by `f` are not panics and pass
/// through unchanged.
///
/// The panic hook still runs before the record is built, so the default hook prints the panic
/// to stderr as usual. Nothing is recovered when the binary is built with `panic = "abort"`.
///
/// ```
/// use exception_record::{recover_into, ExceptionRecord};
///
/// let mut record: Option<ExceptionRecord> = None;
/// let value: Option<u32> = recover_into(&mut record, "loading plugin", None, || {
///     panic!("plugin table is corrupt")
/// });
/// assert!(value.is_none());
/// let record = record.unwrap();
/// assert_eq!("loading plugin", record.remark());
/// assert_eq!("plugin table is corrupt", record.error().unwrap().to_string());
/// ```
#[inline(never)]
pub fn recover_into<F, R>(
    destination: &mut Option<ExceptionRecord>,
    remark: impl Into<String>,
    attachment: Option<Attachment>,
    f: F,
) -> Option<R>
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            let record = ExceptionRecord::capture(
                remark.into(),
                ErrorPayload::Panic(panic_message(&*payload)),
                attachment,
                1,
            );
            log::debug!("recovered from panic as exception {}", record.id());
            *destination = Some(record);
            None
        }
    }
}

/// Text of a panic payload.
///
/// `panic!` with a literal or with format arguments produces a `&'static str` or a `String`
/// payload, which is returned verbatim. Any other payload renders as `Box<dyn Any>`.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_owned()
    }
}
