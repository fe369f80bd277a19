use crate::{
    convert::{display_lossy, is_valid_time_format, millis_to_string},
    models::ExceptionRecord,
    Error,
};
use std::fmt::{self, Write};

/// The default time pattern, `YYYY-MM-DD HH:MM:SS`.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders exception records as multi-line reports.
///
/// Times are always rendered in UTC.
///
/// ```text
/// Exception(<id>)
///  - Time: 2011-01-14 09:51:29
///  - Remark: <remark>
///  - Trace:
///     1. pc = 0x1, file = src/main.rs, line = 24
///     2. pc = 0x2, file = src/lib.rs, line = 16
///  - Error: <error>
///  - Attachment: <attachment>
/// ```
#[derive(Debug, Clone)]
pub struct Formatter {
    time_format: String,
    trace_indent: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    /// Create a formatter with the default time pattern and a tab before each frame.
    pub fn new() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.into(),
            trace_indent: "\t".into(),
        }
    }

    /// Use a custom [strftime] pattern for the capture time.
    ///
    /// ```
    /// let formatter = exception_record::Formatter::new()
    ///     .with_time_format("%d.%m.%Y %H:%M")
    ///     .expect("pattern is valid");
    /// ```
    ///
    /// [strftime]: https://docs.rs/chrono/latest/chrono/format/strftime/index.html
    pub fn with_time_format(mut self, pattern: impl Into<String>) -> Result<Self, Error> {
        let pattern = pattern.into();
        if !is_valid_time_format(&pattern) {
            return Err(Error::InvalidTimeFormat(pattern));
        }
        self.time_format = pattern;
        Ok(self)
    }

    /// Set the prefix written before each stack frame line.
    ///
    /// Default: `"\t"`
    pub fn with_trace_indent(mut self, indent: impl Into<String>) -> Self {
        self.trace_indent = indent.into();
        self
    }

    /// Render `record` to a string.
    pub fn format(&self, record: &ExceptionRecord) -> String {
        let mut out = String::new();
        // Caller supplied values are rendered up front, so writing into a String does not fail.
        let _ = self.write(&mut out, record);
        out
    }

    pub(crate) fn write<W: Write>(&self, out: &mut W, record: &ExceptionRecord) -> fmt::Result {
        writeln!(out, "Exception({})", record.id())?;
        writeln!(
            out,
            " - Time: {}",
            millis_to_string(record.time(), &self.time_format)
        )?;
        writeln!(out, " - Remark: {}", record.remark())?;
        writeln!(out, " - Trace:")?;
        for (i, frame) in record.traces().iter().enumerate() {
            writeln!(out, "{}{}. {}", self.trace_indent, i + 1, frame)?;
        }
        match record.error() {
            Some(error) => writeln!(out, " - Error: {}", display_lossy(error))?,
            None => writeln!(out, " - Error:")?,
        }
        match record.attachment() {
            Some(attachment) => writeln!(out, " - Attachment: {}", display_lossy(attachment)),
            None => writeln!(out, " - Attachment:"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorPayload, StackFrame};
    use std::sync::Arc;

    fn fixed_record() -> ExceptionRecord {
        ExceptionRecord {
            id: "normal_case_id".into(),
            error: Some(ErrorPayload::text("normal_case_err")),
            remark: "normal_case_remark".into(),
            attachment: Some(Arc::new("normal_case_attachment")),
            time: 1294998689000,
            traces: vec![
                StackFrame::new(1, "testing1", 24),
                StackFrame::new(2, "testing2", 16),
            ],
            exist: true,
        }
    }

    #[test]
    fn default_layout() {
        let expected = "Exception(normal_case_id)
 - Time: 2011-01-14 09:51:29
 - Remark: normal_case_remark
 - Trace:
\t1. pc = 0x1, file = testing1, line = 24
\t2. pc = 0x2, file = testing2, line = 16
 - Error: normal_case_err
 - Attachment: normal_case_attachment
";
        assert_eq!(expected, Formatter::new().format(&fixed_record()));
        assert_eq!(expected, fixed_record().format());
        assert_eq!(expected, fixed_record().to_string());
    }

    #[test]
    fn custom_time_format_and_indent() {
        let formatter = Formatter::new()
            .with_time_format("%d/%m/%Y %H:%M")
            .unwrap()
            .with_trace_indent("    ");
        insta::assert_snapshot!(formatter.format(&fixed_record()), @r###"
        Exception(normal_case_id)
         - Time: 14/01/2011 09:51
         - Remark: normal_case_remark
         - Trace:
            1. pc = 0x1, file = testing1, line = 24
            2. pc = 0x2, file = testing2, line = 16
         - Error: normal_case_err
         - Attachment: normal_case_attachment
        "###);
    }

    #[test]
    fn empty_fields() {
        let record = ExceptionRecord {
            id: "empty".into(),
            error: None,
            remark: String::new(),
            attachment: None,
            time: 0,
            traces: Vec::new(),
            exist: false,
        };
        assert_eq!(
            "Exception(empty)\n - Time: 1970-01-01 00:00:00\n - Remark: \n - Trace:\n - Error:\n - Attachment:\n",
            Formatter::new().format(&record)
        );
    }

    #[test]
    fn invalid_time_format_is_rejected() {
        match Formatter::new().with_time_format("%Y-%Q") {
            Err(Error::InvalidTimeFormat(pattern)) => assert_eq!("%Y-%Q", pattern),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
