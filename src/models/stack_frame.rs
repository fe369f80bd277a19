use serde::{Deserialize, Serialize};
use std::fmt;

/// One call site in the active call chain at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    /// Program counter. Only meaningful for display.
    pub address: usize,

    /// Source file path, if debug info could resolve it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Source line number, if debug info could resolve it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl StackFrame {
    /// Create a fully resolved frame.
    pub fn new(address: usize, file: impl Into<String>, line: u32) -> Self {
        Self {
            address,
            file: Some(file.into()),
            line: Some(line),
        }
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pc = {:#x}, file = {}, line = ",
            self.address,
            self.file.as_deref().unwrap_or("?")
        )?;
        match self.line {
            Some(line) => write!(f, "{}", line),
            None => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(StackFrame::new(0x1, "src/main.rs", 24), "pc = 0x1, file = src/main.rs, line = 24" ; "resolved")]
    #[test_case(StackFrame { address: 0xdead, file: None, line: None }, "pc = 0xdead, file = ?, line = ?" ; "unresolved")]
    fn display(frame: StackFrame, expected: &'static str) {
        assert_eq!(expected, frame.to_string());
    }
}
