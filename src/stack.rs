use crate::models::StackFrame;
use backtrace::Frame;

/// Walk the active call stack.
///
/// The first frame returned belongs to the function calling `capture_stack`, moved
/// `skip_depth` frames further out. Frames are ordered innermost first.
///
/// Platforms without unwind support or debug info are not an error: the result simply holds
/// fewer frames, or frames whose file and line are `None`.
///
/// ```
/// let frames = exception_record::capture_stack(0);
/// for (i, frame) in frames.iter().enumerate() {
///     println!("{}. {}", i + 1, frame);
/// }
/// ```
#[inline(never)]
pub fn capture_stack(skip_depth: usize) -> Vec<StackFrame> {
    let own_address = (capture_stack as fn(usize) -> Vec<StackFrame>) as usize;

    let mut raw = Vec::new();
    backtrace::trace(|frame| {
        raw.push(frame.clone());
        true
    });

    // Frames of the walker itself sit above ours.
    let start = match raw
        .iter()
        .position(|frame| frame.symbol_address() as usize == own_address)
    {
        Some(index) => index + 1,
        None => {
            log::trace!("stack walker frame not found, keeping all {} frames", raw.len());
            0
        }
    };

    // The outermost frame on some platforms is a sentinel without an address.
    raw.iter()
        .skip(start.saturating_add(skip_depth))
        .filter(|frame| !frame.ip().is_null())
        .map(resolve)
        .collect()
}

fn resolve(frame: &Frame) -> StackFrame {
    let mut resolved = StackFrame {
        address: frame.ip() as usize,
        file: None,
        line: None,
    };
    // Inlined calls report several symbols per frame. The first is the innermost.
    backtrace::resolve_frame(frame, |symbol| {
        if resolved.file.is_none() {
            resolved.file = symbol.filename().map(|path| path.display().to_string());
            resolved.line = symbol.lineno();
        }
    });
    resolved
}
