mod error_payload;
mod exception_record;
mod stack_frame;

pub use error_payload::*;
pub use exception_record::*;
pub use stack_frame::*;
