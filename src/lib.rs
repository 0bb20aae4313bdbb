//! Renders a wire-format DNS message as a `dig`-style text report.

pub mod byte_packet_buffer;
pub mod error;
pub mod format;
pub mod mnemonics;
pub mod parser;
pub mod report;
pub mod structure;

pub use error::ParseError;
pub use parser::Parser;
pub use report::render;
