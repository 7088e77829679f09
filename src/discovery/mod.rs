//! File discovery

pub mod scanner;

pub use scanner::{scan, SourceFile};
