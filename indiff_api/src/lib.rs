//! Shared indiff data models consumed by the core engine and renderer crates.

pub mod diff;
pub mod file;
pub mod patch;
pub mod report;

pub use diff::*;
pub use file::*;
pub use patch::*;
pub use report::*;
