//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the diff core and the host
//! (process execution, filesystem). Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod shell;

pub use filesystem::FileSystem;
pub use shell::{ShellExecutor, ShellOutput};
