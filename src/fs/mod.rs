//! Filesystem utilities.

pub mod atomic;

pub use atomic::atomic_write_file;
