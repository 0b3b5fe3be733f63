//! Library components of the `enrol` command-line uploader.

pub mod logging;
pub mod summary;
