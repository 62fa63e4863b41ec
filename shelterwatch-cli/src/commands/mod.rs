//! CLI command implementations.
//!
//! - [`config`] - Configuration display (list, path)
//! - [`init`] - Configuration initialization
//! - [`rank`] - Nearby shelter ranking from a fixed position
//! - [`track`] - Scripted route replay through the tracking pipeline

pub mod common;
pub mod config;
pub mod init;
pub mod rank;
pub mod track;
