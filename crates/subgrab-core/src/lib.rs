pub mod config;
pub mod logging;

pub mod blob;
pub mod classify;
pub mod error;
pub mod persist;
pub mod pipeline;
pub mod router;
pub mod select;
pub mod service;
pub mod source;
pub mod vfs;
pub mod walker;
