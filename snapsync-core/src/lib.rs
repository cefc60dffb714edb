//! Snapsync core library — project root, invocation stamps, configuration,
//! service dispatch, errors.
//!
//! - [`root`] — [`ProjectRoot`]
//! - [`stamp`] — [`Stamp`]
//! - [`config`] — [`SnapConfig`] load / validate
//! - [`service`] — [`Service`] launch table
//! - [`error`] — [`CoreError`]

pub mod config;
pub mod error;
pub mod root;
pub mod service;
pub mod stamp;

pub use config::{CodeConfig, DataConfig, LaunchConfig, SnapConfig};
pub use error::CoreError;
pub use root::ProjectRoot;
pub use service::Service;
pub use stamp::Stamp;
