//! Command-line interface module.

mod args;
pub mod init;
pub mod inject;
pub mod list;
pub mod sync;
pub mod toggle;

pub use args::{AssetTarget, Cli, Commands, InjectArgs};
