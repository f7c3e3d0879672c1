//! Asset categories and discovery.

mod category;
mod scan;

pub use category::{AssetCategory, UnknownCategory};

// Scanning (pure functions)
pub use scan::{AssetScan, scan_all, scan_category};
