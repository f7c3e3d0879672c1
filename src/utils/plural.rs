//! Pluralization for log lines.

/// `"asset"` -> `"0 assets"`, `"1 asset"`, `"3 assets"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
