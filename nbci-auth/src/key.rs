//! License key syntax checks.
//!
//! Keys are opaque strings issued by the licensing server. The only
//! structure the client relies on is the `nbci_` prefix and a minimum
//! length; everything else is the server's business.

/// Prefix every NBCI license key starts with.
pub const KEY_PREFIX: &str = "nbci_";

/// Minimum total length of a well-formed key.
pub const MIN_KEY_LEN: usize = 12;

/// Returns true if the key is syntactically well-formed.
///
/// A format check only — a well-formed key says nothing about whether
/// the license behind it is actually valid.
#[must_use]
pub fn is_well_formed(key: &str) -> bool {
    let key = key.trim();
    key.starts_with(KEY_PREFIX) && key.len() >= MIN_KEY_LEN
}
