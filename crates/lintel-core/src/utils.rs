//! Utility functions for rule implementations.

/// Whether a dot-qualified type name denotes the designated type.
///
/// Matches exactly, or as the qualified tail of a longer name: `Context`
/// matches `app.Context` but not `AppContext`.
#[must_use]
pub fn type_matches(ty: &str, designated: &str) -> bool {
    if ty == designated {
        return true;
    }
    ty.len() > designated.len()
        && ty.ends_with(designated)
        && ty.as_bytes()[ty.len() - designated.len() - 1] == b'.'
}
