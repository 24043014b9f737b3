//! Version string helpers
//!
//! Versions are written as zero-padded six digit strings (`000042`) and
//! compared as integers.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Width of a zero-padded version string
pub const VERSION_WIDTH: usize = 6;

/// Parse a version string into its numeric value
pub fn parse_version(version: &str) -> CoreResult<u64> {
    let trimmed = version.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidVersion {
            version: version.to_string(),
            reason: "expected a non-negative integer".to_string(),
        });
    }
    trimmed.parse::<u64>().map_err(|e| CoreError::InvalidVersion {
        version: version.to_string(),
        reason: e.to_string(),
    })
}

/// Left-pad a numeric version to [`VERSION_WIDTH`] digits (`42` -> `000042`)
pub fn pad_version(version: &str) -> CoreResult<String> {
    let trimmed = version.trim();
    parse_version(trimmed)?;
    if trimmed.len() > VERSION_WIDTH {
        return Err(CoreError::InvalidVersion {
            version: version.to_string(),
            reason: format!("at most {} digits allowed", VERSION_WIDTH),
        });
    }
    Ok(format!("{:0>width$}", trimmed, width = VERSION_WIDTH))
}

/// A persisted version cursor
///
/// Used both for the data migration cursor and for the version reported by
/// the schema-migration tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionState {
    /// Last applied version, 0 when nothing has been applied
    pub version: u64,

    /// Set while a step is in flight; a dirty state must be fixed by hand
    pub dirty: bool,
}

impl VersionState {
    /// A clean state at `version`
    pub fn clean(version: u64) -> Self {
        Self {
            version,
            dirty: false,
        }
    }

    /// A dirty state at `version`
    pub fn dirty(version: u64) -> Self {
        Self {
            version,
            dirty: true,
        }
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dirty {
            write!(f, "{} (dirty)", self.version)
        } else {
            write!(f, "{}", self.version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("000001").unwrap(), 1);
        assert_eq!(parse_version("42").unwrap(), 42);
        assert_eq!(parse_version(" 7 ").unwrap(), 7);
    }

    #[test]
    fn test_parse_version_rejects_non_numeric() {
        for bad in ["", "abc", "1.0", "-1", "+3", "12a"] {
            assert!(
                matches!(parse_version(bad), Err(CoreError::InvalidVersion { .. })),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_pad_version() {
        assert_eq!(pad_version("1").unwrap(), "000001");
        assert_eq!(pad_version("123456").unwrap(), "123456");
        assert!(pad_version("1234567").is_err());
        assert!(pad_version("v1").is_err());
    }

    #[test]
    fn test_version_state_display() {
        assert_eq!(VersionState::clean(3).to_string(), "3");
        assert_eq!(VersionState::dirty(3).to_string(), "3 (dirty)");
        assert_eq!(VersionState::default(), VersionState::clean(0));
    }
}
