//! Source location tracking for diagnostics
//!
//! VM source is line-oriented (one instruction per line), so a location is
//! a translation unit name plus a 1-based line number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a VM source unit (line is 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub unit: String,
    pub line: u32,
}

impl SourceLocation {
    /// Create a location within a named unit
    pub fn new(unit: &str, line: u32) -> Self {
        Self {
            unit: unit.to_string(),
            line,
        }
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.unit, self.line)
    }
}
