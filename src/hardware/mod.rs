//! Hardware description input
//!
//! Decodes the request payload describing the target host and normalizes
//! the memory quantity into a whole number of gigabytes.
//!
//! # Example
//!
//! ```rust
//! use tuning_db::hardware::{parse_memory_gb, HardwareDescription};
//!
//! assert_eq!(parse_memory_gb("16 GB").unwrap(), 16);
//! assert!(parse_memory_gb("100GB").is_err());
//!
//! let hw: HardwareDescription =
//!     serde_json::from_str(r#"{"memory_gb": "4 GB", "cpus": 2}"#).unwrap();
//! assert_eq!(hw.memory_gb().unwrap(), 4);
//! ```

pub mod error;

pub use error::HardwareError;

use serde::{Deserialize, Serialize};

/// Unit suffix every textual memory size must end with.
pub const MEMORY_UNIT_SUFFIX: &str = " GB";

/// Memory size as sent by clients: either `"16 GB"` or a bare `16`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemorySize {
    Gigabytes(i64),
    Text(String),
}

impl MemorySize {
    /// Resolve to a gigabyte count.
    pub fn to_gb(&self) -> Result<i64, HardwareError> {
        match self {
            MemorySize::Gigabytes(gb) => Ok(*gb),
            MemorySize::Text(s) => parse_memory_gb(s),
        }
    }
}

impl From<&str> for MemorySize {
    fn from(s: &str) -> Self {
        MemorySize::Text(s.to_string())
    }
}

impl From<i64> for MemorySize {
    fn from(gb: i64) -> Self {
        MemorySize::Gigabytes(gb)
    }
}

/// Hardware the tuning is computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareDescription {
    pub memory_gb: MemorySize,
    #[serde(default, alias = "vcpus")]
    pub cpus: u32,
    #[serde(default)]
    pub db_type: String,
    #[serde(default)]
    pub db_version: String,
}

impl HardwareDescription {
    /// Description with only a memory size set.
    pub fn with_memory(memory: impl Into<MemorySize>) -> Self {
        Self {
            memory_gb: memory.into(),
            cpus: 0,
            db_type: String::new(),
            db_version: String::new(),
        }
    }

    /// Normalized memory size in gigabytes.
    pub fn memory_gb(&self) -> Result<i64, HardwareError> {
        self.memory_gb.to_gb()
    }
}

/// Parse a memory string of the form `"X GB"` into `X`.
///
/// The string must end with the 3-character suffix `" GB"` (unit letters
/// compared case-insensitively) and everything before it must be a base-10
/// integer. Zero and negative values are returned as-is.
pub fn parse_memory_gb(value: &str) -> Result<i64, HardwareError> {
    let invalid = || HardwareError::InvalidMemoryFormat {
        value: value.to_string(),
    };

    let suffix_len = MEMORY_UNIT_SUFFIX.len();
    if value.len() <= suffix_len || !value.is_char_boundary(value.len() - suffix_len) {
        return Err(invalid());
    }

    let (magnitude, unit) = value.split_at(value.len() - suffix_len);
    if !unit.eq_ignore_ascii_case(MEMORY_UNIT_SUFFIX) {
        return Err(invalid());
    }

    magnitude.parse::<i64>().map_err(|_| invalid())
}
