//! Hardware description error types

use thiserror::Error;

/// Errors raised while normalizing a hardware description
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HardwareError {
    #[error("field 'memory_gb' should be specified in GB, like 'X GB'. Example '1 GB'")]
    InvalidMemoryFormat { value: String },
}
