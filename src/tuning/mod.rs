//! # Tuning Calculator
//!
//! Turns a [`HardwareDescription`] into a full set of MySQL server
//! parameters. Three values scale linearly with memory, the rest come from
//! the constant [`TuningDefaults`] table.
//!
//! ## Formulas
//!
//! All arithmetic is on whole gigabytes and floors (Euclidean division, so a
//! negative input still rounds down):
//!
//! - `max_connections = floor(ram_gb / 2) * 50`
//! - `innodb_buffer_pool_size = floor(ram_gb * 0.7)` followed by `G`
//! - `read_buffer_size = max(1, floor(ram_gb * 0.1))`
//!
//! ## Example
//!
//! ```rust
//! use tuning_db::hardware::HardwareDescription;
//! use tuning_db::tuning::{calculate, TuningDefaults};
//!
//! let defaults = TuningDefaults::default();
//! let params = calculate(&HardwareDescription::with_memory("16 GB"), &defaults).unwrap();
//! assert_eq!(params.max_connections, 400);
//! assert_eq!(params.innodb_buffer_pool_size, "11G");
//! assert_eq!(params.read_buffer_size, 1);
//! ```

pub mod defaults;
pub mod render;

pub use defaults::TuningDefaults;
pub use render::{parse_cnf, render_cnf, RenderError};

use crate::hardware::{HardwareDescription, HardwareError};
use serde::{Deserialize, Serialize};

/// Gigabytes of RAM budgeted per block of connections.
pub const RAM_GB_PER_CONNECTION_BLOCK: i64 = 2;

/// Connections granted per block of RAM.
pub const CONNECTIONS_PER_BLOCK: i64 = 50;

/// Buffer pool share of RAM, in tenths (70%).
pub const BUFFER_POOL_TENTHS: i64 = 7;

/// Read buffer share of RAM, in tenths (10%).
pub const READ_BUFFER_TENTHS: i64 = 1;

/// Smallest read buffer ever emitted.
pub const MIN_READ_BUFFER_SIZE: i64 = 1;

/// Parameter names in output order.
pub const FIELD_NAMES: [&str; 22] = [
    "max_connections",
    "innodb_buffer_pool_size",
    "innodb_dedicated_server",
    "innodb_change_buffering",
    "slow_query_log",
    "slow_query_log_file",
    "long_query_time",
    "performance_schema",
    "max_allowed_packet",
    "table_open_cache",
    "thread_stack",
    "thread_cache_size",
    "join_buffer_size",
    "sort_buffer_size",
    "tmp_table_size",
    "max_heap_table_size",
    "innodb_flush_method",
    "innodb_file_per_table",
    "innodb_open_files",
    "innodb_io_capacity",
    "innodb_io_capacity_max",
    "read_buffer_size",
];

/// Computed MySQL parameters for one hardware description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningParameters {
    pub max_connections: i64,
    pub innodb_buffer_pool_size: String,
    pub innodb_dedicated_server: String,
    pub innodb_change_buffering: String,
    pub slow_query_log: String,
    pub slow_query_log_file: String,
    pub long_query_time: u32,
    pub performance_schema: u8,
    pub max_allowed_packet: String,
    pub table_open_cache: u32,
    pub thread_stack: String,
    pub thread_cache_size: i32,
    pub join_buffer_size: String,
    pub sort_buffer_size: String,
    pub tmp_table_size: String,
    pub max_heap_table_size: String,
    pub innodb_flush_method: String,
    pub innodb_file_per_table: u8,
    pub innodb_open_files: i32,
    pub innodb_io_capacity: u32,
    pub innodb_io_capacity_max: u32,
    pub read_buffer_size: i64,
}

impl TuningParameters {
    /// `(name, value)` pairs in [`FIELD_NAMES`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let values = [
            self.max_connections.to_string(),
            self.innodb_buffer_pool_size.clone(),
            self.innodb_dedicated_server.clone(),
            self.innodb_change_buffering.clone(),
            self.slow_query_log.clone(),
            self.slow_query_log_file.clone(),
            self.long_query_time.to_string(),
            self.performance_schema.to_string(),
            self.max_allowed_packet.clone(),
            self.table_open_cache.to_string(),
            self.thread_stack.clone(),
            self.thread_cache_size.to_string(),
            self.join_buffer_size.clone(),
            self.sort_buffer_size.clone(),
            self.tmp_table_size.clone(),
            self.max_heap_table_size.clone(),
            self.innodb_flush_method.clone(),
            self.innodb_file_per_table.to_string(),
            self.innodb_open_files.to_string(),
            self.innodb_io_capacity.to_string(),
            self.innodb_io_capacity_max.to_string(),
            self.read_buffer_size.to_string(),
        ];

        FIELD_NAMES.into_iter().zip(values).collect()
    }
}

/// Maximum client connections for `ram_gb`.
pub fn max_connections(ram_gb: i64) -> i64 {
    ram_gb
        .div_euclid(RAM_GB_PER_CONNECTION_BLOCK)
        .saturating_mul(CONNECTIONS_PER_BLOCK)
}

/// Buffer pool size in whole gigabytes, formatted with a `G` suffix.
pub fn innodb_buffer_pool_size(ram_gb: i64) -> String {
    let gb = (i128::from(ram_gb) * i128::from(BUFFER_POOL_TENTHS)).div_euclid(10);
    format!("{}G", gb)
}

/// Read buffer size, never below [`MIN_READ_BUFFER_SIZE`].
pub fn read_buffer_size(ram_gb: i64) -> i64 {
    let size = (i128::from(ram_gb) * i128::from(READ_BUFFER_TENTHS)).div_euclid(10);
    // |size| <= |ram_gb| / 10, so it always fits back into i64
    (size as i64).max(MIN_READ_BUFFER_SIZE)
}

/// Compute parameters for an already normalized memory size.
pub fn calculate_for_gb(ram_gb: i64, defaults: &TuningDefaults) -> TuningParameters {
    if ram_gb <= 0 {
        tracing::warn!(ram_gb, "Non-positive memory size, derived values will be degenerate");
    }

    TuningParameters {
        max_connections: max_connections(ram_gb),
        innodb_buffer_pool_size: innodb_buffer_pool_size(ram_gb),
        innodb_dedicated_server: defaults.innodb_dedicated_server.clone(),
        innodb_change_buffering: defaults.innodb_change_buffering.clone(),
        slow_query_log: defaults.slow_query_log.clone(),
        slow_query_log_file: defaults.slow_query_log_file.clone(),
        long_query_time: defaults.long_query_time,
        performance_schema: defaults.performance_schema,
        max_allowed_packet: defaults.max_allowed_packet.clone(),
        table_open_cache: defaults.table_open_cache,
        thread_stack: defaults.thread_stack.clone(),
        thread_cache_size: defaults.thread_cache_size,
        join_buffer_size: defaults.join_buffer_size.clone(),
        sort_buffer_size: defaults.sort_buffer_size.clone(),
        tmp_table_size: defaults.tmp_table_size.clone(),
        max_heap_table_size: defaults.max_heap_table_size.clone(),
        innodb_flush_method: defaults.innodb_flush_method.clone(),
        innodb_file_per_table: defaults.innodb_file_per_table,
        innodb_open_files: defaults.innodb_open_files,
        innodb_io_capacity: defaults.innodb_io_capacity,
        innodb_io_capacity_max: defaults.innodb_io_capacity_max(),
        read_buffer_size: read_buffer_size(ram_gb),
    }
}

/// Compute parameters for a hardware description.
///
/// Fails only when the memory size cannot be normalized.
pub fn calculate(
    hardware: &HardwareDescription,
    defaults: &TuningDefaults,
) -> Result<TuningParameters, HardwareError> {
    let ram_gb = hardware.memory_gb()?;

    tracing::debug!(
        ram_gb,
        cpus = hardware.cpus,
        db_type = %hardware.db_type,
        db_version = %hardware.db_version,
        "Calculating tuning parameters"
    );

    Ok(calculate_for_gb(ram_gb, defaults))
}
