//! Baseline MySQL parameters that do not depend on the hardware

use serde::{Deserialize, Serialize};

/// Constant part of every tuning result.
///
/// Loaded once from the `[tuning]` config section at startup and shared
/// read-only afterwards. `innodb_io_capacity_max` is not stored; it is
/// always twice `innodb_io_capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningDefaults {
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
}

impl Default for TuningDefaults {
    fn default() -> Self {
        Self {
            innodb_dedicated_server: "ON".to_string(),
            innodb_change_buffering: "none".to_string(),
            slow_query_log: "ON".to_string(),
            slow_query_log_file: "/var/log/mysql/slow_queries.log".to_string(),
            long_query_time: 10,
            performance_schema: 1,
            max_allowed_packet: "64M".to_string(),
            table_open_cache: 2000,
            thread_stack: "256K".to_string(),
            thread_cache_size: -1,
            join_buffer_size: "2M".to_string(),
            sort_buffer_size: "2M".to_string(),
            tmp_table_size: "16M".to_string(),
            max_heap_table_size: "16M".to_string(),
            innodb_flush_method: "O_DIRECT".to_string(),
            innodb_file_per_table: 1,
            innodb_open_files: -1,
            innodb_io_capacity: 200,
        }
    }
}

impl TuningDefaults {
    /// Upper bound for background I/O, twice the base capacity.
    pub fn innodb_io_capacity_max(&self) -> u32 {
        self.innodb_io_capacity.saturating_mul(2)
    }

    /// Check that the table can be rendered into a loadable cnf file.
    ///
    /// Returns the offending field name and a message.
    pub fn validate(&self) -> Result<(), (&'static str, String)> {
        let text_fields: [(&'static str, &str); 11] = [
            ("innodb_dedicated_server", &self.innodb_dedicated_server),
            ("innodb_change_buffering", &self.innodb_change_buffering),
            ("slow_query_log", &self.slow_query_log),
            ("slow_query_log_file", &self.slow_query_log_file),
            ("max_allowed_packet", &self.max_allowed_packet),
            ("thread_stack", &self.thread_stack),
            ("join_buffer_size", &self.join_buffer_size),
            ("sort_buffer_size", &self.sort_buffer_size),
            ("tmp_table_size", &self.tmp_table_size),
            ("max_heap_table_size", &self.max_heap_table_size),
            ("innodb_flush_method", &self.innodb_flush_method),
        ];

        for (name, value) in text_fields {
            if value.trim().is_empty() {
                return Err((name, "value cannot be empty".to_string()));
            }
            if value.contains('\n') || value.contains('\r') {
                return Err((name, "value must be a single line".to_string()));
            }
        }

        if self.innodb_io_capacity == 0 {
            return Err((
                "innodb_io_capacity",
                "I/O capacity must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
