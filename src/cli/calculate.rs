//! Calculate command implementation

use crate::cli::output::{format_parameters_json, format_parameters_table};
use crate::cli::{CalculateArgs, OutputFormat};
use crate::config::TuningDbConfig;
use crate::hardware::HardwareDescription;
use crate::persist::write_artifact;
use crate::tuning::{calculate, render_cnf};

/// Handle `tuning-db calculate`, returning the text to print.
///
/// The `[tuning]` baseline comes from the config file when it exists.
pub fn handle_calculate(args: &CalculateArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        TuningDbConfig::load(Some(&args.config))?
    } else {
        TuningDbConfig::default()
    };
    config.validate()?;

    let hardware = HardwareDescription {
        memory_gb: args.memory.clone(),
        cpus: args.cpus,
        db_type: args.db_type.clone(),
        db_version: args.db_version.clone(),
    };

    let params = calculate(&hardware, &config.tuning)?;
    let cnf = render_cnf(&params);

    if let Some(path) = &args.output {
        write_artifact(path, cnf.as_bytes())?;
    }

    let rendered = match args.format {
        OutputFormat::Cnf => cnf,
        OutputFormat::Json => format_parameters_json(&params)?,
        OutputFormat::Table => format_parameters_table(&params),
    };

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::MemorySize;
    use std::path::PathBuf;

    fn args(memory: MemorySize, format: OutputFormat) -> CalculateArgs {
        CalculateArgs {
            memory,
            cpus: 2,
            db_type: "mysql".to_string(),
            db_version: "8.0".to_string(),
            format,
            output: None,
            config: PathBuf::from("/nonexistent/tuning-db.toml"),
        }
    }

    #[test]
    fn test_calculate_cnf_output() {
        let out = handle_calculate(&args("16 GB".into(), OutputFormat::Cnf)).unwrap();
        assert!(out.starts_with("[mysqld]\n"));
        assert!(out.contains("max_connections=400\n"));
        assert!(out.contains("innodb_buffer_pool_size=11G\n"));
    }

    #[test]
    fn test_calculate_json_output() {
        let out = handle_calculate(&args(MemorySize::Gigabytes(4), OutputFormat::Json)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["max_connections"], 100);
        assert_eq!(value["innodb_buffer_pool_size"], "2G");
    }

    #[test]
    fn test_calculate_invalid_memory() {
        let result = handle_calculate(&args("100GB".into(), OutputFormat::Cnf));
        assert!(result.is_err());
    }

    #[test]
    fn test_calculate_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning_db.cnf");

        let mut a = args("8 GB".into(), OutputFormat::Table);
        a.output = Some(path.clone());
        handle_calculate(&a).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("max_connections=200\n"));
    }

    #[test]
    fn test_calculate_uses_config_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("tuning-db.toml");
        std::fs::write(&config_path, "[tuning]\ninnodb_io_capacity = 1000\n").unwrap();

        let mut a = args("8 GB".into(), OutputFormat::Cnf);
        a.config = config_path;
        let out = handle_calculate(&a).unwrap();

        assert!(out.contains("innodb_io_capacity=1000\n"));
        assert!(out.contains("innodb_io_capacity_max=2000\n"));
    }
}
