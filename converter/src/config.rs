//! Run configuration: command-line values with environment fallbacks.
//!
//! | Setting    | Flag              | Environment            | Default          |
//! |------------|-------------------|------------------------|------------------|
//! | schema     | `--config`        | `EXCEL2SQL_SCHEMA`     | built-in example |
//! | output dir | `--output-dir`    | `EXCEL2SQL_OUTPUT_DIR` | `.`              |
//!
//! A `.env` file in the working directory is loaded by the binary before the
//! environment is read.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};
use crate::logs::log_info;
use crate::schema::{example_schema, SchemaConfig, SchemaRegistry};
use crate::transform::ConvertOptions;

pub const SCHEMA_ENV: &str = "EXCEL2SQL_SCHEMA";
pub const OUTPUT_DIR_ENV: &str = "EXCEL2SQL_OUTPUT_DIR";

pub const USAGE: &str = "excel2sql <path-to-spreadsheet>";

/// Settings for one run after flags and environment are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    /// `None` selects the built-in example schema
    pub schema_path: Option<PathBuf>,
    pub options: ConvertOptions,
}

impl RunConfig {
    /// Merge flags with `env` (normally `std::env::var_os`). Flags win.
    pub fn resolve<E>(
        input: Option<PathBuf>,
        schema_path: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        dry_run: bool,
        env: E,
    ) -> PipelineResult<Self>
    where
        E: Fn(&str) -> Option<OsString>,
    {
        let input = input.ok_or_else(|| PipelineError::Usage(USAGE.to_string()))?;

        let schema_path = schema_path.or_else(|| env(SCHEMA_ENV).map(PathBuf::from));
        let output_dir = output_dir
            .or_else(|| env(OUTPUT_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| ConvertOptions::default().output_dir);

        Ok(Self {
            input,
            schema_path,
            options: ConvertOptions { output_dir, dry_run },
        })
    }

    /// Load the configured schema, or the built-in one.
    pub fn load_registry(&self) -> PipelineResult<SchemaRegistry> {
        let config = match &self.schema_path {
            Some(path) => {
                log_info(format!("🗂️  Schema: {}", path.display()));
                SchemaConfig::load(path)?
            }
            None => {
                log_info("🗂️  Schema: built-in example (drprg_location_subway)");
                example_schema()
            }
        };
        Ok(config.into_registry()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<OsString> {
        None
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        let err = RunConfig::resolve(None, None, None, false, no_env).unwrap_err();
        assert!(matches!(err, PipelineError::Usage(msg) if msg == USAGE));
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::resolve(Some("in.xlsx".into()), None, None, false, no_env).unwrap();
        assert_eq!(config.input, PathBuf::from("in.xlsx"));
        assert_eq!(config.schema_path, None);
        assert_eq!(config.options, ConvertOptions::default());
    }

    #[test]
    fn test_env_fallback() {
        let env = |key: &str| match key {
            SCHEMA_ENV => Some(OsString::from("schema.json")),
            OUTPUT_DIR_ENV => Some(OsString::from("out")),
            _ => None,
        };
        let config = RunConfig::resolve(Some("in.csv".into()), None, None, true, env).unwrap();
        assert_eq!(config.schema_path, Some(PathBuf::from("schema.json")));
        assert_eq!(config.options.output_dir, PathBuf::from("out"));
        assert!(config.options.dry_run);
    }

    #[test]
    fn test_flags_override_env() {
        let env = |_: &str| Some(OsString::from("from-env"));
        let config = RunConfig::resolve(
            Some("in.csv".into()),
            Some("flag.json".into()),
            Some("flag-dir".into()),
            false,
            env,
        )
        .unwrap();
        assert_eq!(config.schema_path, Some(PathBuf::from("flag.json")));
        assert_eq!(config.options.output_dir, PathBuf::from("flag-dir"));
    }

    #[test]
    fn test_load_builtin_registry() {
        crate::logs::set_quiet(true);
        let config = RunConfig::resolve(Some("in.xlsx".into()), None, None, false, no_env).unwrap();
        let registry = config.load_registry().unwrap();
        assert_eq!(registry.meta().table_name, "drprg_location_subway");
    }
}
