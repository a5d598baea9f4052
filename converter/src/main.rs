//! excel2sql CLI - turn a spreadsheet into one SQL INSERT file
//!
//! ```bash
//! excel2sql stations.xlsx                     # built-in schema, writes ./<table>_<YYYYMMDD_HHmm>.sql
//! excel2sql stations.csv -c schema.json       # custom schema
//! excel2sql stations.xlsx --dry-run           # print the statement instead
//! excel2sql --example-config > schema.json    # start a schema from the built-in one
//! ```
//!
//! Every failure exits with status 1.

use clap::Parser;
use excel2sql::logs::{log_error, log_info, log_success, set_json};
use excel2sql::{convert_file, example_schema, PipelineResult, RunConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "excel2sql", version)]
#[command(about = "Convert the first sheet of a spreadsheet into a SQL INSERT statement", long_about = None)]
struct Cli {
    /// Spreadsheet to convert (.xlsx, .xls, .ods, .csv, ...)
    input: Option<PathBuf>,

    /// Schema JSON file (default: $EXCEL2SQL_SCHEMA, then the built-in schema)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the .sql file (default: $EXCEL2SQL_OUTPUT_DIR, then .)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the statement to stdout instead of writing a file
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Print the built-in schema as JSON and exit
    #[arg(long)]
    example_config: bool,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            std::process::exit(code);
        }
    };

    set_json(cli.json_logs);

    if let Err(e) = run(cli) {
        log_error(e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> PipelineResult<()> {
    if cli.example_config {
        println!("{}", example_schema().to_json()?);
        return Ok(());
    }

    let config = RunConfig::resolve(
        cli.input,
        cli.config,
        cli.output_dir,
        cli.dry_run,
        |key| std::env::var_os(key),
    )?;

    let registry = config.load_registry()?;
    log_info(format!(
        "   Table: {} ({} columns, {} key group(s))",
        registry.meta().table_name,
        registry.columns().len(),
        registry.key_groups().len()
    ));

    let report = convert_file(&config.input, &registry, &config.options)?;

    match report.path {
        Some(path) => log_success(format!(
            "✨ Done: {} rows written to {}",
            report.statement.row_count,
            path.display()
        )),
        None => println!("{}", report.statement.sql),
    }

    Ok(())
}
