mod schema;
mod transform;

use anyhow::Result;
use clap::{ArgMatches, Command, arg};
use tracing_subscriber::{EnvFilter, fmt};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "vartx";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Transform merged non-variant segment data into flat variant rows with per-cohort allele statistics.")
        .subcommand_required(true)
        .arg(
            arg!(--"log-level" <LEVEL>)
                .help("Log filter, e.g. 'debug' or 'vartx_transform=debug'. Defaults to RUST_LOG, then 'info'")
                .global(true),
        )
        .subcommand(transform::cli::create_transform_cli())
        .subcommand(schema::cli::create_schema_cli())
}

/// Log filter from `--log-level`, else `RUST_LOG`, else the default level.
fn log_filter(matches: &ArgMatches) -> EnvFilter {
    match matches.get_one::<String>("log-level") {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(consts::DEFAULT_LOG_LEVEL))
}

fn init_logging(matches: &ArgMatches) {
    let filter = log_filter(matches);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // TRANSFORM
        //
        Some((transform::cli::TRANSFORM_CMD, matches)) => {
            transform::handlers::run_transform(matches)?;
        }

        //
        // SCHEMA
        //
        Some((schema::cli::SCHEMA_CMD, matches)) => {
            schema::handlers::run_schema(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
