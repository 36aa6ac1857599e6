use clap::{Command, arg};

pub const SCHEMA_CMD: &str = "schema";

pub fn create_schema_cli() -> Command {
    Command::new(SCHEMA_CMD)
        .about("Print the output table schema as JSON.")
        .arg(arg!(--config <config>).help("TOML run configuration"))
        .arg(arg!(--cohorts <cohorts>).help("Cohort file of 'call_set_name<TAB>cohort' lines"))
}
