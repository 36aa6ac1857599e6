use std::io::Write;

use anyhow::Result;
use clap::ArgMatches;

use vartx_transform::table_schema;

use crate::transform::handlers::load_config;

pub fn run_schema(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let cohorts = config.load_cohorts()?;

    let schema = table_schema(&config, &cohorts);

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &schema)?;
    writeln!(stdout)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use rstest::*;
    use tempfile::tempdir;

    use crate::schema::cli::create_schema_cli;

    #[rstest]
    fn test_run_schema_with_cohorts() {
        let dir = tempdir().unwrap();
        let cohorts = dir.path().join("cohorts.tsv");
        fs::write(&cohorts, "NA12878\tCEU\n").unwrap();

        let matches = create_schema_cli()
            .try_get_matches_from(["schema", "--cohorts", cohorts.to_str().unwrap()])
            .unwrap();
        run_schema(&matches).unwrap();
    }

    #[rstest]
    fn test_missing_config_is_an_error() {
        let matches = create_schema_cli()
            .try_get_matches_from(["schema", "--config", "does/not/exist.toml"])
            .unwrap();
        assert!(run_schema(&matches).is_err());
    }
}
