use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use vartx_core::models::Variant;
use vartx_core::utils::{get_dynamic_reader_w_stdin, get_dynamic_writer, read_call_set_list};
use vartx_transform::consts::DEFAULT_BATCH_SIZE;
use vartx_transform::{RefMatchOutput, TransformConfig, Transformer};

///
/// Load the run configuration from `--config` (if given) and point it at the
/// `--cohorts` file (if given).
///
pub fn load_config(matches: &ArgMatches) -> Result<TransformConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => TransformConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => TransformConfig::default(),
    };

    if let Some(cohorts) = matches.get_one::<String>("cohorts") {
        config.cohort_file = Some(PathBuf::from(cohorts));
    }

    Ok(config)
}

/// Apply the transform flags on top of the loaded configuration.
fn apply_overrides(config: &mut TransformConfig, matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("omit-low-quality-calls") {
        config.omit_low_quality_calls = true;
    }
    if matches.get_flag("no-ref-match-summary") {
        config.summarize_ref_match_callsets = false;
    }
    if matches.get_flag("non-snp-frequencies") {
        config.compute_frequency_for_non_snps = true;
    }
    if let Some(mode) = matches.get_one::<String>("ref-match-output") {
        config.ref_match_output = RefMatchOutput::from_str(mode).map_err(anyhow::Error::msg)?;
    }
    if let Some(exclude) = matches.get_one::<String>("exclude") {
        let names = read_call_set_list(exclude)
            .with_context(|| format!("Failed to read call set list {}", exclude))?;
        config.excluded_call_sets.extend(names);
    }
    Ok(())
}

pub fn run_transform(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("An input path is required.");
    let output = matches.get_one::<String>("output");
    let batch_size = matches
        .get_one::<usize>("batch-size")
        .copied()
        .unwrap_or(DEFAULT_BATCH_SIZE);
    if batch_size == 0 {
        anyhow::bail!("--batch-size must be at least 1");
    }

    if let Some(threads) = matches.get_one::<usize>("threads") {
        rayon::ThreadPoolBuilder::new()
            .num_threads(*threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let mut config = load_config(matches)?;
    apply_overrides(&mut config, matches)?;

    let transformer = Transformer::from_config(config)?;
    info!(
        "Transforming {} with {} cohort(s), batch size {}",
        input,
        transformer.cohorts().len(),
        batch_size
    );

    let reader = get_dynamic_reader_w_stdin(input)?;
    let mut writer = get_dynamic_writer(output.map(String::as_str))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg} ({per_sec})")?
            .tick_strings(&["-", "\\", "|", "/"]),
    );
    spinner.set_message("Transforming variants...");

    transform_stream(&transformer, reader, &mut writer, batch_size, &spinner)?;
    writer.flush()?;

    let summary = transformer.counters().snapshot();
    spinner.finish_with_message(format!("Wrote {} rows", summary.rows_emitted));

    info!(
        "Read {} variants, wrote {} rows ({} without passing calls, {} without calls)",
        summary.variants_read,
        summary.rows_emitted,
        summary.variants_without_passing_calls,
        summary.variants_without_calls
    );
    info!(
        "Removed {} low-quality and {} excluded calls",
        summary.calls_failing_quality, summary.calls_excluded
    );
    if summary.variants_with_ambiguous_calls > 0 {
        warn!(
            "{} variants were flagged with ambiguous calls",
            summary.variants_with_ambiguous_calls
        );
    }

    Ok(())
}

///
/// Read JSON records line by line, transform them in batches and write one
/// JSON row per line.
///
pub fn transform_stream<R: BufRead, W: Write>(
    transformer: &Transformer,
    reader: R,
    writer: &mut W,
    batch_size: usize,
    spinner: &ProgressBar,
) -> Result<()> {
    let mut batch: Vec<Variant> = Vec::with_capacity(batch_size);

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let variant = Variant::from_json(&line)
            .with_context(|| format!("Failed to parse variant record on line {}", idx + 1))?;
        batch.push(variant);

        if batch.len() == batch_size {
            let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
            write_batch(transformer, full, writer)?;
            spinner.inc(batch_size as u64);
        }
    }

    if !batch.is_empty() {
        let remaining = batch.len() as u64;
        write_batch(transformer, batch, writer)?;
        spinner.inc(remaining);
    }

    Ok(())
}

fn write_batch<W: Write>(
    transformer: &Transformer,
    batch: Vec<Variant>,
    writer: &mut W,
) -> Result<()> {
    for row in transformer.transform_batch(batch)? {
        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
