use clap::{Arg, ArgAction, Command, arg, value_parser};

use vartx_transform::consts::DEFAULT_BATCH_SIZE;

pub const TRANSFORM_CMD: &str = "transform";

pub fn create_transform_cli() -> Command {
    Command::new(TRANSFORM_CMD)
        .about("Filter calls, flag ambiguous variants and compute per-cohort AN/AC/AF for newline-delimited JSON variant records.")
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(true)
                .help("Variant records, one JSON object per line (.gz supported). Use '-' for stdin"),
        )
        .arg(
            arg!(--output <output>)
                .short('o')
                .help("Output path for JSON rows (.gz compresses). Defaults to stdout"),
        )
        .arg(arg!(--config <config>).help("TOML run configuration"))
        .arg(
            arg!(--cohorts <cohorts>)
                .help("Cohort file of 'call_set_name<TAB>cohort' lines. Replaces cohort_file from the config"),
        )
        .arg(arg!(--exclude <exclude>).help("File of call set names to exclude, one per line"))
        .arg(
            arg!(--"omit-low-quality-calls")
                .help("Drop calls whose FILTER does not contain PASS")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--"no-ref-match-summary")
                .help("Keep reference-matching calls as call rows instead of summarizing them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--"ref-match-output" <mode>)
                .help("How summarized reference matches are reported")
                .value_parser(["callsets", "counts", "both"]),
        )
        .arg(
            arg!(--"non-snp-frequencies")
                .help("Compute AN and AF for non-SNP variants too")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(--"batch-size" <n>)
                .help(format!("Records per parallel batch [default: {}]", DEFAULT_BATCH_SIZE))
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--threads <n>)
                .help("Worker threads. Defaults to one per core")
                .value_parser(value_parser!(usize)),
        )
}
