//! End-to-end: exported JSON records + TOML config + cohort file → output rows

use std::fs;
use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

use vartx_core::models::Variant;
use vartx_transform::{TransformConfig, TransformError, Transformer, table_schema};

const RECORDS: &str = r#"{"variant_id": "CJDn8Zr9ExC", "reference_name": "chr17", "start": "41196840", "end": "41196841", "reference_bases": "G", "alternate_bases": ["T"], "quality": 85.68, "filter": ["PASS"], "call": [{"call_set_name": "NA12879", "genotype": [0, 1], "info": {"FILTER": ["PASS"], "DP": "44"}}, {"call_set_name": "NA12878", "genotype": [0, 0], "info": {"FILTER": "PASS"}}, {"call_set_name": "NA12877", "genotype": [1, 1], "info": {"FILTER": ["LowQD"]}}]}
{"variant_id": "dup", "reference_name": "chr17", "start": 41196900, "end": 41196901, "reference_bases": "C", "alternate_bases": ["A", "T"], "overlappingCallsets": ["NA12891"], "call": [{"call_set_name": "NA12879", "genotype": [1, 2], "info": {"FILTER": ["PASS"]}}, {"call_set_name": "NA12879", "genotype": [-1, -1], "info": {"FILTER": ["PASS"]}}]}
{"variant_id": "nvs", "reference_name": "chr17", "start": 41197000, "end": 41197100, "reference_bases": "A", "alternate_bases": ["<NON_REF>"], "call": [{"call_set_name": "NA12878", "genotype": [0, 0], "info": {"FILTER": ["LowGQX"]}}]}
{"variant_id": "excluded", "reference_name": "chr17", "start": 41197200, "end": 41197201, "reference_bases": "A", "alternate_bases": ["AT"], "call": [{"call_set_name": "NA12893", "genotype": [0, 1], "info": {"FILTER": ["PASS"]}}]}
"#;

struct Fixture {
    _dir: TempDir,
    config: TransformConfig,
}

#[fixture]
fn fixture() -> Fixture {
    let dir = tempdir().unwrap();

    let cohort_path = dir.path().join("cohorts.tsv");
    {
        let mut f = fs::File::create(&cohort_path).unwrap();
        writeln!(f, "# call_set_name\tcohort").unwrap();
        writeln!(f, "NA12877\tCEPH").unwrap();
        writeln!(f, "NA12878\tCEPH").unwrap();
        writeln!(f, "NA12891\tCEPH").unwrap();
        writeln!(f, "NA12879\tKIDS").unwrap();
    }

    let config_path = dir.path().join("vartx.toml");
    fs::write(
        &config_path,
        format!(
            "omit_low_quality_calls = true\nref_match_output = \"both\"\nexcluded_call_sets = [\"NA12893\"]\ncohort_file = {:?}\n",
            cohort_path
        ),
    )
    .unwrap();

    let config = TransformConfig::from_toml_file(&config_path).unwrap();
    Fixture { _dir: dir, config }
}

fn read_records() -> Vec<Variant> {
    RECORDS
        .lines()
        .map(|line| Variant::from_json(line).unwrap())
        .collect()
}

#[rstest]
fn test_transform_records_end_to_end(fixture: Fixture) {
    let transformer = Transformer::from_config(fixture.config).unwrap();
    assert_eq!(transformer.cohorts().len(), 3);

    let rows = transformer.transform_batch(read_records()).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.variant_id.as_str()).collect();
    assert_eq!(ids, vec!["CJDn8Zr9ExC", "dup", "nvs"]);

    // NA12877 fails quality; NA12878 is a reference match
    let snp: Value = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(snp["start"], json!(41196840));
    assert_eq!(snp["AN"], json!(4));
    assert_eq!(snp["ANCEPH"], json!(2));
    assert_eq!(snp["ANKIDS"], json!(2));
    assert_eq!(snp["alt"][0]["AC"], json!(1));
    assert_eq!(snp["alt"][0]["AFKIDS"], json!(0.5));
    assert_eq!(snp["alt"][0]["AFCEPH"], json!(0.0));
    assert_eq!(snp["refMatchCallsets"], json!(["NA12878"]));
    assert_eq!(snp["refMatchCallsetsCountCEPH"], json!(1));
    assert_eq!(snp["refMatchCallsetsCountKIDS"], json!(0));
    assert_eq!(snp["call"].as_array().unwrap().len(), 1);
    assert_eq!(snp["call"][0]["DP"], json!(44));

    let dup = &rows[1];
    assert!(dup.ambiguous_calls);
    // [1,2] + [-1,-1] from NA12879, plus a diploid reference for NA12891
    assert_eq!(dup.allele_number(""), Some(4));
    assert_eq!(dup.allele_number("CEPH"), Some(2));
    assert_eq!(dup.allele_number("KIDS"), Some(2));

    // non-variant segments skip the quality filter and have no AN
    let nvs = &rows[2];
    assert!(!nvs.ambiguous_calls);
    assert_eq!(nvs.allele_number(""), Some(0));
    assert!(nvs.call.is_empty());

    let snapshot = transformer.counters().snapshot();
    assert_eq!(snapshot.variants_read, 4);
    assert_eq!(snapshot.calls_failing_quality, 1);
    assert_eq!(snapshot.calls_excluded, 1);
    assert_eq!(snapshot.variants_without_calls, 1);
    assert_eq!(snapshot.variants_with_ambiguous_calls, 1);
    assert_eq!(snapshot.rows_emitted, 3);
}

#[rstest]
fn test_rows_follow_schema(fixture: Fixture) {
    let transformer = Transformer::from_config(fixture.config).unwrap();
    let schema = table_schema(transformer.config(), transformer.cohorts());
    assert_eq!(schema, transformer.schema());

    let mut schema_names: Vec<String> = schema.iter().map(|f| f.name.clone()).collect();
    schema_names.sort();

    for row in transformer.transform_batch(read_records()).unwrap() {
        let value = serde_json::to_value(&row).unwrap();
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, schema_names);
    }
}

#[rstest]
fn test_malformed_record_aborts_batch() {
    let transformer = Transformer::from_config(TransformConfig::default()).unwrap();
    let bad = Variant::from_json(
        r#"{"reference_name": "1", "start": 5, "end": 6, "reference_bases": "A", "alternate_bases": ["C"], "call": [{"call_set_name": "x", "genotype": [0, 2]}]}"#,
    )
    .unwrap();

    let mut records = read_records();
    records.push(bad);

    let result = transformer.transform_batch(records);
    match result {
        Err(TransformError::MalformedGenotype {
            variant,
            call_set_name,
            ..
        }) => {
            assert_eq!(variant, "1:5");
            assert_eq!(call_set_name, "x");
        }
        other => panic!("expected MalformedGenotype, got {:?}", other.map(|r| r.len())),
    }
}
