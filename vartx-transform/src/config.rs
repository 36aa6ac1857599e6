//! Run configuration for the transform stages.
//!
//! One value object covers everything the stages read: quality filtering,
//! call set exclusion, reference-match summarization, non-SNP frequencies and
//! cohort definitions. It is usually loaded from TOML:
//!
//! ```toml
//! omit_low_quality_calls = true
//! summarize_ref_match_callsets = true
//! ref_match_output = "both"
//! compute_frequency_for_non_snps = false
//! excluded_call_sets = ["NA12877"]
//! cohort_file = "cohorts.tsv"
//!
//! [cohorts]
//! EUR = ["NA12878", "NA12891", "NA12892"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use vartx_core::models::CohortSet;

use crate::errors::TransformError;

/// How reference-matching call sets are reported when summarization is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefMatchOutput {
    /// The literal list of reference-matching call set names.
    #[default]
    Callsets,
    /// Only per-cohort counts of reference-matching call sets.
    Counts,
    Both,
}

impl RefMatchOutput {
    pub fn emits_callsets(&self) -> bool {
        matches!(self, RefMatchOutput::Callsets | RefMatchOutput::Both)
    }

    pub fn emits_counts(&self) -> bool {
        matches!(self, RefMatchOutput::Counts | RefMatchOutput::Both)
    }
}

impl FromStr for RefMatchOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "callsets" => Ok(RefMatchOutput::Callsets),
            "counts" => Ok(RefMatchOutput::Counts),
            "both" => Ok(RefMatchOutput::Both),
            _ => Err(format!("Invalid reference-match output: {}", s)),
        }
    }
}

impl Display for RefMatchOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RefMatchOutput::Callsets => "callsets",
            RefMatchOutput::Counts => "counts",
            RefMatchOutput::Both => "both",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Drop variant calls whose FILTER list does not contain PASS.
    pub omit_low_quality_calls: bool,
    /// Replace reference-matching calls with a call set list and/or counts.
    pub summarize_ref_match_callsets: bool,
    pub ref_match_output: RefMatchOutput,
    /// Compute AN (and so AF) for indels and other non-SNP variants too.
    pub compute_frequency_for_non_snps: bool,
    pub excluded_call_sets: BTreeSet<String>,
    /// Cohort name -> call set names.
    pub cohorts: BTreeMap<String, Vec<String>>,
    /// Tab separated `call_set_name cohort` file, merged with `cohorts`.
    pub cohort_file: Option<PathBuf>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            omit_low_quality_calls: false,
            summarize_ref_match_callsets: true,
            ref_match_output: RefMatchOutput::default(),
            compute_frequency_for_non_snps: false,
            excluded_call_sets: BTreeSet::new(),
            cohorts: BTreeMap::new(),
            cohort_file: None,
        }
    }
}

impl TransformConfig {
    pub fn from_toml_str(raw: &str) -> Result<TransformConfig, TransformError> {
        toml::from_str(raw).map_err(|e| TransformError::InvalidConfig(e.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<TransformConfig, TransformError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        TransformConfig::from_toml_str(&raw)
    }

    ///
    /// Resolve the cohort definitions: inline `cohorts` merged with the
    /// optional cohort file. The all-samples cohort is always included.
    ///
    pub fn load_cohorts(&self) -> Result<CohortSet, TransformError> {
        let inline = CohortSet::from_members(self.cohorts.clone())?;
        match &self.cohort_file {
            Some(path) => {
                let from_file = CohortSet::try_from(path.as_path())?;
                Ok(inline.merge(from_file))
            }
            None => Ok(inline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    #[rstest]
    fn test_defaults() {
        let config = TransformConfig::default();
        assert!(!config.omit_low_quality_calls);
        assert!(config.summarize_ref_match_callsets);
        assert_eq!(config.ref_match_output, RefMatchOutput::Callsets);
        assert!(!config.compute_frequency_for_non_snps);
        assert_eq!(config.load_cohorts().unwrap().len(), 1);
    }

    #[rstest]
    fn test_empty_toml_is_default() {
        assert_eq!(
            TransformConfig::from_toml_str("").unwrap(),
            TransformConfig::default()
        );
    }

    #[rstest]
    fn test_parse_toml() {
        let config = TransformConfig::from_toml_str(
            r#"
            omit_low_quality_calls = true
            ref_match_output = "counts"
            excluded_call_sets = ["filterMeOut"]

            [cohorts]
            EUR = ["NA12878", "NA12891"]
            "#,
        )
        .unwrap();

        assert!(config.omit_low_quality_calls);
        assert_eq!(config.ref_match_output, RefMatchOutput::Counts);
        assert!(config.excluded_call_sets.contains("filterMeOut"));

        let cohorts = config.load_cohorts().unwrap();
        assert_eq!(cohorts.len(), 2);
        assert!(cohorts.get("EUR").unwrap().contains("NA12891"));
    }

    #[rstest]
    fn test_unknown_key_is_rejected() {
        let result = TransformConfig::from_toml_str("omit_low_quality = true");
        assert!(matches!(result, Err(TransformError::InvalidConfig(_))));
    }

    #[rstest]
    fn test_reserved_cohort_name_is_rejected() {
        let result = TransformConfig::from_toml_str("[cohorts]\n\"\" = [\"NA12878\"]").unwrap();
        assert!(matches!(
            result.load_cohorts(),
            Err(TransformError::Core(_))
        ));
    }

    #[rstest]
    fn test_cohort_file_is_merged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NA12877\tEUR\nHG01112\tAMR").unwrap();

        let config = TransformConfig {
            cohorts: BTreeMap::from([("EUR".to_string(), vec!["NA12878".to_string()])]),
            cohort_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let cohorts = config.load_cohorts().unwrap();
        assert_eq!(cohorts.len(), 3);
        assert_eq!(cohorts.get("EUR").unwrap().len(), Some(2));
    }

    #[rstest]
    #[case("callsets", RefMatchOutput::Callsets)]
    #[case("COUNTS", RefMatchOutput::Counts)]
    #[case("both", RefMatchOutput::Both)]
    fn test_ref_match_output_from_str(#[case] raw: &str, #[case] expected: RefMatchOutput) {
        assert_eq!(RefMatchOutput::from_str(raw).unwrap(), expected);
        assert_eq!(
            RefMatchOutput::from_str(&expected.to_string()).unwrap(),
            expected
        );
    }
}
