use serde::{Deserialize, Serialize};

use super::info::{InfoMap, deserialize_info};

/// Call info key holding the per-call quality FILTER list.
pub const FILTER_FIELD: &str = "FILTER";
/// Call info key holding the read depth.
pub const DEPTH_FIELD: &str = "DP";
/// FILTER value marking a call as passing all quality filters.
pub const PASSING_FILTER: &str = "PASS";
/// Genotype value for an unobserved allele.
pub const NO_CALL: i32 = -1;
/// Genotype value for the reference allele.
pub const REFERENCE_ALLELE: i32 = 0;

///
/// One sample's genotype observation for a [Variant](super::Variant).
///
/// Genotype values are allele indices: `-1` is a no-call, `0` the reference
/// and `k >= 1` the k-th alternate of the owning variant.
///
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantCall {
    pub call_set_name: String,
    pub phaseset: Option<String>,
    pub genotype: Vec<i32>,
    pub genotype_likelihood: Vec<f64>,
    #[serde(deserialize_with = "deserialize_info")]
    pub info: InfoMap,
}

impl VariantCall {
    pub fn new(call_set_name: &str, genotype: Vec<i32>) -> Self {
        VariantCall {
            call_set_name: call_set_name.to_string(),
            genotype,
            ..Default::default()
        }
    }

    /// Attach an info value list, replacing any previous values for `key`.
    pub fn with_info(mut self, key: &str, values: &[&str]) -> Self {
        self.info.insert(
            key.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// The call's FILTER list, if the call carries one.
    pub fn filters(&self) -> Option<&[String]> {
        self.info.get(FILTER_FIELD).map(Vec::as_slice)
    }

    pub fn is_passing(&self) -> bool {
        self.filters()
            .is_some_and(|filters| filters.iter().any(|f| f == PASSING_FILTER))
    }

    ///
    /// Read depth parsed from the call's `DP` value.
    ///
    /// `None` when the value is absent, the VCF missing marker `.`, or not an
    /// integer. A missing depth is never reported as zero.
    ///
    pub fn depth(&self) -> Option<i64> {
        self.info
            .get(DEPTH_FIELD)
            .and_then(|values| values.first())
            .map(|value| value.trim())
            .filter(|value| *value != ".")
            .and_then(|value| value.parse::<i64>().ok())
    }

    /// True when every genotype value is the reference allele.
    ///
    /// An empty genotype carries no observation and does not match the reference.
    pub fn is_reference_match(&self) -> bool {
        !self.genotype.is_empty() && self.genotype.iter().all(|&g| g == REFERENCE_ALLELE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(&["PASS"], true)]
    #[case(&["LowGQX", "PASS"], true)]
    #[case(&["LowGQX"], false)]
    #[case(&[], false)]
    fn test_is_passing(#[case] filters: &[&str], #[case] expected: bool) {
        let call = VariantCall::new("NA12878", vec![0, 1]).with_info(FILTER_FIELD, filters);
        assert_eq!(call.is_passing(), expected);
    }

    #[rstest]
    fn test_call_without_filter_is_not_passing() {
        let call = VariantCall::new("NA12878", vec![0, 1]);
        assert_eq!(call.filters(), None);
        assert!(!call.is_passing());
    }

    #[rstest]
    #[case(Some("39"), Some(39))]
    #[case(Some("."), None)]
    #[case(Some("deep"), None)]
    #[case(None, None)]
    fn test_depth(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        let mut call = VariantCall::new("NA12878", vec![0, 0]);
        if let Some(raw) = raw {
            call = call.with_info(DEPTH_FIELD, &[raw]);
        }
        assert_eq!(call.depth(), expected);
    }

    #[rstest]
    #[case(vec![0, 0], true)]
    #[case(vec![0], true)]
    #[case(vec![0, 1], false)]
    #[case(vec![-1, 0], false)]
    #[case(vec![], false)]
    fn test_is_reference_match(#[case] genotype: Vec<i32>, #[case] expected: bool) {
        assert_eq!(VariantCall::new("s", genotype).is_reference_match(), expected);
    }

    #[rstest]
    fn test_deserialize_call_with_scalar_info() {
        let call: VariantCall = serde_json::from_str(
            r#"{"call_set_name":"NA12882","genotype":[0,1],"DP":"40","info":{"DP":"40","FILTER":["PASS"]}}"#,
        )
        .unwrap();
        assert_eq!(call.call_set_name, "NA12882");
        assert_eq!(call.depth(), Some(40));
        assert!(call.is_passing());
        assert_eq!(call.phaseset, None);
    }
}
