use serde::{Deserialize, Serialize};

use super::call::{NO_CALL, VariantCall};
use super::info::{InfoMap, deserialize_info, deserialize_position, deserialize_quality};
use crate::errors::VartxCoreError;

/// Symbolic alternates used by gVCF to mark a reference block.
pub const NON_REF_ALLELES: [&str; 2] = ["<NON_REF>", "<*>"];

const SNP_BASES: [&str; 4] = ["A", "C", "G", "T"];

///
/// A genomic variant record, after calls from overlapping non-variant segments
/// have been merged in.
///
/// Coordinates are 0-based and half-open. Alternate alleles are referenced by
/// their 1-based position in `alternate_bases`; index 0 is the reference.
///
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    #[serde(alias = "variant_id")]
    pub id: String,
    pub reference_name: String,
    #[serde(deserialize_with = "deserialize_position")]
    pub start: u64,
    #[serde(deserialize_with = "deserialize_position")]
    pub end: u64,
    pub reference_bases: String,
    pub alternate_bases: Vec<String>,
    pub names: Vec<String>,
    pub filter: Vec<String>,
    #[serde(deserialize_with = "deserialize_quality")]
    pub quality: Option<f64>,
    #[serde(deserialize_with = "deserialize_info")]
    pub info: InfoMap,

    /// Samples contributed to this site by a sibling merged record.
    #[serde(alias = "overlappingCallsets")]
    pub overlapping_callsets: Vec<String>,

    /// Set once the variant has been checked for same-sample duplicate calls.
    #[serde(alias = "ambiguousCalls")]
    pub ambiguous_calls: Option<bool>,

    #[serde(rename = "call", alias = "calls")]
    pub calls: Vec<VariantCall>,
}

impl Variant {
    ///
    /// Parse one exported variant record from a JSON string.
    ///
    pub fn from_json(line: &str) -> Result<Variant, VartxCoreError> {
        serde_json::from_str(line).map_err(|e| VartxCoreError::VariantParseError(e.to_string()))
    }

    /// Identifier for diagnostics: the variant id, or `reference:start` when the id is empty.
    pub fn label(&self) -> String {
        if self.id.is_empty() {
            format!("{}:{}", self.reference_name, self.start)
        } else {
            self.id.clone()
        }
    }

    pub fn num_alternates(&self) -> usize {
        self.alternate_bases.len()
    }

    pub fn has_calls(&self) -> bool {
        !self.calls.is_empty()
    }

    ///
    /// Whether the record is a reference block rather than a true variant:
    /// either no alternates at all, or only the gVCF symbolic non-ref alleles.
    ///
    pub fn is_non_variant_segment(&self) -> bool {
        self.alternate_bases
            .iter()
            .all(|alt| NON_REF_ALLELES.contains(&alt.as_str()))
    }

    /// Single base substitution: one-base reference and one-base alternates, all in ACGT.
    pub fn is_snp(&self) -> bool {
        !self.is_non_variant_segment()
            && SNP_BASES.contains(&self.reference_bases.as_str())
            && self
                .alternate_bases
                .iter()
                .all(|alt| SNP_BASES.contains(&alt.as_str()))
    }

    ///
    /// Find the first genotype value outside `[-1, N]`, where N is the number
    /// of alternates. Returns the offending call and value.
    ///
    pub fn first_malformed_genotype(&self) -> Option<(&VariantCall, i32)> {
        let max_allele = self.num_alternates() as i64;
        self.calls.iter().find_map(|call| {
            call.genotype
                .iter()
                .find(|&&g| (g as i64) < NO_CALL as i64 || (g as i64) > max_allele)
                .map(|&g| (call, g))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn variant(reference: &str, alts: &[&str]) -> Variant {
        Variant {
            reference_name: "13".to_string(),
            start: 102265642,
            end: 102265643,
            reference_bases: reference.to_string(),
            alternate_bases: alts.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case("A", &["G"], true)]
    #[case("A", &["G", "T"], true)]
    #[case("A", &["AGG"], false)]
    #[case("AT", &["A"], false)]
    #[case("N", &["A"], false)]
    #[case("A", &[], false)]
    #[case("A", &["<NON_REF>"], false)]
    fn test_is_snp(#[case] reference: &str, #[case] alts: &[&str], #[case] expected: bool) {
        assert_eq!(variant(reference, alts).is_snp(), expected);
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&["<NON_REF>"], true)]
    #[case(&["<*>"], true)]
    #[case(&["G"], false)]
    #[case(&["G", "<NON_REF>"], false)]
    fn test_is_non_variant_segment(#[case] alts: &[&str], #[case] expected: bool) {
        assert_eq!(variant("A", alts).is_non_variant_segment(), expected);
    }

    #[rstest]
    fn test_first_malformed_genotype() {
        let mut v = variant("A", &["G"]);
        v.calls = vec![
            VariantCall::new("ok", vec![-1, 1]),
            VariantCall::new("bad", vec![0, 2]),
        ];
        let (call, value) = v.first_malformed_genotype().unwrap();
        assert_eq!(call.call_set_name, "bad");
        assert_eq!(value, 2);

        v.calls[1].genotype = vec![-2, 0];
        assert_eq!(v.first_malformed_genotype().unwrap().1, -2);

        v.calls.truncate(1);
        assert!(v.first_malformed_genotype().is_none());
    }

    #[rstest]
    fn test_from_json_with_string_coordinates() {
        let v = Variant::from_json(
            r#"{
                "reference_name": "13",
                "start": "102265642",
                "end": "102265643",
                "reference_bases": "A",
                "alternate_bases": ["G"],
                "quality": 91.49,
                "call": [
                    {"call_set_name": "hu52B7E5", "genotype": [1, 0]},
                    {"call_set_name": "no_call", "phaseset": "7278593", "genotype": [-1, -1]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(v.start, 102265642);
        assert_eq!(v.end, 102265643);
        assert_eq!(v.quality, Some(91.49));
        assert_eq!(v.calls.len(), 2);
        assert_eq!(v.calls[1].phaseset.as_deref(), Some("7278593"));
        assert_eq!(v.ambiguous_calls, None);
        assert!(v.is_snp());
    }

    #[rstest]
    fn test_from_json_rejects_garbage() {
        let result = Variant::from_json(r#"{"start": "not a number"}"#);
        assert!(matches!(result, Err(VartxCoreError::VariantParseError(_))));
    }
}
