pub const AMBIGUOUS_CALLS_FIELD: &str = "ambiguousCalls";
pub const OVERLAPPING_CALLSETS_FIELD: &str = "overlappingCallsets";
pub const REF_MATCH_CALLSETS_FIELD: &str = "refMatchCallsets";
pub const REF_MATCH_CALLSETS_COUNT_FIELD: &str = "refMatchCallsetsCount";
pub const ALT_RECORD_FIELD: &str = "alt";
pub const CALL_RECORD_FIELD: &str = "call";

// AC : allele count in genotypes, for each ALT allele, in the same order as listed
pub const ALLELE_COUNT_FIELD: &str = "AC";
// AF : allele frequency for each ALT allele, in the same order as listed
pub const ALLELE_FREQUENCY_FIELD: &str = "AF";
// AN : total number of alleles in called genotypes
pub const ALLELE_NUMBER_FIELD: &str = "AN";

/// Alleles contributed by each merged overlapping call set (diploid reference).
pub const OVERLAP_PLOIDY: u32 = 2;

pub const DEFAULT_BATCH_SIZE: usize = 10_000;
