use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashSet;

use crate::errors::VartxCoreError;
use crate::utils::get_dynamic_reader;

/// Name of the implicit cohort that matches every sample.
pub const ALL_SAMPLES_COHORT: &str = "";

///
/// A named subset of call sets over which allele statistics are computed.
///
/// The all-samples cohort has the empty name and no membership list; it
/// matches every call regardless of sample.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    name: String,
    members: Option<FxHashSet<String>>,
}

impl Cohort {
    pub fn all() -> Cohort {
        Cohort {
            name: ALL_SAMPLES_COHORT.to_string(),
            members: None,
        }
    }

    pub fn new<I, S>(name: &str, members: I) -> Result<Cohort, VartxCoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if name == ALL_SAMPLES_COHORT {
            return Err(VartxCoreError::ReservedCohortName);
        }
        Ok(Cohort {
            name: name.to_string(),
            members: Some(members.into_iter().map(Into::into).collect()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_all(&self) -> bool {
        self.members.is_none()
    }

    pub fn contains(&self, call_set_name: &str) -> bool {
        match &self.members {
            Some(members) => members.contains(call_set_name),
            None => true,
        }
    }

    /// Number of listed members; `None` for the all-samples cohort.
    pub fn len(&self) -> Option<usize> {
        self.members.as_ref().map(|m| m.len())
    }

    /// Output field name for a per-cohort statistic, e.g. `AN` + `EUR` -> `ANEUR`.
    pub fn field_name(&self, base: &str) -> String {
        format!("{}{}", base, self.name)
    }
}

///
/// The configured cohorts for a run. Always holds the all-samples cohort
/// first, followed by the named cohorts in name order.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortSet {
    cohorts: Vec<Cohort>,
}

impl Default for CohortSet {
    fn default() -> Self {
        CohortSet {
            cohorts: vec![Cohort::all()],
        }
    }
}

impl CohortSet {
    pub fn new() -> CohortSet {
        CohortSet::default()
    }

    ///
    /// Build a cohort set from a cohort name -> members mapping.
    ///
    pub fn from_members(
        members: BTreeMap<String, Vec<String>>,
    ) -> Result<CohortSet, VartxCoreError> {
        let mut cohorts = vec![Cohort::all()];
        for (name, samples) in members {
            cohorts.push(Cohort::new(&name, samples)?);
        }
        Ok(CohortSet { cohorts })
    }

    ///
    /// Read `call_set_name <TAB> cohort_name` lines. Blank lines and lines
    /// starting with `#` are skipped; a sample may be listed under several cohorts.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<CohortSet, VartxCoreError> {
        let mut members: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(sample), Some(cohort), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(VartxCoreError::CohortParseError {
                    line: idx + 1,
                    reason: format!("expected 'call_set_name<TAB>cohort', found '{}'", line),
                });
            };

            members
                .entry(cohort.to_string())
                .or_default()
                .push(sample.to_string());
        }

        CohortSet::from_members(members)
    }

    /// Add the cohorts of `other`, merging membership of cohorts present in both.
    pub fn merge(self, other: CohortSet) -> CohortSet {
        let mut members: BTreeMap<String, FxHashSet<String>> = BTreeMap::new();
        for cohort in self.cohorts.into_iter().chain(other.cohorts) {
            if let Some(samples) = cohort.members {
                members.entry(cohort.name).or_default().extend(samples);
            }
        }

        let mut cohorts = vec![Cohort::all()];
        cohorts.extend(members.into_iter().map(|(name, members)| Cohort {
            name,
            members: Some(members),
        }));
        CohortSet { cohorts }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cohort> {
        self.cohorts.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Cohort> {
        self.cohorts.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    /// Never true: the all-samples cohort is always present.
    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }
}

impl TryFrom<&Path> for CohortSet {
    type Error = VartxCoreError;

    fn try_from(value: &Path) -> Result<CohortSet, VartxCoreError> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| VartxCoreError::FileReadError(format!("{:#}", e)))?;
        CohortSet::from_reader(reader)
    }
}

impl TryFrom<&str> for CohortSet {
    type Error = VartxCoreError;

    fn try_from(value: &str) -> Result<CohortSet, VartxCoreError> {
        CohortSet::try_from(Path::new(value))
    }
}
