pub mod call;
pub mod cohort;
pub mod info;
pub mod variant;

// re-export for cleaner imports
pub use self::call::VariantCall;
pub use self::cohort::{Cohort, CohortSet};
pub use self::variant::Variant;
