//! # vartx
//!
//! Batch transformation of merged non-variant segment data into flat,
//! cohort-annotated variant rows. Each component lives in its own crate and is
//! re-exported here behind a feature flag:
//!
//! - `core`: variant, call and cohort models plus file helpers
//! - `transform`: call filtering, ambiguity flagging, allele statistics and row formatting

#[cfg(feature = "core")]
#[doc(inline)]
pub use vartx_core as core;

#[cfg(feature = "transform")]
#[doc(inline)]
pub use vartx_transform as transform;
