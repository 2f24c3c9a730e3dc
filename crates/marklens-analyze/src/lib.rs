//! Batch annotators for bookmark records.
//!
//! Every annotator is a pure function over records: static keyword tables,
//! no shared mutable state, no I/O. The outlier detector additionally reads
//! the wall clock to honour its processing budget.

pub mod category;
pub mod cluster;
pub mod folders;
pub mod forgotten;
pub mod metadata;
pub mod outlier;
pub mod priority;
pub mod summary;
pub mod tokens;

pub use outlier::detect_outliers;
