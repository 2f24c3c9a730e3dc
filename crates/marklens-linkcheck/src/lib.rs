//! Concurrent link liveness checking.
//!
//! A batch of URLs (possibly duplicated, possibly record-shaped) is
//! normalised, deduplicated, probed with bounded concurrency, and reported
//! back one row per original input entry in input order.

mod checker;
mod normalize;

pub use checker::{
    CheckError, CheckerConfig, HttpProbe, LinkChecker, ProbeError, ProbeResponse, UrlProbe,
    Verdict,
};
pub use normalize::{NormalizedUrl, host_of, normalize};
