//! Run configuration for tcping.

mod options;

pub use options::ProbeOptions;
