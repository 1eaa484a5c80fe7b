//! Core type definitions using newtype patterns for type safety.
//!
//! These types prevent common logic errors by making invalid states unrepresentable
//! at compile time.

mod port;
mod target;

pub use port::Port;
pub use target::{Family, FamilyPreference, ResolvedTarget};
