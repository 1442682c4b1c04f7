//! Hash collections used throughout Pulse.
//!
//! FxHash over SipHash: keys are short pattern identifiers, never
//! attacker-controlled, and map lookups sit on the per-observation hot path.

pub use rustc_hash::{FxHashMap, FxHashSet};
