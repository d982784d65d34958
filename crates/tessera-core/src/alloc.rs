//! Hash collections used across Tessera, backed by AHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
