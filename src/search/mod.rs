//! Search module
//!
//! Contains:
//! - Node tree reused across turns
//! - Additive board hashing and the transposition cache (brute force only)
//! - Negamax alpha-beta search in vector and brute-force flavors

pub mod alphabeta;
pub mod hash;
pub mod node;
pub mod tt;

pub use alphabeta::{BruteForce, SearchStats, Searcher};
pub use hash::BoardHasher;
pub use node::{Bounds, Node, NodeId, NodeTree};
pub use tt::{TTStats, TranspositionCache};
