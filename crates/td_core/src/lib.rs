//! Core, I/O-free types shared by the truth-discovery engine: ID tables,
//! sparse matrices, the dataset model, and a seeded RNG for tie-breaking.
//!
//! Nothing in this crate touches the clock, the filesystem, or an OS
//! randomness source; callers inject determinism explicitly (a seed, a
//! triple stream) and get determinism back.

pub mod dataset;
pub mod errors;
pub mod ids;
pub mod rng;
pub mod sparse;

pub use dataset::{Dataset, DatasetBuilder};
pub use errors::CoreError;
pub use ids::IdTable;
pub use rng::TieRng;
pub use sparse::CsrMatrix;
