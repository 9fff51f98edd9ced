//! Two ways to get a [`td_core::Dataset`] without hand-assembling a triple
//! stream: a masked 2-D grid ([`matrix`]), and the seeded synthetic
//! generator ([`synthetic`]). CSV is reproduced only as a thin text
//! encoding of the same grid, not as a general-purpose file format parser.

pub mod csv;
pub mod matrix;
pub mod synthetic;

pub use csv::{parse_dataset, parse_supervised, render_dataset};
pub use matrix::build_matrix_dataset;
pub use synthetic::{generate, SyntheticDataset};
