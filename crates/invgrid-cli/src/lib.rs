//! Library surface of the invgrid demo CLI: dataset/schema loading,
//! table rendering, and logging setup.

pub mod dataset;
pub mod logging;
pub mod render;
