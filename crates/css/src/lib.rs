//! Fluid CSS snapshots.
//!
//! Ties the pipeline stages together: [`css_syntax`] parses stylesheet text,
//! [`css_cloner`] reduces a style source to a clone tree of fluid declarations and
//! [`css_batcher`] groups the clone tree's rules by activation width. The result is
//! plain serializable data for the interpolation engine.

#![forbid(unsafe_code)]

pub mod config;
mod snapshot;

pub use config::PipelineConfig;
pub use snapshot::{Snapshot, snapshot, snapshot_observed};

pub use css_batcher as batcher;
pub use css_cloner as cloner;
pub use css_fluid_model as model;
pub use css_syntax as syntax;

pub use css_cloner::{TextDocument, TextSheet};
