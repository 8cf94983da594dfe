//! Configuration of the end-to-end pipeline run by the `make` command.

pub mod config;

pub use config::{CollectionConfig, PipelineConfig};
