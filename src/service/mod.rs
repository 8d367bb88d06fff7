//! Orchestration services driving the build and release pipelines.

pub mod build;
pub mod release;

pub use build::{BuildOptions, BuildService, BuildSummary};
pub use release::{ReleaseOptions, ReleaseService};
