//! Fusion orchestration module
//!
//! Sequences print transformation and blending, and wires file loading and
//! saving around that core.

mod orchestrator;
mod pipeline;
mod timing;

#[cfg(test)]
mod tests;

pub use orchestrator::fuse;
pub use pipeline::FabricFusionPipeline;
pub use timing::{FusionTimings, StepTiming};
