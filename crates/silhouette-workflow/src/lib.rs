//! Silhouette Workflow - the linear autonomous cycle
//!
//! Five stages advanced one per tick: intent → planning → execution →
//! optimization → archival, then back to idle. Each generative stage calls
//! the provider, filters the reply, and hands its output to the next stage
//! through the pipeline data bag. Two safety limits (token budget, wall
//! clock) trip the engine into a disabled state that only an external
//! config replacement can clear.

pub mod coordinator;
pub mod stage;

pub use coordinator::{WorkflowCoordinator, WorkflowStatus};
pub use stage::{PipelineData, WorkflowStage};
