//! Configuration types for endpoints and workflows.
//!
//! This module provides:
//! - `EndpointConfig`: Settings of a single reader or writer
//! - `WorkflowConfig`: Named sections of a complete workflow
//! - `EndpointSpec` / `ProcessorSpec`: What factories receive to build instances

mod endpoint;
mod spec;
mod workflow;

pub use endpoint::EndpointConfig;
pub use spec::{EndpointSpec, ProcessorSpec};
pub use workflow::WorkflowConfig;
