//! Dataset version creation: history rules, file propagation, the
//! system-block guard and the orchestrating workflow.

pub mod cloner;
pub mod guard;
pub mod history;
pub mod request;
pub mod workflow;

pub use guard::{ConfiguredKeyAuthority, SystemMetadataGuard};
pub use request::CreateVersionRequest;
pub use workflow::VersionWorkflow;
