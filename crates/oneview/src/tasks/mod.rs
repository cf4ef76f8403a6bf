//! Provisioning tasks: the appliance's view of a long-running operation and
//! the local state of waiting on it.

pub mod models;
mod poller;

pub use models::{
    AssociatedResource, ProvisionReport, ProvisioningTask, TaskError, TaskOutcome, TaskPhase,
    TaskResource,
};
