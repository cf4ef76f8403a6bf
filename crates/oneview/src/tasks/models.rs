//! Task resource and local task state.

use serde::{Deserialize, Serialize};

use crate::config::PollConfig;

/// Resource a task operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssociatedResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_category: Option<String>,
}

/// Error reported by a failed task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}

/// Task as returned by `/rest/tasks/{id}` and by asynchronous submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskResource {
    /// Absent or empty until the appliance has assigned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// e.g. `New`, `Running`, `Completed`, `Error`.
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub task_state: String,
    /// Human-readable progress message.
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub task_status: String,
    pub computed_percent_complete: u32,
    pub percent_complete: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_resource: Option<AssociatedResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub task_errors: Vec<TaskError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl TaskResource {
    /// Task URI, if one has been assigned.
    #[must_use]
    pub fn assigned_uri(&self) -> Option<&str> {
        self.uri.as_deref().filter(|u| !u.is_empty() && *u != "null")
    }

    /// Message of the first reported error.
    #[must_use]
    pub fn first_error_message(&self) -> Option<&str> {
        self.task_errors.first().map(|e| e.message.as_str())
    }
}

/// Local lifecycle of a provisioning task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPhase {
    /// Created, not yet sent.
    Unsubmitted,
    /// Accepted by the appliance.
    Submitted,
    /// Being polled.
    Polling,
    /// Appliance reported completion.
    Completed,
    /// Submission, polling or the task itself failed.
    Failed,
    /// Poll bound reached without a terminal state.
    TimedOut,
}

impl TaskPhase {
    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::TimedOut)
    }
}

impl std::fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsubmitted => write!(f, "unsubmitted"),
            Self::Submitted => write!(f, "submitted"),
            Self::Polling => write!(f, "polling"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timed_out"),
        }
    }
}

/// One submitted operation and the state of waiting on it.
///
/// Owned by the workflow invocation that created it. Once terminal, the
/// phase and the remote view are frozen.
#[derive(Debug, Clone)]
pub struct ProvisioningTask {
    resource: TaskResource,
    phase: TaskPhase,
    wait_secs: u32,
    max_iterations: u32,
}

impl ProvisioningTask {
    /// Fresh task for one submission attempt.
    #[must_use]
    pub fn new(poll: &PollConfig) -> Self {
        Self {
            resource: TaskResource::default(),
            phase: TaskPhase::Unsubmitted,
            wait_secs: poll.wait_secs,
            max_iterations: poll.max_iterations,
        }
    }

    /// Latest remote view of the task.
    #[must_use]
    pub fn resource(&self) -> &TaskResource {
        &self.resource
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TaskPhase {
        self.phase
    }

    /// Whether the task has reached a terminal phase.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Task URI, if assigned.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.resource.assigned_uri()
    }

    /// Delay units slept between polls.
    #[must_use]
    pub fn wait_secs(&self) -> u32 {
        self.wait_secs
    }

    /// Poll passes allowed.
    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Override the poll interval and bound for this task.
    #[must_use]
    pub fn with_limits(mut self, wait_secs: u32, max_iterations: u32) -> Self {
        self.wait_secs = wait_secs;
        self.max_iterations = max_iterations;
        self
    }

    /// Move to `phase` unless already terminal. Returns whether it moved.
    pub(crate) fn advance(&mut self, phase: TaskPhase) -> bool {
        if self.is_done() {
            return false;
        }
        self.phase = phase;
        true
    }

    /// Replace the remote view unless terminal. A fetched view without a URI
    /// keeps the one already known.
    pub(crate) fn update_resource(&mut self, mut fetched: TaskResource) {
        if self.is_done() {
            return;
        }
        if fetched.assigned_uri().is_none() {
            fetched.uri.clone_from(&self.resource.uri);
        }
        self.resource = fetched;
    }
}

/// How waiting on a task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// Appliance reported completion.
    Completed,
    /// Poll bound reached; the task may still finish on the appliance.
    TimedOut,
    /// Appliance reported the task as failed.
    Failed,
}

impl std::fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::TimedOut => write!(f, "timed_out"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of waiting on a provisioning task.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// How the wait ended.
    pub outcome: TaskOutcome,
    /// Final task state.
    pub task: ProvisioningTask,
    /// Poll passes performed.
    pub polls: u32,
}

impl ProvisionReport {
    /// Whether the appliance reported completion.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.outcome == TaskOutcome::Completed
    }
}
