//! Submit-and-wait creation of server profiles from a template.
//!
//! ```text
//! Unsubmitted ──submit──▶ Submitted ──▶ Polling ──┬──▶ Completed
//!      │                                 │        ├──▶ Failed
//!      │                                 │        └──▶ TimedOut
//!      └── submit error ──▶ Err          └── fetch error ──▶ Err
//! ```
//!
//! Remote failure states end as
//! [`TaskOutcome::Failed`](crate::tasks::TaskOutcome::Failed); transport
//! and decode failures are returned as errors and carry no task.

use tracing::{debug, error, info};

use crate::api::OneView;
use crate::client::{OneViewError, RestClient};
use crate::profiles::{ServerHardware, ServerProfile, PROFILES_PATH};
use crate::tasks::{ProvisionReport, ProvisioningTask, TaskPhase, TaskResource};

impl<C: RestClient> OneView<C> {
    /// Submit a profile for creation and return the task tracking it.
    ///
    /// A failed submission has no task to poll: the `Err` is the failed
    /// outcome and no task is created.
    ///
    /// # Errors
    /// Returns transport and decode errors unchanged.
    pub async fn submit_new_profile(
        &self,
        profile: &ServerProfile,
    ) -> Result<ProvisioningTask, OneViewError> {
        info!(profile = %profile.name(), "Initializing creation of server profile");

        let body = serde_json::to_value(profile)?;
        debug!(uri = PROFILES_PATH, body = %body, "Submitting server profile");

        let data = self.client.post(PROFILES_PATH, &body).await.map_err(|e| {
            error!(profile = %profile.name(), error = %e, "Error submitting new profile request");
            e
        })?;
        debug!(response = %data, "Response NewProfile");

        let resource: TaskResource = serde_json::from_str(&data).map_err(|e| {
            error!(profile = %profile.name(), error = %e, "Error decoding profile task");
            e
        })?;

        let mut task = ProvisioningTask::new(&self.poll);
        task.update_resource(resource);
        task.advance(TaskPhase::Submitted);
        debug!(task_uri = ?task.uri(), "Profile task submitted");
        Ok(task)
    }

    /// Create a profile named `name` on `hardware` from `template` and wait
    /// for the appliance to finish.
    ///
    /// The template's business fields are copied, its identity is dropped,
    /// and `name` is appended to its description so profiles stamped from
    /// one template stay distinguishable.
    ///
    /// A timed-out or remotely failed task is reported through
    /// [`ProvisionReport::outcome`], not as an error.
    ///
    /// # Errors
    /// Returns transport and decode errors from submission or polling.
    pub async fn create_profile_from_template(
        &self,
        name: &str,
        template: &ServerProfile,
        hardware: &ServerHardware,
    ) -> Result<ProvisionReport, OneViewError> {
        debug!(template = %template.name(), "Using profile template");

        let mut profile = template.template_copy();
        profile.identity.server_hardware_uri = Some(hardware.uri.clone());
        profile.spec.description.push_str(name);
        profile.spec.name = name.to_string();

        let task = self.submit_new_profile(&profile).await?;
        self.wait_for_task(task, name).await
    }
}
