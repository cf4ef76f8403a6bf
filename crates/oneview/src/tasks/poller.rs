//! Poll loop driving a submitted task to a terminal phase.

use tracing::{debug, error, info, warn};

use super::models::{ProvisionReport, ProvisioningTask, TaskOutcome, TaskPhase, TaskResource};
use crate::api::OneView;
use crate::client::{OneViewError, Query, RestClient};

impl<C: RestClient> OneView<C> {
    /// Fetch the current remote view of `task`.
    ///
    /// A task without an assigned URI has nothing to fetch and is left as is.
    ///
    /// # Errors
    /// Returns transport and decode errors unchanged.
    pub async fn refresh_task(&self, task: &mut ProvisioningTask) -> Result<(), OneViewError> {
        let Some(uri) = task.uri().map(str::to_string) else {
            debug!("Unable to get current task, no URI found");
            return Ok(());
        };

        let data = self.client.get(&uri, &Query::none()).await?;
        let fetched: TaskResource = serde_json::from_str(&data)?;
        task.update_resource(fetched);
        Ok(())
    }

    /// Poll `task` until it is terminal or its iteration bound is reached.
    ///
    /// Each pass fetches the task, checks for a terminal state, logs
    /// progress, then sleeps `wait_secs` base delays. Reaching the bound is
    /// reported as [`TaskOutcome::TimedOut`], not as an error.
    ///
    /// # Errors
    /// Returns the first transport or decode error; nothing is retried.
    /// The task is consumed, so the `Err` itself is the failed outcome.
    pub async fn wait_for_task(
        &self,
        mut task: ProvisioningTask,
        label: &str,
    ) -> Result<ProvisionReport, OneViewError> {
        task.advance(TaskPhase::Polling);

        let mut polls = 0;
        while !task.is_done() && polls < task.max_iterations() {
            if let Err(e) = self.refresh_task(&mut task).await {
                error!(profile = %label, error = %e, "Error getting task status");
                return Err(e);
            }

            if task.uri().is_some() {
                let state = task.resource().task_state.clone();
                if self.poll.is_completed(&state) {
                    task.advance(TaskPhase::Completed);
                } else if self.poll.is_failure(&state) {
                    error!(
                        profile = %label,
                        state = %state,
                        reason = task.resource().first_error_message().unwrap_or("unknown"),
                        "Task failed"
                    );
                    task.advance(TaskPhase::Failed);
                }

                let resource = task.resource();
                debug!(profile = %label, "Waiting for task to complete");
                info!(
                    profile = %label,
                    percent = resource.computed_percent_complete,
                    status = %resource.task_status,
                    "Working on profile creation"
                );
            } else {
                info!(profile = %label, "Working on profile creation");
            }

            tokio::time::sleep(self.poll.pass_delay(task.wait_secs())).await;
            polls += 1;
        }

        let outcome = match task.phase() {
            TaskPhase::Completed => TaskOutcome::Completed,
            TaskPhase::Failed => TaskOutcome::Failed,
            _ => {
                task.advance(TaskPhase::TimedOut);
                warn!(profile = %label, polls, "Task timed out");
                TaskOutcome::TimedOut
            }
        };

        info!(profile = %label, outcome = %outcome, polls, "Create server profile finished");
        Ok(ProvisionReport {
            outcome,
            task,
            polls,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::client::MockRestClient;
    use crate::config::PollConfig;

    const TASK_URI: &str = "/rest/tasks/6F0DF438";

    fn poll_config(max_iterations: u32) -> PollConfig {
        PollConfig {
            base_delay_ms: 0,
            wait_secs: 1,
            max_iterations,
            ..PollConfig::default()
        }
    }

    fn submitted_task(poll: &PollConfig, uri: Option<&str>) -> ProvisioningTask {
        let mut task = ProvisioningTask::new(poll);
        task.update_resource(TaskResource {
            uri: uri.map(str::to_string),
            task_state: "New".into(),
            ..TaskResource::default()
        });
        task.advance(TaskPhase::Submitted);
        task
    }

    fn task_body(state: &str, percent: u32) -> String {
        json!({
            "uri": TASK_URI,
            "taskState": state,
            "taskStatus": format!("{state} {percent}%"),
            "computedPercentComplete": percent
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_completes_after_k_plus_one_fetches() {
        const K: u32 = 4;
        let poll = poll_config(10);

        let mut client = MockRestClient::new();
        let mut fetches = 0;
        client
            .expect_get()
            .withf(|path, query| path == TASK_URI && query.is_empty())
            .times(K as usize + 1)
            .returning(move |_, _| {
                fetches += 1;
                if fetches > K {
                    Ok(task_body("Completed", 100))
                } else {
                    Ok(task_body("Running", fetches * 20))
                }
            });

        let one_view = OneView::new(client, poll.clone());
        let task = submitted_task(&poll, Some(TASK_URI));
        let report = one_view.wait_for_task(task, "blade-16").await.unwrap();

        assert_eq!(report.outcome, TaskOutcome::Completed);
        assert_eq!(report.polls, K + 1);
        assert_eq!(report.task.phase(), TaskPhase::Completed);
        assert_eq!(report.task.resource().computed_percent_complete, 100);
    }

    #[tokio::test]
    async fn test_times_out_at_bound_without_error() {
        let poll = poll_config(5);

        let mut client = MockRestClient::new();
        client
            .expect_get()
            .times(5)
            .returning(|_, _| Ok(task_body("Running", 50)));

        let one_view = OneView::new(client, poll.clone());
        let report = one_view
            .wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16")
            .await
            .unwrap();

        assert_eq!(report.outcome, TaskOutcome::TimedOut);
        assert_eq!(report.polls, 5);
        assert_eq!(report.task.phase(), TaskPhase::TimedOut);
        assert!(!report.is_completed());
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_immediately() {
        let poll = poll_config(10);

        let mut client = MockRestClient::new();
        let mut fetches = 0;
        client.expect_get().times(2).returning(move |_, _| {
            fetches += 1;
            if fetches == 1 {
                Ok(task_body("Running", 10))
            } else {
                Err(OneViewError::Api {
                    status: 503,
                    message: "service unavailable".into(),
                })
            }
        });

        let one_view = OneView::new(client, poll.clone());
        let result = one_view
            .wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16")
            .await;

        assert!(matches!(result, Err(OneViewError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_undecodable_task_is_error() {
        let poll = poll_config(10);

        let mut client = MockRestClient::new();
        client
            .expect_get()
            .times(1)
            .returning(|_, _| Ok("not json".to_string()));

        let one_view = OneView::new(client, poll.clone());
        let result = one_view
            .wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16")
            .await;

        assert!(matches!(result, Err(OneViewError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_unassigned_uri_polls_without_fetching() {
        let poll = poll_config(3);

        let mut client = MockRestClient::new();
        client.expect_get().never();

        let one_view = OneView::new(client, poll.clone());
        let report = one_view
            .wait_for_task(submitted_task(&poll, None), "blade-16")
            .await
            .unwrap();

        assert_eq!(report.outcome, TaskOutcome::TimedOut);
        assert_eq!(report.polls, 3);
    }

    #[tokio::test]
    async fn test_remote_error_state_fails_task() {
        let poll = poll_config(10);

        let mut client = MockRestClient::new();
        client.expect_get().times(1).returning(|_, _| {
            Ok(json!({
                "uri": TASK_URI,
                "taskState": "Error",
                "taskStatus": "Unable to apply profile",
                "taskErrors": [{"message": "Server hardware is powered on"}]
            })
            .to_string())
        });

        let one_view = OneView::new(client, poll.clone());
        let report = one_view
            .wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16")
            .await
            .unwrap();

        assert_eq!(report.outcome, TaskOutcome::Failed);
        assert_eq!(report.polls, 1);
        assert_eq!(
            report.task.resource().first_error_message(),
            Some("Server hardware is powered on")
        );
    }

    #[tokio::test]
    async fn test_completed_state_ignores_case() {
        let poll = poll_config(10);

        let mut client = MockRestClient::new();
        client
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(task_body("COMPLETED", 100)));

        let one_view = OneView::new(client, poll.clone());
        let report = one_view
            .wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16")
            .await
            .unwrap();

        assert!(report.is_completed());
    }

    #[tokio::test]
    async fn test_custom_completed_marker() {
        let poll = PollConfig {
            completed_state: "Done".into(),
            ..poll_config(2)
        };

        let mut client = MockRestClient::new();
        client
            .expect_get()
            .times(2)
            .returning(|_, _| Ok(task_body("Completed", 100)));

        let one_view = OneView::new(client, poll.clone());
        let report = one_view
            .wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16")
            .await
            .unwrap();

        assert_eq!(report.outcome, TaskOutcome::TimedOut);
    }

    fn real_delay_config(max_iterations: u32) -> PollConfig {
        PollConfig {
            base_delay_ms: 1000,
            wait_secs: 10,
            max_iterations,
            ..PollConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_pass_sleeps_including_completion() {
        let poll = real_delay_config(10);

        let mut client = MockRestClient::new();
        let mut fetches = 0;
        client.expect_get().times(3).returning(move |_, _| {
            fetches += 1;
            if fetches == 3 {
                Ok(task_body("Completed", 100))
            } else {
                Ok(task_body("Running", fetches * 30))
            }
        });

        let one_view = OneView::new(client, poll.clone());
        let started = tokio::time::Instant::now();
        let report = one_view
            .wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16")
            .await
            .unwrap();

        assert_eq!(report.outcome, TaskOutcome::Completed);
        assert_eq!(report.polls, 3);
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unassigned_uri_passes_still_sleep() {
        let poll = real_delay_config(3);

        let mut client = MockRestClient::new();
        client.expect_get().never();

        let one_view = OneView::new(client, poll.clone());
        let started = tokio::time::Instant::now();
        let report = one_view
            .wait_for_task(submitted_task(&poll, None), "blade-16")
            .await
            .unwrap();

        assert_eq!(report.outcome, TaskOutcome::TimedOut);
        assert_eq!(report.polls, 3);
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_delay_does_not_panic() {
        let poll = PollConfig {
            base_delay_ms: u64::MAX,
            ..real_delay_config(1)
        };

        let mut client = MockRestClient::new();
        client
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(task_body("Running", 10)));

        let one_view = OneView::new(client, poll.clone());
        let wait = one_view.wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16");
        let result = tokio::time::timeout(Duration::from_secs(3600), wait).await;

        // Still sleeping after an hour of virtual time: the delay saturated.
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_zero_bound_times_out_immediately() {
        let poll = poll_config(0);

        let mut client = MockRestClient::new();
        client.expect_get().never();

        let one_view = OneView::new(client, poll.clone());
        let report = one_view
            .wait_for_task(submitted_task(&poll, Some(TASK_URI)), "blade-16")
            .await
            .unwrap();

        assert_eq!(report.outcome, TaskOutcome::TimedOut);
        assert_eq!(report.polls, 0);
    }
}
