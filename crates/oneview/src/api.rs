//! Entry point tying a [`RestClient`] to the polling policy.

use crate::client::RestClient;
use crate::config::PollConfig;

/// OneView operations over a REST client.
///
/// Lookups live in [`crate::profiles`], task polling in [`crate::tasks`],
/// and profile creation in [`crate::workflow`].
pub struct OneView<C> {
    pub(crate) client: C,
    pub(crate) poll: PollConfig,
}

impl<C: RestClient> OneView<C> {
    /// Wrap a REST client with the given polling policy.
    #[must_use]
    pub fn new(client: C, poll: PollConfig) -> Self {
        Self { client, poll }
    }

    /// Underlying REST client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Polling policy applied to new tasks.
    #[must_use]
    pub fn poll_config(&self) -> &PollConfig {
        &self.poll
    }
}
