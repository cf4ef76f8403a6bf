//! Filtered lookups against `/rest/server-profiles`.

use tracing::debug;

use super::models::{ServerProfile, ServerProfileList};
use crate::api::OneView;
use crate::client::{OneViewError, Query, RestClient};

/// Collection path for server profiles.
pub const PROFILES_PATH: &str = "/rest/server-profiles";

/// Sort used by single-profile lookups.
pub const NAME_ASC: &str = "name:asc";

/// Build a `<field> matches '<value>'` filter expression.
///
/// The filter syntax has no escaping, so values containing a single quote
/// are rejected.
///
/// # Errors
/// Returns [`OneViewError::InvalidFilterValue`] if `value` contains `'`.
pub fn matches_filter(field: &str, value: &str) -> Result<String, OneViewError> {
    if value.contains('\'') {
        return Err(OneViewError::InvalidFilterValue {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(format!("{field} matches '{value}'"))
}

impl<C: RestClient> OneView<C> {
    /// List server profiles.
    ///
    /// # Errors
    /// Returns transport and decode errors unchanged.
    pub async fn get_profiles(
        &self,
        filter: Option<&str>,
        sort: Option<&str>,
    ) -> Result<ServerProfileList, OneViewError> {
        let query = Query::new(filter, sort);
        let data = self.client.get(PROFILES_PATH, &query).await?;
        debug!(filter = ?query.filter, bytes = data.len(), "Fetched server profiles");

        Ok(serde_json::from_str(&data)?)
    }

    /// First profile whose name matches `name`.
    ///
    /// `Ok(None)` means no profile matched; a failed lookup is an `Err`.
    ///
    /// # Errors
    /// Returns transport, decode and filter errors.
    pub async fn get_profile_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ServerProfile>, OneViewError> {
        self.first_match("name", name).await
    }

    /// First profile whose serial number matches `serial_number`.
    ///
    /// # Errors
    /// Returns transport, decode and filter errors.
    pub async fn get_profile_by_serial_number(
        &self,
        serial_number: &str,
    ) -> Result<Option<ServerProfile>, OneViewError> {
        self.first_match("serialNumber", serial_number).await
    }

    async fn first_match(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<ServerProfile>, OneViewError> {
        let filter = matches_filter(field, value)?;
        let profiles = self.get_profiles(Some(&filter), Some(NAME_ASC)).await?;
        Ok(profiles.members.into_iter().next())
    }
}
