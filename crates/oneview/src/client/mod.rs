//! Remote Data Client: the REST seam between the core and the appliance.

mod http;
mod traits;

pub use http::OneViewClient;
pub use traits::{OneViewError, Query, RestClient};

#[cfg(test)]
pub use traits::MockRestClient;
