//! HPE OneView server profile provisioning.
//!
//! This crate creates server profiles on a OneView appliance from a template
//! profile and waits for the appliance's asynchronous task to finish.
//!
//! # Example
//!
//! ```rust,ignore
//! use oneview::{ClientConfig, OneView, OneViewClient, PollConfig, ServerHardware};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OneViewClient::new(ClientConfig {
//!         endpoint: "https://oneview.example.com".into(),
//!         username: "administrator".into(),
//!         password: "secret".into(),
//!         ..ClientConfig::default()
//!     })?;
//!     let one_view = OneView::new(client, PollConfig::default());
//!
//!     let template = one_view
//!         .get_profile_by_name("docker-template")
//!         .await?
//!         .ok_or_else(|| anyhow::anyhow!("template not found"))?;
//!
//!     let hardware = ServerHardware::from_uri("/rest/server-hardware/30373237-3132");
//!     let report = one_view
//!         .create_profile_from_template("blade-16", &template, &hardware)
//!         .await?;
//!     println!("{}", report.outcome);
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod client;
pub mod config;
mod nullable;
pub mod profiles;
pub mod tasks;
pub mod workflow;

pub use api::OneView;
pub use client::{OneViewClient, OneViewError, Query, RestClient};
pub use config::{ClientConfig, PollConfig};
pub use profiles::{ServerHardware, ServerProfile, ServerProfileList};
pub use tasks::{ProvisionReport, ProvisioningTask, TaskOutcome, TaskPhase, TaskResource};
