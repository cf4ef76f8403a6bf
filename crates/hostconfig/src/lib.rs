//! Host configuration records and their schema migration.
//!
//! Host records were first persisted in a flat layout (V0) with driver, auth
//! and swarm settings side by side. The current layout (V1) nests them under
//! `HostOptions` with separate engine, swarm and auth groups. This crate holds
//! both shapes and the one-way transform between them.
//!
//! Reading and writing the records is left to the caller, as is deciding
//! which version a record is in before migrating it.
//!
//! # Example
//!
//! ```rust
//! use hostconfig::{migrate_host_v0_to_v1, HostV0, MigrationDefaults};
//!
//! let legacy: HostV0 = serde_json::from_str(r#"{"DriverName": "oneview"}"#).unwrap();
//! let current = migrate_host_v0_to_v1(&legacy, &MigrationDefaults::default());
//! assert!(current.host_options.engine_options.tls_verify);
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod host;
pub mod migrate;
pub mod options;

pub use host::{HostMetadata, HostMetadataV0, HostOptions, HostOptionsV1, HostV0, HostV1};
pub use migrate::{
    migrate_host_metadata_v0_to_v1, migrate_host_v0_to_v1, MigrationDefaults,
    DEFAULT_INSTALL_URL,
};
pub use options::{AuthOptions, AuthOptionsV1, EngineOptions, SwarmOptions};
