//! One-way migration from the flat V0 layout to the nested V1 layout.
//!
//! Both transforms are total: every V0 field lands in exactly one V1 field,
//! and fields V0 never had are filled from [`MigrationDefaults`] or left
//! empty. Remote-path fields start empty because V0 made no distinction
//! between controller-side and host-side paths; they are derived again on
//! the next provisioning pass.
//!
//! Callers must only pass records known to be V0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::host::{HostMetadata, HostMetadataV0, HostOptions, HostOptionsV1, HostV0, HostV1};
use crate::options::{AuthOptions, AuthOptionsV1, EngineOptions, SwarmOptions};

/// Install script used when a record predates the `InstallURL` setting.
pub const DEFAULT_INSTALL_URL: &str = "https://get.docker.com";

/// Values assigned to engine settings that V0 records never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationDefaults {
    /// Engine TLS verification.
    pub tls_verify: bool,
    /// Engine install script URL.
    pub install_url: String,
}

impl Default for MigrationDefaults {
    fn default() -> Self {
        Self {
            tls_verify: true,
            install_url: DEFAULT_INSTALL_URL.to_string(),
        }
    }
}

/// Migrate a flat host record to the nested layout.
#[must_use]
pub fn migrate_host_v0_to_v1(host: &HostV0, defaults: &MigrationDefaults) -> HostV1 {
    debug!(
        host = %host.name,
        driver = %host.driver_name,
        config_version = host.config_version,
        "Migrating host record V0 -> V1"
    );

    let engine_options = EngineOptions {
        tls_verify: defaults.tls_verify,
        install_url: defaults.install_url.clone(),
        ..EngineOptions::default()
    };

    let swarm_options = SwarmOptions {
        address: String::new(),
        discovery: host.swarm_discovery.clone(),
        host: host.swarm_host.clone(),
        master: host.swarm_master,
        ..SwarmOptions::default()
    };

    let auth_options = AuthOptionsV1 {
        store_path: host.store_path.clone(),
        ca_cert_path: host.ca_cert_path.clone(),
        ca_cert_remote_path: String::new(),
        server_cert_path: host.server_cert_path.clone(),
        server_key_path: host.server_key_path.clone(),
        client_key_path: host.client_key_path.clone(),
        server_cert_remote_path: String::new(),
        server_key_remote_path: String::new(),
        private_key_path: host.private_key_path.clone(),
        client_cert_path: host.client_cert_path.clone(),
    };

    HostV1 {
        name: host.name.clone(),
        config_version: host.config_version,
        driver: host.driver.clone(),
        driver_name: host.driver_name.clone(),
        host_options: HostOptionsV1 {
            engine_options,
            swarm_options,
            auth_options,
        },
    }
}

/// Migrate legacy host metadata to the nested layout.
///
/// Engine options stay empty and swarm options absent: the metadata view
/// never carried either. `ConfigVersion` is preserved so callers can tell
/// a migrated record from one written by the current schema.
#[must_use]
pub fn migrate_host_metadata_v0_to_v1(meta: &HostMetadataV0) -> HostMetadata {
    debug!(
        driver = %meta.driver_name,
        config_version = meta.config_version,
        "Migrating host metadata V0 -> V1"
    );

    let auth_options = AuthOptions {
        store_path: meta.store_path.clone(),
        ca_cert_path: meta.ca_cert_path.clone(),
        ca_cert_remote_path: String::new(),
        server_cert_path: meta.server_cert_path.clone(),
        server_key_path: meta.server_key_path.clone(),
        client_key_path: String::new(),
        server_cert_remote_path: String::new(),
        server_key_remote_path: String::new(),
        ca_private_key_path: meta.private_key_path.clone(),
        client_cert_path: meta.client_cert_path.clone(),
    };

    HostMetadata {
        driver_name: meta.driver_name.clone(),
        config_version: meta.config_version,
        host_options: HostOptions {
            engine_options: EngineOptions::default(),
            swarm_options: None,
            auth_options,
        },
    }
}
