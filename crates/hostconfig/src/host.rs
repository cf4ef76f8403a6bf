//! Host record layouts, legacy (V0) and current (V1).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::options::{AuthOptions, AuthOptionsV1, EngineOptions, SwarmOptions};

// ============================================================================
// Legacy flat layout
// ============================================================================

/// Flat host record written before option groups existed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostV0 {
    /// Host name. Derived from the record's directory, never persisted.
    #[serde(skip)]
    pub name: String,
    /// Driver-specific settings, kept opaque.
    pub driver: Value,
    /// Name of the driver that owns `driver`.
    pub driver_name: String,
    /// Schema/config version counter.
    pub config_version: u32,
    pub store_path: String,
    pub ca_cert_path: String,
    pub private_key_path: String,
    pub server_cert_path: String,
    pub server_key_path: String,
    pub client_cert_path: String,
    pub client_key_path: String,
    pub swarm_host: String,
    pub swarm_master: bool,
    pub swarm_discovery: String,
}

/// Metadata-only view of a legacy host record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostMetadataV0 {
    pub driver_name: String,
    pub config_version: u32,
    pub store_path: String,
    pub ca_cert_path: String,
    pub private_key_path: String,
    pub server_cert_path: String,
    pub server_key_path: String,
    pub client_cert_path: String,
}

// ============================================================================
// Current nested layout
// ============================================================================

/// Option groups of a V1 host record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostOptionsV1 {
    pub engine_options: EngineOptions,
    pub swarm_options: SwarmOptions,
    pub auth_options: AuthOptionsV1,
}

/// Nested host record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostV1 {
    /// Host name. Derived from the record's directory, never persisted.
    #[serde(skip)]
    pub name: String,
    pub config_version: u32,
    pub driver: Value,
    pub driver_name: String,
    pub host_options: HostOptionsV1,
}

/// Option groups of current host metadata.
///
/// Swarm settings are optional here: metadata written before swarm support
/// has none to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostOptions {
    pub engine_options: EngineOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swarm_options: Option<SwarmOptions>,
    pub auth_options: AuthOptions,
}

/// Current metadata-only view of a host record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostMetadata {
    pub driver_name: String,
    pub config_version: u32,
    pub host_options: HostOptions,
}
