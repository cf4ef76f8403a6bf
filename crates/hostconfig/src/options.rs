//! Option groups nested under a host record's `HostOptions`.
//!
//! Keys follow the persisted Go-style layout (`PascalCase`). Every field is
//! always emitted; missing keys read back as their empty default.

use serde::{Deserialize, Serialize};

/// Docker engine settings for a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EngineOptions {
    /// Extra flags passed to the engine daemon.
    pub arbitrary_flags: Vec<String>,
    /// DNS servers for containers.
    pub dns: Vec<String>,
    /// Engine graph (data) directory.
    pub graph_dir: String,
    /// Environment for the engine daemon.
    pub env: Vec<String>,
    /// Enable IPv6 networking.
    pub ipv6: bool,
    /// Registries allowed without TLS.
    pub insecure_registry: Vec<String>,
    /// Engine labels.
    pub labels: Vec<String>,
    /// Engine log level.
    pub log_level: String,
    /// Storage driver name.
    pub storage_driver: String,
    /// Enable SELinux support.
    pub selinux_enabled: bool,
    /// Require TLS verification between client and engine.
    pub tls_verify: bool,
    /// Registry mirrors.
    pub registry_mirror: Vec<String>,
    /// URL of the engine install script.
    #[serde(rename = "InstallURL")]
    pub install_url: String,
}

/// Swarm membership settings for a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SwarmOptions {
    /// Whether the host takes part in a swarm.
    pub is_swarm: bool,
    /// Address the swarm agent advertises.
    pub address: String,
    /// Discovery service URL.
    pub discovery: String,
    /// Whether the host is the swarm master.
    pub master: bool,
    /// Swarm listen host.
    pub host: String,
    /// Swarm image.
    pub image: String,
    /// Scheduling strategy.
    pub strategy: String,
}

/// TLS material locations as stored by V1 host records.
///
/// Local paths live on the controller; remote paths live on the managed host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthOptionsV1 {
    pub store_path: String,
    pub ca_cert_path: String,
    pub ca_cert_remote_path: String,
    pub server_cert_path: String,
    pub server_key_path: String,
    pub client_key_path: String,
    pub server_cert_remote_path: String,
    pub server_key_remote_path: String,
    pub private_key_path: String,
    pub client_cert_path: String,
}

/// TLS material locations as stored by current host metadata.
///
/// Same as [`AuthOptionsV1`] except the CA private key is named explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthOptions {
    pub store_path: String,
    pub ca_cert_path: String,
    pub ca_cert_remote_path: String,
    pub server_cert_path: String,
    pub server_key_path: String,
    pub client_key_path: String,
    pub server_cert_remote_path: String,
    pub server_key_remote_path: String,
    pub ca_private_key_path: String,
    pub client_cert_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_options_install_url_key() {
        let opts = EngineOptions {
            install_url: "https://example.test/install.sh".into(),
            ..EngineOptions::default()
        };
        let value = serde_json::to_value(&opts).unwrap();
        assert_eq!(value["InstallURL"], "https://example.test/install.sh");
        assert_eq!(value["TlsVerify"], false);
        assert!(value.get("InstallUrl").is_none());
    }

    #[test]
    fn test_auth_options_missing_keys_default_empty() {
        let opts: AuthOptions = serde_json::from_str(r#"{"CaCertPath": "/certs/ca.pem"}"#).unwrap();
        assert_eq!(opts.ca_cert_path, "/certs/ca.pem");
        assert!(opts.ca_cert_remote_path.is_empty());
        assert!(opts.ca_private_key_path.is_empty());
    }
}
