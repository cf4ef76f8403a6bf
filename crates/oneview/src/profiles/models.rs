//! Server profile resource model.
//!
//! Every resource splits its fields at declaration time into business data,
//! which a template copy carries over, and server-assigned or per-instance
//! data, which it never does. Both halves are flattened so the wire shape is
//! the appliance's flat JSON.
//!
//! Serialization is declared per field: fields with `skip_serializing_if`
//! are omitted when empty, all others are always emitted.

use serde::{Deserialize, Serialize};

// ============================================================================
// Policy sub-objects
// ============================================================================

/// Firmware baseline policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirmwareOption {
    pub force_install_firmware: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_baseline_uri: Option<String>,
    pub manage_firmware: bool,
}

/// Boot mode policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BootModeOption {
    pub manage_mode: bool,
    /// `BIOS` or `UEFI`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pxe_boot_policy: Option<String>,
}

/// Boot order policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BootManagement {
    pub manage_boot: bool,
    /// e.g. `["CD", "USB", "HardDisk", "PXE"]`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,
}

/// A single overridden BIOS setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiosSettings {
    pub id: String,
    pub value: String,
}

/// BIOS override policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BiosOption {
    pub manage_bios: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overridden_settings: Vec<BiosSettings>,
}

/// State and status reported by the appliance for a sub-resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ============================================================================
// Connections
// ============================================================================

/// Boot settings of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionBoot {
    /// `NotBootable`, `Primary` or `Secondary`.
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_volume_source: Option<String>,
}

/// Requested network attachment of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionSpec {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Ethernet` or `FibreChannel`.
    pub function_type: String,
    pub network_uri: String,
    /// e.g. `Flb 1:1-a`, or `Auto`.
    pub port_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_mbps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot: Option<ConnectionBoot>,
}

/// Addresses and bandwidth the appliance assigned to a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionAssignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wwnn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wwpn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocated_mbps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_mbps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interconnect_uri: Option<String>,
    #[serde(flatten)]
    pub remote: RemoteStatus,
}

/// Network connection of a server profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(flatten)]
    pub spec: ConnectionSpec,
    #[serde(flatten)]
    pub assigned: ConnectionAssignment,
}

impl Connection {
    /// Copy of the requested attachment without appliance-assigned addresses.
    #[must_use]
    pub fn template_copy(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            assigned: ConnectionAssignment::default(),
        }
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Logical drive on the server's local controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogicalDrive {
    pub bootable: bool,
    /// e.g. `RAID1`.
    pub raid_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_physical_drives: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_technology: Option<String>,
}

/// Local storage policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalStorageOptions {
    pub manage_local_storage: bool,
    pub initialize: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logical_drives: Vec<LogicalDrive>,
}

impl LocalStorageOptions {
    /// Independent copy; logical drives carry no appliance-assigned data.
    #[must_use]
    pub fn template_copy(&self) -> Self {
        self.clone()
    }
}

/// Path from a connection to a SAN volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoragePath {
    pub connection_id: u32,
    pub is_enabled: bool,
}

/// SAN volume attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeAttachment {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_storage_pool_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_storage_system_uri: Option<String>,
    /// `Auto` or `Manual`.
    pub lun_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lun: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub storage_paths: Vec<StoragePath>,
    #[serde(flatten)]
    pub remote: RemoteStatus,
}

/// SAN storage policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SanStorageOptions {
    pub manage_san_storage: bool,
    #[serde(rename = "hostOSType", skip_serializing_if = "Option::is_none")]
    pub host_os_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volume_attachments: Vec<VolumeAttachment>,
}

impl SanStorageOptions {
    /// Independent copy without appliance-reported attachment state.
    #[must_use]
    pub fn template_copy(&self) -> Self {
        Self {
            manage_san_storage: self.manage_san_storage,
            host_os_type: self.host_os_type.clone(),
            volume_attachments: self
                .volume_attachments
                .iter()
                .map(|v| VolumeAttachment {
                    remote: RemoteStatus::default(),
                    ..v.clone()
                })
                .collect(),
        }
    }
}

// ============================================================================
// Server profile
// ============================================================================

/// Desired hardware configuration; carried over by template copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSpec {
    /// Resource type, e.g. `ServerProfileV5`.
    #[serde(rename = "type")]
    pub profile_type: String,
    pub name: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub description: String,
    /// `Bay` or `BayAndServer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity: Option<String>,
    pub bios: BiosOption,
    pub boot: BootManagement,
    pub boot_mode: BootModeOption,
    pub firmware: FirmwareOption,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Connection>,
    pub local_storage: LocalStorageOptions,
    pub san_storage: SanStorageOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosure_group_uri: Option<String>,
    pub hide_unused_flex_nics: bool,
    /// `Physical` or `Virtual`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wwn_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number_type: Option<String>,
}

impl ProfileSpec {
    /// Independent copy; sub-resources drop their own assigned data.
    #[must_use]
    pub fn template_copy(&self) -> Self {
        Self {
            connections: self.connections.iter().map(Connection::template_copy).collect(),
            local_storage: self.local_storage.template_copy(),
            san_storage: self.san_storage.template_copy(),
            ..self.clone()
        }
    }
}

/// Fields tied to one concrete profile instance: identity assigned by the
/// appliance, the hardware it is bound to, and its lifecycle state.
/// Never carried over by a template copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosure_bay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosure_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_hardware_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_hardware_type_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<bool>,
}

/// Server profile as exchanged with `/rest/server-profiles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerProfile {
    #[serde(flatten)]
    pub spec: ProfileSpec,
    #[serde(flatten)]
    pub identity: ProfileIdentity,
}

impl ServerProfile {
    /// Copy suitable for creating a new profile: business data only,
    /// with no identity, hardware binding or lifecycle state.
    ///
    /// The copy shares no collections with `self`.
    #[must_use]
    pub fn template_copy(&self) -> Self {
        Self {
            spec: self.spec.template_copy(),
            identity: ProfileIdentity::default(),
        }
    }

    /// Profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.spec.name
    }
}

/// One page of `/rest/server-profiles` results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerProfileList {
    pub total: u32,
    pub count: u32,
    pub start: u32,
    pub prev_page_uri: Option<String>,
    pub next_page_uri: Option<String>,
    pub uri: Option<String>,
    pub members: Vec<ServerProfile>,
}

/// Physical server a profile is assigned to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerHardware {
    pub name: String,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

impl ServerHardware {
    /// Hardware known only by its URI.
    #[must_use]
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }
}
