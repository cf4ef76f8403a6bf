//! Server profiles: resource model and lookups.

mod lookup;
pub mod models;

pub use lookup::{matches_filter, NAME_ASC, PROFILES_PATH};
pub use models::{
    BiosOption, BiosSettings, BootManagement, BootModeOption, Connection, ConnectionAssignment,
    ConnectionBoot, ConnectionSpec, FirmwareOption, LocalStorageOptions, LogicalDrive,
    ProfileIdentity, ProfileSpec, RemoteStatus, SanStorageOptions, ServerHardware,
    ServerProfile, ServerProfileList, StoragePath, VolumeAttachment,
};
