//! MTP object model: identifiers, code enums, and object metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one logical storage area on an MTP device.
///
/// Enumerated once per session and immutable for the session's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageId(pub u32);

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Identifier of one object (file or folder) within a storage unit.
///
/// Handles are not globally unique across storage units and are valid
/// only while the session that produced them stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub u32);

impl ObjectHandle {
    /// Virtual root parent used to start a storage traversal.
    pub const ROOT: ObjectHandle = ObjectHandle(0);
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Object format codes (the subset of the MTP format table this crate
/// cares about).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectFormat {
    /// Undefined object (0x3000)
    Undefined,
    /// Association, i.e. a folder-like container (0x3001)
    Association,
    /// EXIF JPEG image (0x3801)
    ExifJpeg,
    /// Any other format code
    Other(u16),
}

impl ObjectFormat {
    /// Create from a raw MTP format code.
    pub fn from_u16(code: u16) -> Self {
        match code {
            0x3000 => ObjectFormat::Undefined,
            0x3001 => ObjectFormat::Association,
            0x3801 => ObjectFormat::ExifJpeg,
            other => ObjectFormat::Other(other),
        }
    }

    /// Get the raw MTP format code.
    pub fn as_u16(&self) -> u16 {
        match self {
            ObjectFormat::Undefined => 0x3000,
            ObjectFormat::Association => 0x3001,
            ObjectFormat::ExifJpeg => 0x3801,
            ObjectFormat::Other(code) => *code,
        }
    }
}

/// Association type: whether an object is a folder or a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssociationType {
    /// Not an association (0x0000)
    Undefined,
    /// Generic folder (0x0001)
    GenericFolder,
    /// Any other association code
    Other(u16),
}

impl AssociationType {
    /// Create from a raw MTP association code.
    pub fn from_u16(code: u16) -> Self {
        match code {
            0x0000 => AssociationType::Undefined,
            0x0001 => AssociationType::GenericFolder,
            other => AssociationType::Other(other),
        }
    }

    /// Check if this marks the object as a generic folder, the only
    /// association kind the traversal recurses into.
    pub fn is_generic_folder(&self) -> bool {
        *self == AssociationType::GenericFolder
    }
}

/// Device-reported rights flag for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtectionStatus {
    /// No protection (0x0000)
    None,
    /// Read-only object (0x8001)
    ReadOnly,
    /// Read-only data (0x8002)
    ReadOnlyData,
    /// Non-transferable data (0x8003); must not be downloaded
    NonTransferable,
    /// Any other protection code
    Other(u16),
}

impl ProtectionStatus {
    /// Create from a raw MTP protection code.
    pub fn from_u16(code: u16) -> Self {
        match code {
            0x0000 => ProtectionStatus::None,
            0x8001 => ProtectionStatus::ReadOnly,
            0x8002 => ProtectionStatus::ReadOnlyData,
            0x8003 => ProtectionStatus::NonTransferable,
            other => ProtectionStatus::Other(other),
        }
    }

    /// Check if the device allows this object's payload to be fetched.
    pub fn is_transferable(&self) -> bool {
        *self != ProtectionStatus::NonTransferable
    }
}

/// Metadata snapshot for one object handle.
///
/// Fetched on demand during traversal and valid only for the current
/// step; the walker never caches it across iterations. The reported
/// `parent` must equal the handle under which the object was
/// enumerated; a mismatch means the device returned the object under
/// an unrelated parent scan and the walker discards it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object filename as reported by the device
    pub name: String,
    /// Storage unit the object lives in
    pub storage: StorageId,
    /// Parent handle ([`ObjectHandle::ROOT`] for top-level objects)
    pub parent: ObjectHandle,
    /// Folder vs leaf marker
    pub association_type: AssociationType,
    /// Object format code
    pub format: ObjectFormat,
    /// Device-reported rights flag
    pub protection_status: ProtectionStatus,
    /// Image width in pixels (0 when unknown)
    pub image_pix_width: u32,
    /// Image height in pixels (0 when unknown)
    pub image_pix_height: u32,
    /// Compressed payload size in bytes
    pub compressed_size: u32,
}

impl ObjectInfo {
    /// Check if this object is a folder the traversal should enter.
    pub fn is_folder(&self) -> bool {
        self.association_type.is_generic_folder()
    }
}
