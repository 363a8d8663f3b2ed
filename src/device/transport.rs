//! Transport seam over an already-opened MTP responder connection.

use crate::error::Result;
use crate::gallery::object::{ObjectFormat, ObjectHandle, ObjectInfo, StorageId};

/// The MTP wire operations this crate consumes.
///
/// Implementations wrap a real USB MTP binding; tests and demos use
/// in-memory devices. MTP responders serialize command/response
/// exchanges, so every method takes `&mut self` and
/// [`DeviceSession`](crate::DeviceSession) issues them strictly
/// sequentially; there is never more than one request in flight.
///
/// Absent results (`None`) model transient or inconsistent device
/// responses; callers treat them as "skip this object", not as failure.
pub trait MtpTransport {
    /// Initiate the MTP session. Called exactly once, by
    /// [`DeviceSession::open`](crate::DeviceSession::open). A rejection
    /// aborts the whole run with no retry.
    fn open_session(&mut self) -> Result<()>;

    /// Enumerate the device's storage ids.
    ///
    /// `None` when the device reports no storage or the enumeration
    /// call itself fails; both mean "nothing to traverse".
    fn storage_ids(&mut self) -> Option<Vec<StorageId>>;

    /// Enumerate object handles matching `parent` within `storage`,
    /// optionally narrowed to one format (`None` asks for everything).
    ///
    /// `None` is treated identically to an empty list: no children.
    fn object_handles(
        &mut self,
        storage: StorageId,
        format: Option<ObjectFormat>,
        parent: ObjectHandle,
    ) -> Option<Vec<ObjectHandle>>;

    /// Fetch the metadata snapshot for one object.
    fn object_info(&mut self, handle: ObjectHandle) -> Option<ObjectInfo>;

    /// Fetch one object's payload, passing the expected compressed
    /// size from its [`ObjectInfo`].
    fn object_data(&mut self, handle: ObjectHandle, expected_size: u32) -> Option<Vec<u8>>;

    /// Close the MTP session and release the underlying connection.
    fn close_session(&mut self);
}
