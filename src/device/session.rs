//! Device session lifecycle and object access.

use crate::device::transport::MtpTransport;
use crate::error::Result;
use crate::gallery::object::{ObjectFormat, ObjectHandle, ObjectInfo, StorageId};

/// An open session to one MTP responder.
///
/// Wraps the transport and enforces the session lifecycle: the session
/// closes exactly once, on the first of [`close`](Self::close) or drop,
/// so the connection is released on every exit path including panics
/// and cancellation. Accessors translate absent device responses into
/// empty results so traversal can treat them as per-object skips.
pub struct DeviceSession<T: MtpTransport> {
    transport: T,
    open: bool,
}

impl<T: MtpTransport> DeviceSession<T> {
    /// Establish the MTP session over an already-opened connection.
    ///
    /// Fails if the responder rejects session initiation; the caller
    /// aborts without retry.
    pub fn open(mut transport: T) -> Result<Self> {
        transport.open_session()?;
        Ok(Self {
            transport,
            open: true,
        })
    }

    /// Enumerate the device's storage units.
    ///
    /// An empty result is "nothing to traverse", not an error.
    pub fn storage_ids(&mut self) -> Vec<StorageId> {
        if !self.open {
            return Vec::new();
        }
        self.transport.storage_ids().unwrap_or_default()
    }

    /// List object handles under `parent` in `storage`.
    ///
    /// An absent device response is treated as "no children".
    pub fn object_handles(
        &mut self,
        storage: StorageId,
        format: Option<ObjectFormat>,
        parent: ObjectHandle,
    ) -> Vec<ObjectHandle> {
        if !self.open {
            return Vec::new();
        }
        self.transport
            .object_handles(storage, format, parent)
            .unwrap_or_default()
    }

    /// Fetch the metadata snapshot for one object.
    ///
    /// `None` indicates a transient or inconsistent device response;
    /// the caller skips the object rather than failing the traversal.
    pub fn object_info(&mut self, handle: ObjectHandle) -> Option<ObjectInfo> {
        if !self.open {
            return None;
        }
        self.transport.object_info(handle)
    }

    /// Fetch one object's payload bytes.
    ///
    /// `None` indicates retrieval failure for this one object.
    pub fn object_data(&mut self, handle: ObjectHandle, expected_size: u32) -> Option<Vec<u8>> {
        if !self.open {
            return None;
        }
        self.transport.object_data(handle, expected_size)
    }

    /// Close the session and release the connection.
    ///
    /// Safe to call more than once; only the first call reaches the
    /// transport. Later accessor calls return empty results.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            self.transport.close_session();
        }
    }
}

impl<T: MtpTransport> Drop for DeviceSession<T> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeTransport {
        reject: bool,
        closes: Arc<AtomicUsize>,
    }

    impl MtpTransport for FakeTransport {
        fn open_session(&mut self) -> Result<()> {
            if self.reject {
                return Err(GalleryError::SessionRejected("busy".to_string()));
            }
            Ok(())
        }

        fn storage_ids(&mut self) -> Option<Vec<StorageId>> {
            Some(vec![StorageId(1), StorageId(2)])
        }

        fn object_handles(
            &mut self,
            _storage: StorageId,
            _format: Option<ObjectFormat>,
            _parent: ObjectHandle,
        ) -> Option<Vec<ObjectHandle>> {
            None
        }

        fn object_info(&mut self, _handle: ObjectHandle) -> Option<ObjectInfo> {
            None
        }

        fn object_data(&mut self, _handle: ObjectHandle, _expected_size: u32) -> Option<Vec<u8>> {
            None
        }

        fn close_session(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_open_rejection() {
        let closes = Arc::new(AtomicUsize::new(0));
        let result = DeviceSession::open(FakeTransport {
            reject: true,
            closes: closes.clone(),
        });
        assert!(matches!(result, Err(GalleryError::SessionRejected(_))));
        // No session was established, so nothing to close.
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_close_is_idempotent() {
        let closes = Arc::new(AtomicUsize::new(0));
        let mut session = DeviceSession::open(FakeTransport {
            reject: false,
            closes: closes.clone(),
        })
        .unwrap();

        session.close();
        session.close();
        drop(session);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_closes_once() {
        let closes = Arc::new(AtomicUsize::new(0));
        {
            let _session = DeviceSession::open(FakeTransport {
                reject: false,
                closes: closes.clone(),
            })
            .unwrap();
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_closed_session_returns_empty() {
        let closes = Arc::new(AtomicUsize::new(0));
        let mut session = DeviceSession::open(FakeTransport {
            reject: false,
            closes,
        })
        .unwrap();

        assert_eq!(session.storage_ids().len(), 2);
        session.close();
        assert!(session.storage_ids().is_empty());
        assert!(session.object_info(ObjectHandle(7)).is_none());
        assert!(session.object_data(ObjectHandle(7), 100).is_none());
    }

    #[test]
    fn test_absent_handles_are_empty() {
        let closes = Arc::new(AtomicUsize::new(0));
        let mut session = DeviceSession::open(FakeTransport {
            reject: false,
            closes,
        })
        .unwrap();
        let handles = session.object_handles(StorageId(1), None, ObjectHandle::ROOT);
        assert!(handles.is_empty());
    }
}
