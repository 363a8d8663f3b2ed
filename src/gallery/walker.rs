//! Depth-first traversal of one storage unit's object hierarchy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::device::{DeviceSession, MtpTransport};
use crate::gallery::object::{ObjectFormat, ObjectHandle, ObjectInfo, StorageId};
use crate::slideshow::CancelFlag;

/// Outcome counters for one slideshow run.
///
/// The traversal never aborts on a bad object; every skip is counted
/// here instead, so callers can tell an empty device apart from a
/// misbehaving one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkStats {
    /// Storage units traversed
    pub storages_scanned: u64,
    /// Object handles enumerated across all folders
    pub objects_seen: u64,
    /// Folders recursed into
    pub folders_entered: u64,
    /// Objects skipped because the device returned no info
    pub missing_info: u64,
    /// Objects skipped because their reported parent disagreed with
    /// the enumeration parent
    pub parent_mismatch: u64,
    /// Handles listed more than once within one storage walk
    pub revisited: u64,
    /// Folders not entered because the depth ceiling was reached
    pub depth_limited: u64,
    /// Leaf objects that passed the image eligibility filter
    pub eligible_images: u64,
    /// Eligible objects whose payload fetch returned nothing
    pub payload_failures: u64,
    /// Eligible objects with degenerate dimensions or an undecodable
    /// payload
    pub decode_failures: u64,
    /// Frames handed to the sink
    pub frames_produced: u64,
    /// True when the run was cancelled before completing
    pub cancelled: bool,
}

/// Depth-first pre-order walker over one storage unit.
///
/// Children are visited in the order the device returns them, with no
/// sorting imposed; a folder is entered before its later siblings are
/// processed. The walk is exhaustive; there is no early termination
/// once eligible objects start appearing.
///
/// Two guards bound the walk even when the device reports an
/// inconsistent hierarchy: a per-storage visited set refuses to
/// re-enter an already-seen handle, and a depth ceiling stops runaway
/// recursion. Both convert a potential infinite loop into counters in
/// [`WalkStats`].
pub struct TreeWalker<'s, T: MtpTransport> {
    session: &'s mut DeviceSession<T>,
    storage: StorageId,
    format: Option<ObjectFormat>,
    max_depth: u32,
    visited: HashSet<ObjectHandle>,
}

impl<'s, T: MtpTransport> TreeWalker<'s, T> {
    /// Create a walker for one storage unit.
    ///
    /// `format` narrows enumeration to one object format; `None` asks
    /// the device for everything.
    pub fn new(
        session: &'s mut DeviceSession<T>,
        storage: StorageId,
        format: Option<ObjectFormat>,
        max_depth: u32,
    ) -> Self {
        Self {
            session,
            storage,
            format,
            max_depth,
            visited: HashSet::new(),
        }
    }

    /// Walk the storage unit, invoking `on_leaf` for every non-folder
    /// object that survives the consistency checks.
    ///
    /// The closure receives the session so it can fetch the object's
    /// payload while the walk is paused on it, plus the shared stats.
    /// The cancel flag is observed once per object iteration; a raised
    /// flag unwinds the walk with `stats.cancelled` set.
    pub fn walk<F>(&mut self, cancel: &CancelFlag, stats: &mut WalkStats, on_leaf: &mut F)
    where
        F: FnMut(&mut DeviceSession<T>, ObjectHandle, &ObjectInfo, &mut WalkStats),
    {
        self.scan(ObjectHandle::ROOT, 0, cancel, stats, on_leaf);
    }

    fn scan<F>(
        &mut self,
        parent: ObjectHandle,
        depth: u32,
        cancel: &CancelFlag,
        stats: &mut WalkStats,
        on_leaf: &mut F,
    ) where
        F: FnMut(&mut DeviceSession<T>, ObjectHandle, &ObjectInfo, &mut WalkStats),
    {
        let handles = self.session.object_handles(self.storage, self.format, parent);

        for handle in handles {
            if cancel.is_cancelled() {
                stats.cancelled = true;
                return;
            }
            stats.objects_seen += 1;

            if !self.visited.insert(handle) {
                stats.revisited += 1;
                continue;
            }

            let Some(info) = self.session.object_info(handle) else {
                stats.missing_info += 1;
                continue;
            };

            // The device already filtered by parent; a disagreeing
            // parent field means this handle came back under an
            // unrelated scan and its listing is stale.
            if info.parent != parent {
                stats.parent_mismatch += 1;
                continue;
            }

            if info.is_folder() {
                if depth + 1 > self.max_depth {
                    stats.depth_limited += 1;
                    continue;
                }
                stats.folders_entered += 1;
                self.scan(handle, depth + 1, cancel, stats, on_leaf);
            } else {
                on_leaf(&mut *self.session, handle, &info, stats);
            }
        }
    }
}
