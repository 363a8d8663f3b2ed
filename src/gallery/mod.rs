//! Object model, eligibility policy, and traversal.

pub(crate) mod filter;
pub(crate) mod object;
pub(crate) mod walker;

pub use filter::is_eligible_image;
pub use object::{
    AssociationType, ObjectFormat, ObjectHandle, ObjectInfo, ProtectionStatus, StorageId,
};
pub use walker::{TreeWalker, WalkStats};
