//! Eligibility policy for displayable image objects.

use crate::gallery::object::{ObjectFormat, ObjectInfo};

/// Check whether a non-folder object is a displayable image.
///
/// An object qualifies when its format is EXIF JPEG and the device does
/// not mark it non-transferable. Any other combination is silently
/// excluded: not an error, simply not a displayable image. The
/// predicate is pure and independent of folder depth.
pub fn is_eligible_image(info: &ObjectInfo) -> bool {
    info.format == ObjectFormat::ExifJpeg && info.protection_status.is_transferable()
}
