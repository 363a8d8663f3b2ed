//! Payload decoding and downscaling for eligible image objects.

use std::io::Cursor;

use image::{imageops, ImageReader, RgbaImage};

use crate::device::{DeviceSession, MtpTransport};
use crate::frame::DecodedFrame;
use crate::gallery::object::{ObjectHandle, ObjectInfo};
use crate::gallery::walker::WalkStats;

/// Default display-bound width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 800;

/// Default display-bound height in pixels.
pub const DEFAULT_MAX_HEIGHT: u32 = 600;

/// Compute the integer downscale divisor for the reported dimensions.
///
/// Per-axis ceiling division `(n - 1) / max + 1`, then the larger of
/// the two axes, so the decoded frame fits within `max_w` x `max_h`.
/// Dimensions already within bounds yield a factor of 1.
///
/// Returns `None` when width or height is 0: a malformed [`ObjectInfo`]
/// must skip the decode rather than underflow the ceiling formula.
pub fn sample_factor(width: u32, height: u32, max_w: u32, max_h: u32) -> Option<u32> {
    if width == 0 || height == 0 {
        return None;
    }
    let scale_w = (width - 1) / max_w + 1;
    let scale_h = (height - 1) / max_h + 1;
    Some(scale_w.max(scale_h))
}

/// Fetches, decodes, and downscales eligible objects into display
/// frames.
///
/// No caching, no retry, no deduplication: each eligible object is
/// fetched and decoded exactly once, and every failure mode (missing
/// payload, degenerate dimensions, malformed data) is a counted skip
/// that never aborts the walk.
pub struct DecodePipeline {
    max_width: u32,
    max_height: u32,
}

impl DecodePipeline {
    /// Create a pipeline targeting the given display bounds.
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width: max_width.max(1),
            max_height: max_height.max(1),
        }
    }

    /// Fetch and decode one eligible object into a frame.
    ///
    /// The payload is requested with the object's reported compressed
    /// size. `None` means this object was skipped; the reason is
    /// recorded in `stats`.
    pub fn produce<T: MtpTransport>(
        &self,
        session: &mut DeviceSession<T>,
        handle: ObjectHandle,
        info: &ObjectInfo,
        stats: &mut WalkStats,
    ) -> Option<DecodedFrame> {
        let Some(payload) = session.object_data(handle, info.compressed_size) else {
            stats.payload_failures += 1;
            return None;
        };

        let Some(scale) = sample_factor(
            info.image_pix_width,
            info.image_pix_height,
            self.max_width,
            self.max_height,
        ) else {
            stats.decode_failures += 1;
            return None;
        };

        let Some(image) = decode_subsampled(&payload, scale) else {
            stats.decode_failures += 1;
            return None;
        };

        stats.frames_produced += 1;
        let (width, height) = (image.width(), image.height());
        Some(DecodedFrame {
            image,
            width,
            height,
            source: handle,
        })
    }
}

impl Default for DecodePipeline {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WIDTH, DEFAULT_MAX_HEIGHT)
    }
}

/// Decode `payload` and reduce it by the integer factor `scale` along
/// both axes.
///
/// The decoder exposes no decode-time subsampling, so the raster is
/// decoded and immediately box-sampled down; the full-size buffer is
/// dropped before the frame is handed off. Output dimensions are
/// `dim / scale`, floored, with a minimum of 1.
fn decode_subsampled(payload: &[u8], scale: u32) -> Option<RgbaImage> {
    let reader = ImageReader::new(Cursor::new(payload))
        .with_guessed_format()
        .ok()?;
    let decoded = reader.decode().ok()?.into_rgba8();
    if scale <= 1 {
        return Some(decoded);
    }
    let out_w = (decoded.width() / scale).max(1);
    let out_h = (decoded.height() / scale).max(1);
    Some(imageops::thumbnail(&decoded, out_w, out_h))
}
