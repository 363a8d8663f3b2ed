//! Decoded frame handoff types.

use image::RgbaImage;
use tokio::sync::mpsc;

use crate::gallery::object::ObjectHandle;
use crate::slideshow::CancelFlag;

/// One decoded, display-ready raster frame.
///
/// Ownership moves to the sink on handoff; the pipeline holds no
/// reference afterwards, so the consumer decides when to release it.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Downscaled RGBA raster
    pub image: RgbaImage,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Handle of the object the frame was decoded from
    pub source: ObjectHandle,
}

/// Ordered, single-consumer destination for decoded frames.
///
/// Frames arrive strictly in traversal discovery order. The sink must
/// tolerate zero frames (empty device) as well as arbitrarily many; no
/// acknowledgment or backpressure is expected of it, and the producer
/// continues traversal immediately after each handoff.
pub trait FrameSink: Send {
    /// Receive the next frame.
    fn on_frame(&mut self, frame: DecodedFrame);
}

/// Adapter turning a closure into a [`FrameSink`].
pub struct FnSink<F>(pub F);

impl<F> FrameSink for FnSink<F>
where
    F: FnMut(DecodedFrame) + Send,
{
    fn on_frame(&mut self, frame: DecodedFrame) {
        (self.0)(frame)
    }
}

/// Sink that forwards frames into an unbounded channel without ever
/// blocking the producer.
///
/// A closed receiving side means the consumer was torn down, so the
/// sink raises the cancel flag; the walker observes it at its next
/// object iteration and the session still closes on the way out.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<DecodedFrame>,
    cancel: CancelFlag,
}

impl ChannelSink {
    /// Create a sink over the sending half of a frame channel.
    pub fn new(tx: mpsc::UnboundedSender<DecodedFrame>, cancel: CancelFlag) -> Self {
        Self { tx, cancel }
    }
}

impl FrameSink for ChannelSink {
    fn on_frame(&mut self, frame: DecodedFrame) {
        if self.tx.send(frame).is_err() {
            self.cancel.cancel();
        }
    }
}
