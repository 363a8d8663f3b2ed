//! Device session and the MTP transport seam.

mod session;
mod transport;

pub use session::DeviceSession;
pub use transport::MtpTransport;
