//! Error types for the GMAC driver
//!
//! Every fallible operation returns [`Result`]. The variants follow the
//! network-interface contract the driver implements: lifecycle violations,
//! malformed arguments, unimplemented features, and the two retryable
//! conditions (`NotReady`, `BufferTooSmall`).

/// GMAC driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Missing or malformed argument
    InvalidParameter,
    /// Unexpected lifecycle state or hardware reset timeout
    DeviceError,
    /// Operation requires a started device but it is stopped
    NotStarted,
    /// `start` called on a device that is already started
    AlreadyStarted,
    /// Feature not implemented, or extra buffer space requested
    Unsupported,
    /// Receive buffer cannot hold the frame; the frame is dropped
    BufferTooSmall {
        /// Length of the dropped frame
        required: usize,
    },
    /// Nothing to receive, no link, or TX slot still owned by the DMA
    NotReady,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BufferTooSmall { required } => {
                write!(f, "{} (need {required} bytes)", self.as_str())
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

impl Error {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::InvalidParameter => "invalid parameter",
            Error::DeviceError => "device error",
            Error::NotStarted => "device not started",
            Error::AlreadyStarted => "device already started",
            Error::Unsupported => "unsupported",
            Error::BufferTooSmall { .. } => "buffer too small for frame",
            Error::NotReady => "not ready",
        }
    }

    /// Whether re-invoking the operation later can succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Error::NotReady | Error::BufferTooSmall { .. })
    }
}

/// Result type alias using the driver's error type
pub type Result<T> = core::result::Result<T, Error>;
