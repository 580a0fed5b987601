//! Frame transmission and reception.
//!
//! Both paths are poll driven and never block:
//!
//! - [`Gmac::receive`] drains the RX ring until it can deliver one frame or
//!   finds a descriptor the DMA still owns
//! - [`Gmac::transmit`] publishes one caller buffer on the TX ring without
//!   copying it; completion is reported later by
//!   [`get_status`](Gmac::get_status)

use super::error::{Error, Result};
use super::gmac::Gmac;
use crate::internal::constants::{ETH_HEADER_SIZE, MAC_ADDR_LEN, MAX_TX_BUFFER_LEN};
use crate::internal::log::gmac_debug;
use crate::internal::register::RegisterAccess;
use crate::internal::register::dma::DmaRegs;
use crate::internal::register::mac::MacRegs;

// =============================================================================
// Frame Types
// =============================================================================

/// Ethernet II header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EthernetHeader {
    /// Destination MAC address
    pub dst: [u8; MAC_ADDR_LEN],
    /// Source MAC address
    pub src: [u8; MAC_ADDR_LEN],
    /// EtherType in host byte order
    pub ethertype: u16,
}

impl EthernetHeader {
    /// Parse the header at the start of `frame`
    ///
    /// Returns `None` if `frame` is shorter than an Ethernet header.
    pub fn parse(frame: &[u8]) -> Option<Self> {
        let header = frame.get(..ETH_HEADER_SIZE)?;
        let mut dst = [0u8; MAC_ADDR_LEN];
        let mut src = [0u8; MAC_ADDR_LEN];
        dst.copy_from_slice(&header[0..6]);
        src.copy_from_slice(&header[6..12]);
        Some(Self {
            dst,
            src,
            ethertype: u16::from_be_bytes([header[12], header[13]]),
        })
    }

    /// Write the header at the start of `frame`, EtherType in network order
    ///
    /// `frame` must hold at least [`ETH_HEADER_SIZE`] bytes.
    fn write_to(&self, frame: &mut [u8]) {
        frame[0..6].copy_from_slice(&self.dst);
        frame[6..12].copy_from_slice(&self.src);
        frame[12..14].copy_from_slice(&self.ethertype.to_be_bytes());
    }
}

/// A frame delivered by [`Gmac::receive`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceivedFrame {
    /// Number of bytes copied into the caller buffer
    pub len: usize,
    /// Length of the media header at the start of the frame
    pub header_size: usize,
    /// Decoded header, if the frame is long enough to carry one
    pub header: Option<EthernetHeader>,
}

/// Header fields for [`Gmac::transmit`] to fill in
///
/// `header_size` must equal the Ethernet header length and both `dst` and
/// `protocol` must be present, otherwise the transmit is rejected. `src`
/// defaults to the current station address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxHeader {
    /// Header length the caller reserved at the start of the frame
    pub header_size: usize,
    /// Source MAC address
    pub src: Option<[u8; MAC_ADDR_LEN]>,
    /// Destination MAC address
    pub dst: Option<[u8; MAC_ADDR_LEN]>,
    /// EtherType in host byte order
    pub protocol: Option<u16>,
}

impl TxHeader {
    /// Ethernet II header from the station address to `dst`
    #[must_use]
    pub const fn ethernet(dst: [u8; MAC_ADDR_LEN], protocol: u16) -> Self {
        Self {
            header_size: ETH_HEADER_SIZE,
            src: None,
            dst: Some(dst),
            protocol: Some(protocol),
        }
    }

    /// Override the source address
    #[must_use]
    pub const fn with_source(mut self, src: [u8; MAC_ADDR_LEN]) -> Self {
        self.src = Some(src);
        self
    }

    fn resolve(&self, station: [u8; MAC_ADDR_LEN]) -> Result<EthernetHeader> {
        if self.header_size != ETH_HEADER_SIZE {
            gmac_debug!("transmit: header size {} rejected", self.header_size);
            return Err(Error::InvalidParameter);
        }
        let (Some(dst), Some(ethertype)) = (self.dst, self.protocol) else {
            gmac_debug!("transmit: header without destination or protocol");
            return Err(Error::InvalidParameter);
        };
        Ok(EthernetHeader {
            dst,
            src: self.src.unwrap_or(station),
            ethertype,
        })
    }
}

// =============================================================================
// Transfer Operations
// =============================================================================

impl<R: RegisterAccess, const RX_DESCS: usize, const TX_DESCS: usize> Gmac<R, RX_DESCS, TX_DESCS> {
    /// Receive one frame into `buf`
    ///
    /// Descriptors holding a frame split over several buffers are recycled
    /// and skipped. If `buf` is too short the frame is dropped and
    /// `BufferTooSmall` reports its length; a later call returns the next
    /// frame.
    ///
    /// # Errors
    /// - `NotStarted` - device is stopped
    /// - `DeviceError` - device is started but not initialized
    /// - `NotReady` - no complete frame is waiting
    /// - `BufferTooSmall` - `buf` cannot hold the frame, which is discarded
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<ReceivedFrame> {
        critical_section::with(|_| {
            self.require_initialized("receive")?;

            let dma = DmaRegs::new(&self.regs);
            let len = self.dma.receive(&dma, buf)?;

            Ok(ReceivedFrame {
                len,
                header_size: ETH_HEADER_SIZE,
                header: EthernetHeader::parse(&buf[..len]),
            })
        })
    }

    /// Queue `frame` for transmission without copying it
    ///
    /// With `header` set, the Ethernet header is written into the first
    /// [`ETH_HEADER_SIZE`] bytes of `frame` before it is queued. Without
    /// it, `frame` must already be a complete Ethernet frame.
    ///
    /// The DMA start, MAC transmitter enable, and transmit poll demand are
    /// asserted on every call that gets past validation, whether or not a
    /// descriptor was free.
    ///
    /// # Errors
    /// - `NotStarted` - device is stopped
    /// - `DeviceError` - device is started but not initialized
    /// - `NotReady` - no link, or the next TX descriptor is still owned by
    ///   the DMA
    /// - `InvalidParameter` - malformed `header`, or `frame` is empty,
    ///   shorter than the header, or longer than a descriptor can describe
    ///
    /// # Safety
    /// The DMA reads `frame` after this returns. On `Ok(())` the caller
    /// must keep the memory behind `frame` alive and unmodified until
    /// [`get_status`](Gmac::get_status) reports its bus address as
    /// completed, or until the device is stopped and re-initialized. The
    /// buffer must also be reachable by the DMA at a 32-bit bus address.
    pub unsafe fn transmit(&mut self, frame: &mut [u8], header: Option<TxHeader>) -> Result<()> {
        critical_section::with(|_| {
            self.require_initialized("transmit")?;

            if !self.sample_link() {
                gmac_debug!("transmit: media not present");
                return Err(Error::NotReady);
            }

            let header = match header {
                Some(fields) => Some(fields.resolve(self.current_address)?),
                None => None,
            };

            let min_len = if header.is_some() { ETH_HEADER_SIZE } else { 1 };
            if frame.len() < min_len || frame.len() > MAX_TX_BUFFER_LEN {
                gmac_debug!("transmit: frame length {} rejected", frame.len());
                return Err(Error::InvalidParameter);
            }

            if let Some(header) = header {
                header.write_to(frame);
            }

            let result = self
                .dma
                .transmit(frame.as_ptr() as usize as u32, frame.len());
            if result.is_err() {
                gmac_debug!("transmit: TX slot {} still owned by DMA", self.dma.tx_write_index());
            }

            let dma = DmaRegs::new(&self.regs);
            dma.start_tx();
            MacRegs::new(&self.regs).enable_tx();
            dma.tx_poll_demand();

            result
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
