//! DMA engine managing the TX/RX descriptor rings and the RX buffer pool.

use super::descriptor::{Ownership, RxDescriptor, TxDescriptor};
use super::ring::DescriptorRing;
use crate::driver::error::{Error, Result};
use crate::internal::constants::RX_BUFFER_SIZE;
use crate::internal::log::{gmac_debug, gmac_warn};
use crate::internal::register::RegisterAccess;
use crate::internal::register::dma::{DMASTATUS_RU, DmaRegs};

fn log_rx_error(desc: &RxDescriptor) {
    use crate::internal::dma::descriptor::bits::rdes0;

    let raw = desc.raw_rdes0();
    let sa_fail = (raw & rdes0::SA_FILTER_FAIL) != 0;
    let da_fail = (raw & rdes0::DA_FILTER_FAIL) != 0;

    gmac_warn!(
        "RX frame error: rdes0={:08x} flags={:08x} sa_filter_fail={} da_filter_fail={}",
        raw,
        desc.error_flags(),
        sa_fail,
        da_fail
    );
}

/// DMA Engine with statically allocated descriptors and RX buffers.
///
/// TX frames are never copied: TX descriptors point straight at caller
/// memory, so only the receive side has a buffer pool.
///
/// # Type Parameters
/// * `RX_DESCS` - Number of receive descriptors/buffers
/// * `TX_DESCS` - Number of transmit descriptors
pub struct DmaEngine<const RX_DESCS: usize, const TX_DESCS: usize> {
    /// RX descriptor ring; its index is the RX read index
    rx_ring: DescriptorRing<RxDescriptor, RX_DESCS>,
    /// TX descriptor ring; its index is the TX write index
    tx_ring: DescriptorRing<TxDescriptor, TX_DESCS>,
    /// Next TX slot whose completion has not been reported
    tx_release: usize,
    /// Frames published but not yet reported complete
    tx_pending: usize,
    /// RX data buffers, one per RX descriptor
    rx_buffers: [[u8; RX_BUFFER_SIZE]; RX_DESCS],
}

impl<const RX_DESCS: usize, const TX_DESCS: usize> DmaEngine<RX_DESCS, TX_DESCS> {
    /// Create a new DMA engine with zeroed rings and buffers. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rx_ring: DescriptorRing::from_parts(
                [const { RxDescriptor::new() }; RX_DESCS],
                RxDescriptor::new(),
            ),
            tx_ring: DescriptorRing::from_parts(
                [const { TxDescriptor::new() }; TX_DESCS],
                TxDescriptor::new(),
            ),
            tx_release: 0,
            tx_pending: 0,
            rx_buffers: [[0; RX_BUFFER_SIZE]; RX_DESCS],
        }
    }

    // =========================================================================
    // Ring Construction
    // =========================================================================

    /// Bus address of the first RX descriptor
    pub fn rx_base_addr(&self) -> u32 {
        self.rx_ring.base_addr_u32()
    }

    /// Bus address of the first TX descriptor
    pub fn tx_base_addr(&self) -> u32 {
        self.tx_ring.base_addr_u32()
    }

    /// Bus address of RX buffer `index`
    fn rx_buffer_addr(&self, index: usize) -> u32 {
        self.rx_buffers[index].as_ptr() as usize as u32
    }

    /// Rebuild both rings and rewind every index.
    ///
    /// All RX descriptors end up owned by the DMA with a full buffer each;
    /// all TX descriptors end up owned by software. The last slot of each
    /// ring chains back to slot 0.
    pub fn init_rings(&mut self) {
        self.rx_ring.reset();
        self.tx_ring.reset();
        self.tx_release = 0;
        self.tx_pending = 0;

        for i in 0..RX_DESCS {
            let next = self.rx_ring.bus_addr(i + 1);
            let buffer = self.rx_buffer_addr(i);
            self.rx_ring.get(i).setup_chained(buffer, RX_BUFFER_SIZE, next);
        }

        for i in 0..TX_DESCS {
            let next = self.tx_ring.bus_addr(i + 1);
            self.tx_ring.get(i).setup_chained(next);
        }
    }

    // =========================================================================
    // Receive
    // =========================================================================

    /// Drain the RX ring until one frame is delivered or the ring is empty.
    ///
    /// Every software-owned descriptor visited is recycled to the DMA,
    /// whether its frame was delivered, too large for `buf`, or split over
    /// several descriptors. Returns the frame length on success.
    pub fn receive<R: RegisterAccess>(
        &mut self,
        dma: &DmaRegs<'_, R>,
        buf: &mut [u8],
    ) -> Result<usize> {
        loop {
            let index = self.rx_ring.current_index();
            let desc = self.rx_ring.current();
            if desc.ownership() == Ownership::Hardware {
                return Err(Error::NotReady);
            }

            let outcome = if desc.is_complete_frame() {
                let len = desc.frame_length();
                if desc.has_error() {
                    log_rx_error(desc);
                }
                if len > RX_BUFFER_SIZE {
                    gmac_warn!("RX frame length {} exceeds buffer, dropped", len);
                    None
                } else if buf.len() < len {
                    gmac_debug!("RX buffer too small: have {}, need {}", buf.len(), len);
                    Some(Err(Error::BufferTooSmall { required: len }))
                } else {
                    buf[..len].copy_from_slice(&self.rx_buffers[index][..len]);
                    Some(Ok(len))
                }
            } else {
                gmac_debug!("RX multi-descriptor frame dropped at slot {}", index);
                None
            };

            desc.give_to_dma();
            self.rx_ring.advance();

            if dma.status() & DMASTATUS_RU != 0 {
                dma.set_status(DMASTATUS_RU);
                dma.rx_poll_demand();
            }

            if let Some(result) = outcome {
                return result;
            }
        }
    }

    // =========================================================================
    // Transmit
    // =========================================================================

    /// Publish one frame at the TX write index.
    ///
    /// A slot is reusable only once the DMA has released it and its
    /// completion has been reported through [`reclaim_tx`](Self::reclaim_tx).
    pub fn transmit(&mut self, buffer: u32, len: usize) -> Result<()> {
        if self.tx_pending == TX_DESCS {
            gmac_debug!("TX ring full, {} completions unreported", self.tx_pending);
            return Err(Error::NotReady);
        }
        let desc = self.tx_ring.current();
        if desc.ownership() == Ownership::Hardware {
            return Err(Error::NotReady);
        }
        desc.submit(buffer, len);
        self.tx_ring.advance();
        self.tx_pending += 1;
        Ok(())
    }

    /// Report the oldest completed TX buffer, at most one per call.
    pub fn reclaim_tx(&mut self) -> Option<u32> {
        if self.tx_pending == 0 {
            return None;
        }
        let desc = self.tx_ring.get(self.tx_release);
        if desc.ownership() == Ownership::Hardware {
            return None;
        }
        if desc.has_error() {
            gmac_warn!(
                "TX frame error: tdes0={:08x} flags={:08x} collisions={}",
                desc.raw_tdes0(),
                desc.error_flags(),
                desc.collision_count()
            );
        }
        let addr = desc.buffer_addr();
        self.tx_release = (self.tx_release + 1) % TX_DESCS;
        self.tx_pending -= 1;
        Some(addr)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Index of the next RX descriptor the driver will inspect
    pub fn rx_read_index(&self) -> usize {
        self.rx_ring.current_index()
    }

    /// Index of the next TX slot the driver may publish into
    pub fn tx_write_index(&self) -> usize {
        self.tx_ring.current_index()
    }

    /// Index of the next TX slot whose completion is unreported
    pub fn tx_release_index(&self) -> usize {
        self.tx_release
    }

    /// Number of published frames whose completion is unreported
    pub fn tx_pending(&self) -> usize {
        self.tx_pending
    }

    /// Owner of RX descriptor `index`
    pub fn rx_ownership(&self, index: usize) -> Ownership {
        self.rx_ring.get(index).ownership()
    }

    /// Owner of TX descriptor `index`
    pub fn tx_ownership(&self, index: usize) -> Ownership {
        self.tx_ring.get(index).ownership()
    }

    /// RX descriptor `index`
    #[cfg(test)]
    pub(crate) fn rx_descriptor(&self, index: usize) -> &RxDescriptor {
        self.rx_ring.get(index)
    }

    /// TX descriptor `index`
    #[cfg(test)]
    pub(crate) fn tx_descriptor(&self, index: usize) -> &TxDescriptor {
        self.tx_ring.get(index)
    }

    /// Place `frame` in RX slot `index` and close the descriptor with
    /// `status` plus the frame length, as the DMA would.
    #[cfg(test)]
    pub(crate) fn simulate_rx(&mut self, index: usize, frame: &[u8], status: u32) {
        use super::descriptor::bits::rdes0;

        self.rx_buffers[index][..frame.len()].copy_from_slice(frame);
        let len = (frame.len() as u32) << rdes0::FRAME_LEN_SHIFT;
        self.rx_ring.get(index).complete(status | len);
    }

    /// Close RX slot `index` with a raw status word, leaving the buffer as is.
    #[cfg(test)]
    pub(crate) fn simulate_rx_status(&self, index: usize, status: u32) {
        self.rx_ring.get(index).complete(status);
    }

    /// Close TX slot `index` as the DMA does after sending it.
    #[cfg(test)]
    pub(crate) fn simulate_tx_done(&self, index: usize) {
        self.tx_ring.get(index).complete(0);
    }
}

impl<const RX_DESCS: usize, const TX_DESCS: usize> Default for DmaEngine<RX_DESCS, TX_DESCS> {
    fn default() -> Self {
        Self::new()
    }
}
