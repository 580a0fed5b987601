//! RX DMA descriptor for frame reception.

use core::sync::atomic::{Ordering, fence};

use super::bits::{rdes0, rdes1};
use super::{DESCRIPTOR_SIZE, Ownership, VolatileCell};

/// RX DMA descriptor (alternate 8-word layout, 32 bytes).
#[repr(C, align(4))]
pub struct RxDescriptor {
    /// RDES0: Status bits
    rdes0: VolatileCell<u32>,
    /// RDES1: Control and buffer sizes
    rdes1: VolatileCell<u32>,
    /// RDES2: Buffer 1 address
    buffer1_addr: VolatileCell<u32>,
    /// RDES3: Next descriptor address (chained mode)
    next_desc: VolatileCell<u32>,
    /// RDES4: Extended status (when enabled)
    _extended_status: VolatileCell<u32>,
    /// RDES5: Reserved
    _reserved: VolatileCell<u32>,
    /// RDES6: Timestamp low
    _timestamp_low: VolatileCell<u32>,
    /// RDES7: Timestamp high
    _timestamp_high: VolatileCell<u32>,
}

impl RxDescriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = DESCRIPTOR_SIZE;

    /// Create a new zeroed descriptor. Call `setup_chained()` before use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rdes0: VolatileCell::new(0),
            rdes1: VolatileCell::new(0),
            buffer1_addr: VolatileCell::new(0),
            next_desc: VolatileCell::new(0),
            _extended_status: VolatileCell::new(0),
            _reserved: VolatileCell::new(0),
            _timestamp_low: VolatileCell::new(0),
            _timestamp_high: VolatileCell::new(0),
        }
    }

    /// Configure descriptor in chained mode and give it to the DMA.
    ///
    /// `buffer` and `next_desc` are bus addresses.
    pub fn setup_chained(&self, buffer: u32, buffer_size: usize, next_desc: u32) {
        self.rdes1.set(
            rdes1::SECOND_ADDR_CHAINED | ((buffer_size as u32) & rdes1::BUFFER1_SIZE_MASK),
        );
        self.buffer1_addr.set(buffer);
        self.next_desc.set(next_desc);
        self.give_to_dma();
    }

    /// Current owner of the descriptor.
    ///
    /// Fields written by the DMA may only be read after this reports
    /// [`Ownership::Software`]; the fence orders those reads after the OWN
    /// bit observation.
    #[inline(always)]
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        let owner = Ownership::from_status(self.rdes0.get(), rdes0::OWN);
        fence(Ordering::SeqCst);
        owner
    }

    /// Returns true if DMA owns this descriptor.
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.ownership() == Ownership::Hardware
    }

    /// Hand the descriptor back to the DMA, clearing the old status.
    #[inline(always)]
    pub fn give_to_dma(&self) {
        fence(Ordering::SeqCst);
        self.rdes0.set(rdes0::OWN);
    }

    /// Complete frame in single descriptor (first and last).
    #[inline(always)]
    #[must_use]
    pub fn is_complete_frame(&self) -> bool {
        (self.rdes0.get() & rdes0::SINGLE_DESC) == rdes0::SINGLE_DESC
    }

    /// Returns true if error summary bit is set.
    #[inline(always)]
    #[must_use]
    pub fn has_error(&self) -> bool {
        (self.rdes0.get() & rdes0::ERR_SUMMARY) != 0
    }

    /// Raw error flags from RDES0.
    #[inline(always)]
    #[must_use]
    pub fn error_flags(&self) -> u32 {
        self.rdes0.get() & rdes0::ALL_ERRORS
    }

    /// Frame length as written back by the DMA (valid on last descriptor).
    #[inline(always)]
    #[must_use]
    pub fn frame_length(&self) -> usize {
        ((self.rdes0.get() & rdes0::FRAME_LEN_MASK) >> rdes0::FRAME_LEN_SHIFT) as usize
    }

    /// Programmed buffer 1 size.
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        (self.rdes1.get() & rdes1::BUFFER1_SIZE_MASK) as usize
    }

    /// Get buffer address.
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub fn buffer_addr(&self) -> u32 {
        self.buffer1_addr.get()
    }

    /// Get next descriptor address in chained mode.
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub fn next_desc_addr(&self) -> u32 {
        self.next_desc.get()
    }

    /// Get raw RDES0 value for debugging.
    #[inline(always)]
    #[must_use]
    pub fn raw_rdes0(&self) -> u32 {
        self.rdes0.get()
    }

    /// Get raw RDES1 value for debugging.
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub fn raw_rdes1(&self) -> u32 {
        self.rdes1.get()
    }

    /// Overwrite RDES0 the way the DMA does when it closes a descriptor.
    #[cfg(test)]
    pub(crate) fn complete(&self, status: u32) {
        self.rdes0.set(status & !rdes0::OWN);
    }
}

impl Default for RxDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: RxDescriptor uses volatile cells for all DMA-accessed fields
unsafe impl Sync for RxDescriptor {}
unsafe impl Send for RxDescriptor {}
