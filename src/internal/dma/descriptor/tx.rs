//! TX DMA descriptor for frame transmission.

use core::sync::atomic::{Ordering, fence};

use super::bits::{tdes0, tdes1};
use super::{DESCRIPTOR_SIZE, Ownership, VolatileCell};

/// TX DMA descriptor (alternate 8-word layout, 32 bytes).
#[repr(C, align(4))]
pub struct TxDescriptor {
    /// TDES0: Status and control bits
    tdes0: VolatileCell<u32>,
    /// TDES1: Buffer sizes
    tdes1: VolatileCell<u32>,
    /// TDES2: Buffer 1 address
    buffer1_addr: VolatileCell<u32>,
    /// TDES3: Next descriptor address (chained mode)
    next_desc: VolatileCell<u32>,
    /// TDES4: Reserved
    _reserved1: VolatileCell<u32>,
    /// TDES5: Reserved
    _reserved2: VolatileCell<u32>,
    /// TDES6: Timestamp low
    _timestamp_low: VolatileCell<u32>,
    /// TDES7: Timestamp high
    _timestamp_high: VolatileCell<u32>,
}

impl TxDescriptor {
    /// Size of the descriptor in bytes
    pub const SIZE: usize = DESCRIPTOR_SIZE;

    /// Create a new zeroed TX descriptor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tdes0: VolatileCell::new(0),
            tdes1: VolatileCell::new(0),
            buffer1_addr: VolatileCell::new(0),
            next_desc: VolatileCell::new(0),
            _reserved1: VolatileCell::new(0),
            _reserved2: VolatileCell::new(0),
            _timestamp_low: VolatileCell::new(0),
            _timestamp_high: VolatileCell::new(0),
        }
    }

    /// Initialize descriptor for chained mode, owned by software.
    pub fn setup_chained(&self, next_desc: u32) {
        self.tdes0.set(0);
        self.tdes1.set(0);
        self.buffer1_addr.set(0);
        self.next_desc.set(next_desc);
    }

    /// Current owner of the descriptor.
    #[inline(always)]
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        let owner = Ownership::from_status(self.tdes0.get(), tdes0::OWN);
        fence(Ordering::SeqCst);
        owner
    }

    /// Check if descriptor is owned by DMA.
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.ownership() == Ownership::Hardware
    }

    /// Publish a whole frame held in one buffer to the DMA.
    ///
    /// Buffer pointer and length are written before the OWN bit becomes
    /// visible.
    pub fn submit(&self, buffer: u32, len: usize) {
        self.buffer1_addr.set(buffer);
        self.tdes1.set((len as u32) & tdes1::BUFFER1_SIZE_MASK);
        fence(Ordering::SeqCst);
        self.tdes0.set(tdes0::SINGLE_FRAME);
    }

    /// Check if transmission had errors.
    #[inline(always)]
    #[must_use]
    pub fn has_error(&self) -> bool {
        (self.tdes0.get() & tdes0::ERR_SUMMARY) != 0
    }

    /// Get all error flags from TDES0.
    #[inline(always)]
    #[must_use]
    pub fn error_flags(&self) -> u32 {
        self.tdes0.get() & tdes0::ALL_ERRORS
    }

    /// Get collision count for half-duplex mode.
    #[inline(always)]
    #[must_use]
    pub fn collision_count(&self) -> u8 {
        ((self.tdes0.get() & tdes0::COLLISION_COUNT_MASK) >> tdes0::COLLISION_COUNT_SHIFT)
            as u8
    }

    /// Get buffer address.
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

    /// Get raw TDES0 value for debugging.
    #[inline(always)]
    #[must_use]
    pub fn raw_tdes0(&self) -> u32 {
        self.tdes0.get()
    }

    /// Get raw TDES1 value for debugging.
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub fn raw_tdes1(&self) -> u32 {
        self.tdes1.get()
    }

    /// Close the descriptor the way the DMA does after sending the frame.
    #[cfg(test)]
    pub(crate) fn complete(&self, status: u32) {
        self.tdes0
            .update(|v| (v & !(tdes0::OWN | tdes0::ALL_ERRORS | tdes0::ERR_SUMMARY)) | status);
    }
}

impl Default for TxDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: TxDescriptor uses volatile cells for all DMA-accessed fields
unsafe impl Sync for TxDescriptor {}
unsafe impl Send for TxDescriptor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_descriptor_size() {
        assert_eq!(core::mem::size_of::<TxDescriptor>(), 32);
        assert_eq!(core::mem::align_of::<TxDescriptor>(), 4);
        assert_eq!(TxDescriptor::SIZE, core::mem::size_of::<TxDescriptor>());
    }

    #[test]
    fn setup_chained_is_software_owned() {
        let desc = TxDescriptor::new();
        desc.submit(0x1000, 60);
        desc.setup_chained(0x2000_0040);

        assert_eq!(desc.ownership(), Ownership::Software);
        assert_eq!(desc.raw_tdes0(), 0);
        assert_eq!(desc.next_desc_addr(), 0x2000_0040);
    }

    #[test]
    fn submit_sets_single_frame_flags() {
        let desc = TxDescriptor::new();
        desc.submit(0x1234_5678, 1514);

        let raw = desc.raw_tdes0();
        assert!(desc.is_owned());
        assert!(raw & tdes0::FIRST_SEGMENT != 0);
        assert!(raw & tdes0::LAST_SEGMENT != 0);
        assert!(raw & tdes0::INTERRUPT_ON_COMPLETE != 0);
        assert!(raw & tdes0::SECOND_ADDR_CHAINED != 0);
        assert_eq!(desc.raw_tdes1() & tdes1::BUFFER1_SIZE_MASK, 1514);
        assert_eq!(desc.buffer_addr(), 0x1234_5678);
    }

    #[test]
    fn submit_keeps_chain_pointer() {
        let desc = TxDescriptor::new();
        desc.setup_chained(0xCAFE_0000);
        desc.submit(0x10, 64);
        assert_eq!(desc.next_desc_addr(), 0xCAFE_0000);
    }

    #[test]
    fn completion_reports_errors() {
        let desc = TxDescriptor::new();
        desc.submit(0x10, 64);
        desc.complete(
            tdes0::ERR_SUMMARY | tdes0::LATE_COLLISION | (3 << tdes0::COLLISION_COUNT_SHIFT),
        );

        assert!(!desc.is_owned());
        assert!(desc.has_error());
        assert_eq!(desc.error_flags(), tdes0::LATE_COLLISION);
        assert_eq!(desc.collision_count(), 3);
    }
}
