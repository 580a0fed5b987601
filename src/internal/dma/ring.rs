//! Circular descriptor ring carved out of an oversized region.
//!
//! The ring reserves one spare descriptor-width of storage so that an aligned
//! base can always be found inside it, whatever alignment the region itself
//! landed on. The live slots start at `start + (stride - start % stride)`,
//! which skips a full stride when the region is already aligned.

use core::mem::size_of;
use core::ptr;

/// Circular descriptor ring with wraparound index.
#[repr(C)]
pub struct DescriptorRing<D, const N: usize> {
    /// Descriptor storage, `N` slots
    slots: [D; N],
    /// One extra slot so the aligned window always fits
    spare: D,
    /// Current index for processing
    current: usize,
}

impl<D, const N: usize> DescriptorRing<D, N> {
    /// Descriptor stride and alignment of the live window
    pub const STRIDE: usize = size_of::<D>();

    /// Create a ring from `N + 1` descriptors worth of storage
    #[must_use]
    pub const fn from_parts(slots: [D; N], spare: D) -> Self {
        const { assert!(N > 1, "descriptor rings need at least two slots") };
        Self {
            slots,
            spare,
            current: 0,
        }
    }

    /// Get the number of descriptors in the ring
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if the ring is empty (always false for fixed-size ring)
    #[cfg(test)]
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Get the current index
    #[inline(always)]
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Advance the current index by one, wrapping around
    #[inline(always)]
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % N;
    }

    /// Reset the current index to 0
    #[inline(always)]
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Byte offset of the aligned window from the start of the region
    #[inline(always)]
    fn window_offset(&self) -> usize {
        let start = ptr::from_ref(self) as usize;
        Self::STRIDE - start % Self::STRIDE
    }

    /// Pointer to slot `index` of the aligned window
    #[inline(always)]
    fn slot_ptr(&self, index: usize) -> *const D {
        // `slots` sits at offset 0 (repr(C)), so the struct pointer carries
        // provenance over both `slots` and `spare`.
        ptr::from_ref(self)
            .cast::<u8>()
            .wrapping_add(self.window_offset())
            .cast::<D>()
            .wrapping_add(index % N)
    }

    /// Get a reference to a descriptor at a specific index
    #[inline(always)]
    pub fn get(&self, index: usize) -> &D {
        // SAFETY: the window starts at most one stride into a region of N + 1
        // strides, so all N slots are in bounds. The offset is a multiple of
        // the descriptor alignment because the stride is, and every byte
        // pattern is a valid descriptor.
        unsafe { &*self.slot_ptr(index) }
    }

    /// Get a reference to the current descriptor
    #[inline(always)]
    pub fn current(&self) -> &D {
        self.get(self.current)
    }

    /// Bus address of slot `index` (the DMA engine addresses 32 bits)
    #[inline(always)]
    pub fn bus_addr(&self, index: usize) -> u32 {
        self.slot_ptr(index) as usize as u32
    }

    /// Bus address of the first slot, for the descriptor list register
    #[inline(always)]
    pub fn base_addr_u32(&self) -> u32 {
        self.bus_addr(0)
    }

    /// Iterate over all live descriptors in ring order
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &D> {
        (0..N).map(move |i| self.get(i))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::dma::descriptor::TxDescriptor;

    fn tx_ring<const N: usize>() -> DescriptorRing<TxDescriptor, N> {
        DescriptorRing::from_parts([const { TxDescriptor::new() }; N], TxDescriptor::new())
    }

    #[test]
    fn test_descriptor_ring_advance() {
        let mut ring = tx_ring::<4>();

        assert_eq!(ring.current_index(), 0);
        ring.advance();
        assert_eq!(ring.current_index(), 1);
        ring.advance();
        ring.advance();
        assert_eq!(ring.current_index(), 3);
        ring.advance();
        assert_eq!(ring.current_index(), 0); // Wrapped
    }

    #[test]
    fn test_descriptor_ring_reset() {
        let mut ring = tx_ring::<4>();
        ring.advance();
        ring.advance();
        ring.reset();
        assert_eq!(ring.current_index(), 0);
    }

    #[test]
    fn window_is_aligned_and_in_bounds() {
        let ring = tx_ring::<8>();
        let start = ptr::from_ref(&ring) as usize;
        let end = start + 9 * TxDescriptor::SIZE;

        for i in 0..8 {
            let addr = ptr::from_ref(ring.get(i)) as usize;
            assert_eq!(addr % TxDescriptor::SIZE, 0);
            assert!(addr > start);
            assert!(addr + TxDescriptor::SIZE <= end);
        }
    }

    #[test]
    fn slots_are_contiguous_and_wrap() {
        let ring = tx_ring::<4>();
        let base = ptr::from_ref(ring.get(0)) as usize;
        assert_eq!(ptr::from_ref(ring.get(3)) as usize, base + 3 * TxDescriptor::SIZE);
        assert!(ptr::eq(ring.get(4), ring.get(0)));
    }

    #[test]
    fn bus_addresses_follow_stride() {
        let ring = tx_ring::<4>();
        let base = ring.base_addr_u32();
        assert_eq!(ring.bus_addr(1), base.wrapping_add(32));
        assert_eq!(ring.bus_addr(3), base.wrapping_add(96));
    }

    #[test]
    fn iter_yields_every_slot() {
        let ring = tx_ring::<6>();
        assert_eq!(ring.iter().count(), 6);
        assert_eq!(ring.len(), 6);
        assert!(!ring.is_empty());
    }
}
