//! TX and RX DMA descriptor structures.
//!
//! Each descriptor points to a data buffer and contains status/control bits
//! for CPU/DMA ownership coordination. The hardware only ever looks at the
//! OWN bit; [`Ownership`] is the software-side view of that bit.

pub mod bits;
pub mod rx;
pub mod tx;

pub use rx::RxDescriptor;
pub use tx::TxDescriptor;

/// Size in bytes of one alternate (8-word) descriptor
pub const DESCRIPTOR_SIZE: usize = 32;

const _: () = assert!(core::mem::size_of::<RxDescriptor>() == RxDescriptor::SIZE);
const _: () = assert!(core::mem::size_of::<TxDescriptor>() == TxDescriptor::SIZE);

/// Which side may currently touch a descriptor and its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ownership {
    /// The driver owns the descriptor (OWN clear)
    Software,
    /// The DMA engine owns the descriptor (OWN set)
    Hardware,
}

impl Ownership {
    /// Decode from a status word whose OWN bit is `own`
    #[inline(always)]
    pub const fn from_status(status: u32, own: u32) -> Self {
        if status & own != 0 {
            Ownership::Hardware
        } else {
            Ownership::Software
        }
    }
}

/// Volatile cell wrapper for descriptor fields
///
/// Ensures all accesses are volatile to prevent compiler optimization
/// from reordering or caching descriptor field accesses.
#[repr(transparent)]
pub(crate) struct VolatileCell<T: Copy> {
    value: core::cell::UnsafeCell<T>,
}

// Safety: VolatileCell is safe to share between threads because all access
// is through volatile operations which are single-copy atomic for u32.
unsafe impl<T: Copy> Sync for VolatileCell<T> {}

impl<T: Copy> VolatileCell<T> {
    /// Create a new volatile cell with the given initial value
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value: core::cell::UnsafeCell::new(value),
        }
    }

    /// Read the value (volatile read)
    #[inline(always)]
    pub fn get(&self) -> T {
        unsafe { core::ptr::read_volatile(self.value.get()) }
    }

    /// Write a value (volatile write)
    #[inline(always)]
    pub fn set(&self, value: T) {
        unsafe { core::ptr::write_volatile(self.value.get(), value) }
    }

    /// Update the value using a function (read-modify-write)
    #[cfg(test)]
    #[inline(always)]
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let old = self.get();
        self.set(f(old));
    }
}

impl<T: Copy + Default> Default for VolatileCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_from_status() {
        assert_eq!(Ownership::from_status(1 << 31, 1 << 31), Ownership::Hardware);
        assert_eq!(Ownership::from_status(0x7FFF_FFFF, 1 << 31), Ownership::Software);
    }

    #[test]
    fn volatile_cell_update() {
        let cell = VolatileCell::new(0x10u32);
        cell.update(|v| v | 0x01);
        assert_eq!(cell.get(), 0x11);
    }
}
