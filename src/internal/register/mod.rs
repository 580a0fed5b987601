//! Memory-mapped register definitions for the DesignWare GMAC
//!
//! Register access goes through the [`RegisterAccess`] trait so the driver can
//! run against real MMIO ([`Mmio`]) or a simulated register file in tests.
//! Offsets are relative to the controller base; the MAC block starts at
//! `0x0000` and the DMA block at `0x1000`.

pub mod dma;
pub mod mac;

// =============================================================================
// Register Access
// =============================================================================

/// 32-bit register window of one GMAC controller.
///
/// Implementations must perform every access exactly once and in program
/// order; the driver relies on writes to status and poll-demand registers
/// having side effects.
pub trait RegisterAccess {
    /// Read the register at `offset` bytes from the controller base
    fn read(&self, offset: usize) -> u32;

    /// Write the register at `offset` bytes from the controller base
    fn write(&self, offset: usize, value: u32);

    /// Read-modify-write a register
    #[inline(always)]
    fn modify<F>(&self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(offset);
        self.write(offset, f(value));
    }

    /// Set bits in a register (read-modify-write)
    #[inline(always)]
    fn set_bits(&self, offset: usize, bits: u32) {
        self.modify(offset, |v| v | bits);
    }

    /// Clear bits in a register (read-modify-write)
    #[inline(always)]
    fn clear_bits(&self, offset: usize, bits: u32) {
        self.modify(offset, |v| v & !bits);
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &T {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    #[inline(always)]
    fn write(&self, offset: usize, value: u32) {
        (**self).write(offset, value);
    }
}

/// Volatile MMIO register window at a platform-supplied base address.
#[derive(Debug)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Create a register window at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the 4-byte aligned base address of a GMAC controller
    /// mapped as device memory, and nothing else may drive that controller
    /// while this window is in use.
    #[must_use]
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the window
    #[inline(always)]
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl RegisterAccess for Mmio {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        // SAFETY: `new` guarantees the window maps the controller registers
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u32) }
    }

    #[inline(always)]
    fn write(&self, offset: usize, value: u32) {
        // SAFETY: `new` guarantees the window maps the controller registers
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u32, value) }
    }
}

// =============================================================================
// Register Access Macros
// =============================================================================

/// Generate read/write accessor methods for a register.
///
/// # Example
/// ```ignore
/// impl<R: RegisterAccess> DmaRegs<'_, R> {
///     reg_rw!(bus_mode, set_bus_mode, DMABUSMODE_OFFSET, "Bus Mode register");
/// }
/// ```
macro_rules! reg_rw {
    ($read_fn:ident, $write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            self.regs.read($offset)
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        pub fn $write_fn(&self, value: u32) {
            self.regs.write($offset, value);
        }
    };
}

/// Generate a read-only accessor method for a register.
macro_rules! reg_ro {
    ($read_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        pub fn $read_fn(&self) -> u32 {
            self.regs.read($offset)
        }
    };
}

/// Generate set/clear bit operation methods for a register.
///
/// # Example
/// ```ignore
/// impl<R: RegisterAccess> DmaRegs<'_, R> {
///     reg_bit_ops!(start_tx, stop_tx, DMAOPERATION_OFFSET, DMAOPERATION_ST,
///                  "TX DMA", "Start", "Stop");
/// }
/// ```
macro_rules! reg_bit_ops {
    (
        $set_fn:ident,
        $clear_fn:ident,
        $offset:expr,
        $bit:expr,
        $what:expr,
        $set_verb:expr,
        $clear_verb:expr
    ) => {
        #[doc = concat!($set_verb, " ", $what)]
        #[inline(always)]
        pub fn $set_fn(&self) {
            self.regs.set_bits($offset, $bit);
        }

        #[doc = concat!($clear_verb, " ", $what)]
        #[inline(always)]
        pub fn $clear_fn(&self) {
            self.regs.clear_bits($offset, $bit);
        }
    };
}

/// Generate a bit check method (true when bit is set).
macro_rules! reg_bit_check {
    ($fn:ident, $offset:expr, $bit:expr, $doc:expr) => {
        #[doc = $doc]
        #[inline(always)]
        pub fn $fn(&self) -> bool {
            (self.regs.read($offset) & $bit) != 0
        }
    };
}

// Export macros for use in submodules
pub(crate) use reg_bit_check;
pub(crate) use reg_bit_ops;
pub(crate) use reg_ro;
pub(crate) use reg_rw;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SimulatedGmac;

    #[test]
    fn modify_preserves_other_bits() {
        let sim = SimulatedGmac::new();
        sim.poke(0x00, 0xF0);
        sim.set_bits(0x00, 0x0F);
        assert_eq!(sim.peek(0x00), 0xFF);
        sim.clear_bits(0x00, 0x30);
        assert_eq!(sim.peek(0x00), 0xCF);
    }

    #[test]
    fn reference_forwards_to_backend() {
        let sim = SimulatedGmac::new();
        let by_ref = &sim;
        by_ref.write(0x04, 0x1234);
        assert_eq!(sim.read(0x04), 0x1234);
    }
}
