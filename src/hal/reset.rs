//! Reset Controller HAL
//!
//! This module sequences the GMAC software reset and the AXI idle wait that
//! precede ring construction. Both are bounded busy-waits paced by an
//! `embedded_hal::delay::DelayNs` provider.

use embedded_hal::delay::DelayNs;

use crate::driver::error::{Error, Result};
use crate::internal::constants::{RESET_POLL_INTERVAL_US, SOFT_RESET_TIMEOUT_MS};
use crate::internal::log::{gmac_debug, gmac_error};
use crate::internal::register::RegisterAccess;
use crate::internal::register::dma::DmaRegs;
use crate::internal::register::mac::MacRegs;

// =============================================================================
// Reset Controller
// =============================================================================

/// Reset controller for one GMAC instance
///
/// Provides methods to perform soft resets and check reset status.
#[derive(Debug)]
pub struct ResetController<'a, R: RegisterAccess, D: DelayNs> {
    /// Register window of the controller being reset
    regs: &'a R,
    /// Delay provider
    delay: D,
    /// Reset timeout in milliseconds
    timeout_ms: u32,
    /// Delay between polls in microseconds
    poll_interval_us: u32,
}

impl<'a, R: RegisterAccess, D: DelayNs> ResetController<'a, R, D> {
    /// Create a new reset controller
    pub fn new(regs: &'a R, delay: D) -> Self {
        Self {
            regs,
            delay,
            timeout_ms: SOFT_RESET_TIMEOUT_MS,
            poll_interval_us: RESET_POLL_INTERVAL_US,
        }
    }

    /// Create a new reset controller with custom timing
    pub fn with_timing(regs: &'a R, delay: D, timeout_ms: u32, poll_interval_us: u32) -> Self {
        Self {
            regs,
            delay,
            timeout_ms,
            poll_interval_us,
        }
    }

    /// Number of polls that fit in `timeout_ms`
    fn poll_budget(&self, timeout_ms: u32) -> u32 {
        timeout_ms.saturating_mul(1000) / self.poll_interval_us.max(1)
    }

    /// Perform a DMA soft reset
    ///
    /// Sets the bus mode software reset bit, raises the MAC general purpose
    /// output, and waits for the reset bit to self-clear.
    ///
    /// Returns `Err(Error::DeviceError)` if the reset doesn't complete
    /// within the configured timeout.
    pub fn soft_reset(&mut self) -> Result<()> {
        DmaRegs::new(self.regs).software_reset();
        MacRegs::new(self.regs).set_gpio_output();

        for _ in 0..self.poll_budget(self.timeout_ms) {
            if !self.is_reset_in_progress() {
                return Ok(());
            }
            self.delay.delay_us(self.poll_interval_us);
        }

        if !self.is_reset_in_progress() {
            return Ok(());
        }
        gmac_error!("GMAC reset not completed within {} ms", self.timeout_ms);
        Err(Error::DeviceError)
    }

    /// Wait for the AXI master to report both channels idle
    ///
    /// Best effort: returns `false` on timeout, which callers may ignore.
    pub fn wait_axi_idle(&mut self, timeout_ms: u32) -> bool {
        let dma = DmaRegs::new(self.regs);
        for _ in 0..self.poll_budget(timeout_ms) {
            if dma.is_axi_idle() {
                return true;
            }
            self.delay.delay_us(self.poll_interval_us);
        }
        let idle = dma.is_axi_idle();
        if !idle {
            gmac_debug!("AXI still busy after {} ms, continuing", timeout_ms);
        }
        idle
    }

    /// Check if a reset is currently in progress
    pub fn is_reset_in_progress(&self) -> bool {
        DmaRegs::new(self.regs).is_reset_in_progress()
    }

    /// Get the current timeout setting
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
