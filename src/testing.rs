//! Host-side test doubles.
//!
//! - [`SimulatedGmac`]: register file standing in for the controller, with
//!   the side effects the driver depends on (self-clearing reset bit,
//!   write-1-to-clear status, poll-demand doorbells)
//! - [`MockDelay`]: `DelayNs` implementation that only records elapsed time
//!
//! The DMA itself is not simulated. Tests flip descriptor ownership through
//! the `simulate_*` helpers on the driver.

extern crate std;

use core::cell::{Cell, RefCell};
use std::boxed::Box;
use std::collections::HashMap;
use std::rc::Rc;

use crate::driver::config::GmacConfig;
use crate::driver::gmac::Gmac;
use crate::internal::register::RegisterAccess;
use crate::internal::register::dma::{
    DMABUSMODE_OFFSET, DMABUSMODE_SW_RST, DMARXPOLLDEMAND_OFFSET, DMASTATUS_OFFSET,
    DMATXPOLLDEMAND_OFFSET,
};
use crate::internal::register::mac::{GMACMIISTATUS_LNKSTS, GMACMIISTATUS_OFFSET};

// =============================================================================
// Simulated Register File
// =============================================================================

#[derive(Default)]
struct SimState {
    registers: RefCell<HashMap<usize, u32>>,
    tx_poll_demands: Cell<usize>,
    rx_poll_demands: Cell<usize>,
    stuck_reset: Cell<bool>,
}

/// Simulated GMAC register window
///
/// Clones share the same register file, so a test can keep a handle while
/// the driver owns another.
#[derive(Clone, Default)]
pub struct SimulatedGmac {
    state: Rc<SimState>,
}

impl SimulatedGmac {
    /// Create a register file with every register reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a register without side effects
    pub fn peek(&self, offset: usize) -> u32 {
        self.state.registers.borrow().get(&offset).copied().unwrap_or(0)
    }

    /// Store a register value without side effects
    pub fn poke(&self, offset: usize, value: u32) {
        self.state.registers.borrow_mut().insert(offset, value);
    }

    /// Drive the link status bit
    pub fn set_link(&self, up: bool) {
        let value = self.peek(GMACMIISTATUS_OFFSET);
        let value = if up {
            value | GMACMIISTATUS_LNKSTS
        } else {
            value & !GMACMIISTATUS_LNKSTS
        };
        self.poke(GMACMIISTATUS_OFFSET, value);
    }

    /// Latch DMA status bits, as the hardware does when an event occurs
    pub fn raise_status(&self, bits: u32) {
        self.poke(DMASTATUS_OFFSET, self.peek(DMASTATUS_OFFSET) | bits);
    }

    /// Keep the software reset bit set once written
    pub fn set_stuck_reset(&self, stuck: bool) {
        self.state.stuck_reset.set(stuck);
    }

    /// Number of transmit poll demands issued
    pub fn tx_poll_demands(&self) -> usize {
        self.state.tx_poll_demands.get()
    }

    /// Number of receive poll demands issued
    pub fn rx_poll_demands(&self) -> usize {
        self.state.rx_poll_demands.get()
    }
}

impl RegisterAccess for SimulatedGmac {
    fn read(&self, offset: usize) -> u32 {
        self.peek(offset)
    }

    fn write(&self, offset: usize, value: u32) {
        match offset {
            DMASTATUS_OFFSET => {
                self.poke(offset, self.peek(offset) & !value);
            }
            DMATXPOLLDEMAND_OFFSET => {
                let count = &self.state.tx_poll_demands;
                count.set(count.get() + 1);
            }
            DMARXPOLLDEMAND_OFFSET => {
                let count = &self.state.rx_poll_demands;
                count.set(count.get() + 1);
            }
            DMABUSMODE_OFFSET if !self.state.stuck_reset.get() => {
                self.poke(offset, value & !DMABUSMODE_SW_RST);
            }
            _ => self.poke(offset, value),
        }
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay implementation for testing
///
/// Records the total time "delayed" so bounded waits can be checked.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += u64::from(ns);
    }
}

// =============================================================================
// Driver Fixtures
// =============================================================================

/// Ring length used by driver-level tests
pub const TEST_RING_LEN: usize = 4;

/// Driver over the simulated register file with small rings
pub type TestGmac = Gmac<SimulatedGmac, TEST_RING_LEN, TEST_RING_LEN>;

/// Started and initialized driver, boxed so descriptor addresses stay put
pub fn initialized_gmac() -> (SimulatedGmac, Box<TestGmac>) {
    let sim = SimulatedGmac::new();
    let mut gmac = Box::new(TestGmac::new(sim.clone(), GmacConfig::new()));
    let mut delay = MockDelay::new();
    gmac.start().unwrap();
    gmac.initialize(0, 0, &mut delay).unwrap();
    (sim, gmac)
}

#[cfg(test)]
mod tests {
    use embedded_hal::delay::DelayNs;

    use super::*;

    #[test]
    fn clones_share_registers() {
        let sim = SimulatedGmac::new();
        let other = sim.clone();
        other.write(0x10, 0xABCD);
        assert_eq!(sim.peek(0x10), 0xABCD);
    }

    #[test]
    fn reset_bit_self_clears_unless_stuck() {
        let sim = SimulatedGmac::new();
        sim.write(DMABUSMODE_OFFSET, DMABUSMODE_SW_RST | 0x80);
        assert_eq!(sim.peek(DMABUSMODE_OFFSET), 0x80);

        sim.set_stuck_reset(true);
        sim.write(DMABUSMODE_OFFSET, DMABUSMODE_SW_RST);
        assert_eq!(sim.peek(DMABUSMODE_OFFSET), DMABUSMODE_SW_RST);
    }

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_ns(1000);
        delay.delay_ns(2000);
        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_ms(), 0);
        delay.delay_ms(2);
        assert_eq!(delay.total_ms(), 2);
    }
}
