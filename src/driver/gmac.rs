//! Core GMAC driver implementation.
//!
//! This module contains the main [`Gmac`] structure and core operations:
//!
//! - Lifecycle control (start, stop, initialize, reset, shutdown)
//! - Hardware reset and descriptor ring construction
//! - The interface parameter snapshot ([`InterfaceMode`])
//!
//! For frame transfer, see the [`transfer`](super::transfer) module.
//! For link and completion status, see the [`status`](super::status) module.
//! For receive filters and the station address, see the
//! [`filtering`](super::filtering) module.

use embedded_hal::delay::DelayNs;

use super::config::{GmacConfig, InterfaceMode, State};
use super::error::{Error, Result};
use crate::hal::reset::ResetController;
use crate::internal::constants::{DEFAULT_RX_DESCRIPTORS, DEFAULT_TX_DESCRIPTORS, MAC_ADDR_LEN};
use crate::internal::dma::{DmaEngine, Ownership};
use crate::internal::log::{gmac_debug, gmac_warn};
use crate::internal::register::RegisterAccess;
use crate::internal::register::dma::{DMAOPERATION_RSF, DMAOPERATION_TSF, DmaRegs};
use crate::internal::register::mac::{GMACCONFIG_DEFAULT, MacRegs};

// =============================================================================
// GMAC Driver
// =============================================================================

/// DesignWare GMAC driver
///
/// Owns the register window, both descriptor rings, and the RX buffer pool
/// of one controller. All operations are polled; none of them block except
/// [`initialize`](Self::initialize), which waits a bounded time for the
/// hardware reset.
///
/// # Type Parameters
/// * `R` - Register window, usually [`Mmio`](crate::Mmio)
/// * `RX_DESCS` - Number of receive descriptors and 2 KiB receive buffers
/// * `TX_DESCS` - Number of transmit descriptors
///
/// # Placement
///
/// The rings and buffers are embedded in the struct and programmed into
/// the DMA by bus address. After [`initialize`](Self::initialize) the
/// instance must not move, and it must live in memory the DMA can reach at
/// a 32-bit address. A `static` or a leaked allocation both work.
///
/// # Example
/// ```ignore
/// static mut GMAC: Gmac<Mmio> = Gmac::new(
///     unsafe { Mmio::new(0x3000_0000) },
///     GmacConfig::new().with_mac_address([0x4C, 0x4D, 0x00, 0x12, 0x34, 0x56]),
/// );
///
/// let gmac = unsafe { &mut *core::ptr::addr_of_mut!(GMAC) };
/// gmac.start()?;
/// gmac.initialize(0, 0, &mut delay)?;
/// ```
///
/// # Module Organization
///
/// The driver is split across several modules:
/// - Core operations (this module): lifecycle and initialization
/// - [`transfer`](super::transfer): receive and transmit
/// - [`status`](super::status): link, interrupts, TX completion
/// - [`filtering`](super::filtering): receive filters, station address
pub struct Gmac<R: RegisterAccess, const RX_DESCS: usize = 64, const TX_DESCS: usize = 64> {
    /// Register window
    pub(super) regs: R,
    /// DMA engine
    pub(super) dma: DmaEngine<RX_DESCS, TX_DESCS>,
    /// Current configuration
    pub(super) config: GmacConfig,
    /// Current state
    state: State,
    /// Station address in use
    pub(super) current_address: [u8; MAC_ADDR_LEN],
    /// Link state seen by the last sample
    pub(super) media_present: bool,
}

/// GMAC with the reference ring sizes (64 RX, 64 TX, ~130 KB)
pub type GmacDefault<R> = Gmac<R, DEFAULT_RX_DESCRIPTORS, DEFAULT_TX_DESCRIPTORS>;

impl<R: RegisterAccess, const RX_DESCS: usize, const TX_DESCS: usize> Gmac<R, RX_DESCS, TX_DESCS> {
    /// Create a new GMAC instance
    ///
    /// This is a const function suitable for static initialization.
    /// The device starts out `Stopped` with the permanent address from
    /// `config` as its station address.
    pub const fn new(regs: R, config: GmacConfig) -> Self {
        Self {
            regs,
            dma: DmaEngine::new(),
            config,
            state: State::Stopped,
            current_address: config.mac_address,
            media_present: false,
        }
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    /// Get the current state
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Get the configuration
    #[inline(always)]
    pub fn config(&self) -> &GmacConfig {
        &self.config
    }

    /// Register window this driver was created with
    #[inline(always)]
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Snapshot of the interface parameters
    ///
    /// The filter setting is read back from the hardware; the link state
    /// is the one seen by the last status poll or transmit.
    pub fn mode(&self) -> InterfaceMode {
        critical_section::with(|_| {
            InterfaceMode::new(
                self.state,
                &self.config,
                self.filter_setting_raw(),
                self.current_address,
                self.media_present,
            )
        })
    }

    /// Index of the next RX descriptor the driver will inspect
    pub fn rx_read_index(&self) -> usize {
        self.dma.rx_read_index()
    }

    /// Index of the next TX descriptor the driver will publish into
    pub fn tx_write_index(&self) -> usize {
        self.dma.tx_write_index()
    }

    /// Index of the oldest TX descriptor whose completion is unreported
    pub fn tx_release_index(&self) -> usize {
        self.dma.tx_release_index()
    }

    /// Number of transmitted frames whose completion is still unreported
    pub fn tx_pending(&self) -> usize {
        self.dma.tx_pending()
    }

    /// Current owner of RX descriptor `index` (wraps at the ring length)
    pub fn rx_ownership(&self, index: usize) -> Ownership {
        self.dma.rx_ownership(index)
    }

    /// Current owner of TX descriptor `index` (wraps at the ring length)
    pub fn tx_ownership(&self, index: usize) -> Ownership {
        self.dma.tx_ownership(index)
    }

    // =========================================================================
    // Lifecycle Gating
    // =========================================================================

    /// Gate for every operation that needs running hardware
    pub(super) fn require_initialized(&self, op: &'static str) -> Result<()> {
        match self.state {
            State::Initialized => Ok(()),
            State::Started => {
                gmac_debug!("{}: device not initialized", op);
                Err(Error::DeviceError)
            }
            State::Stopped => {
                gmac_debug!("{}: device not started", op);
                Err(Error::NotStarted)
            }
        }
    }

    // =========================================================================
    // Start / Stop
    // =========================================================================

    /// Move from `Stopped` to `Started`
    ///
    /// No hardware is touched.
    ///
    /// # Errors
    /// - `AlreadyStarted` - device is started or initialized
    pub fn start(&mut self) -> Result<()> {
        critical_section::with(|_| match self.state {
            State::Stopped => {
                self.state = State::Started;
                Ok(())
            }
            State::Started | State::Initialized => Err(Error::AlreadyStarted),
        })
    }

    /// Return to `Stopped`
    ///
    /// Descriptors still owned by the DMA are abandoned, not torn down;
    /// the next [`initialize`](Self::initialize) rebuilds both rings.
    ///
    /// # Errors
    /// - `NotStarted` - device is already stopped
    pub fn stop(&mut self) -> Result<()> {
        critical_section::with(|_| match self.state {
            State::Started | State::Initialized => {
                self.state = State::Stopped;
                Ok(())
            }
            State::Stopped => Err(Error::NotStarted),
        })
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Reset the hardware, build both rings, and start the DMA and MAC
    ///
    /// This performs the full initialization sequence:
    /// 1. Software reset, bounded by the configured timeout
    /// 2. Best-effort wait for the AXI master to go idle
    /// 3. Program the station address
    /// 4. Enable 8-word descriptors and program both ring base addresses
    /// 5. Build the RX ring (all DMA-owned) and TX ring (all free)
    /// 6. Clear DMA status and configure the MAC
    /// 7. Store-and-forward on both directions, then start both DMA engines
    /// 8. Enable the MAC transmitter and receiver, kick the RX engine
    ///
    /// Calling this on an initialized device succeeds without touching the
    /// rings or the hardware.
    ///
    /// # Parameters
    /// * `extra_rx_size`, `extra_tx_size` - additional buffer space; must be 0
    /// * `delay` - Delay provider implementing `embedded_hal::delay::DelayNs`
    ///
    /// # Errors
    /// - `Unsupported` - a non-zero extra buffer size was requested
    /// - `NotStarted` - device is stopped
    /// - `DeviceError` - the software reset did not complete
    pub fn initialize<D: DelayNs>(
        &mut self,
        extra_rx_size: usize,
        extra_tx_size: usize,
        delay: &mut D,
    ) -> Result<()> {
        if extra_rx_size != 0 || extra_tx_size != 0 {
            return Err(Error::Unsupported);
        }

        critical_section::with(|_| match self.state {
            State::Started => self.init_hardware(delay),
            State::Initialized => {
                gmac_debug!("initialize: already initialized");
                Ok(())
            }
            State::Stopped => {
                gmac_debug!("initialize: device not started");
                Err(Error::NotStarted)
            }
        })
    }

    fn init_hardware<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        {
            let mut reset = ResetController::with_timing(
                &self.regs,
                &mut *delay,
                self.config.sw_reset_timeout_ms,
                self.config.reset_poll_interval_us,
            );
            reset.soft_reset()?;
            reset.wait_axi_idle(self.config.axi_idle_timeout_ms);
        }

        let mac = MacRegs::new(&self.regs);
        let dma = DmaRegs::new(&self.regs);

        mac.set_station_address(&self.current_address);

        dma.enable_alternate_descriptors();
        dma.set_rx_desc_list_addr(self.dma.rx_base_addr());
        dma.set_tx_desc_list_addr(self.dma.tx_base_addr());

        self.dma.init_rings();

        dma.clear_all_interrupts();
        mac.set_config(GMACCONFIG_DEFAULT);

        dma.set_operation_mode(DMAOPERATION_TSF | DMAOPERATION_RSF);
        dma.start_tx();
        dma.start_rx();

        // MAC enables only once both DMA engines run
        mac.enable_tx();
        mac.enable_rx();
        dma.rx_poll_demand();

        self.state = State::Initialized;
        gmac_debug!(
            "initialized: {} RX / {} TX descriptors, version {:08x}",
            RX_DESCS,
            TX_DESCS,
            mac.version()
        );
        Ok(())
    }

    // =========================================================================
    // Reset / Shutdown
    // =========================================================================

    /// Reset the interface
    ///
    /// Validates the lifecycle state only; rings and registers are left as
    /// they are.
    ///
    /// # Errors
    /// - `NotStarted` - device is stopped
    /// - `DeviceError` - device is started but not initialized
    pub fn reset(&mut self, extended_verification: bool) -> Result<()> {
        critical_section::with(|_| {
            self.require_initialized("reset")?;
            if extended_verification {
                gmac_debug!("reset: extended verification not performed");
            }
            Ok(())
        })
    }

    /// Shut the interface down
    ///
    /// Validates the lifecycle state only; the DMA keeps running until
    /// [`stop`](Self::stop) and a later re-initialization.
    ///
    /// # Errors
    /// - `NotStarted` - device is stopped
    /// - `DeviceError` - device is started but not initialized
    pub fn shutdown(&mut self) -> Result<()> {
        critical_section::with(|_| self.require_initialized("shutdown"))
    }

    // =========================================================================
    // Unsupported Operations
    // =========================================================================

    /// Interface statistics (not implemented)
    ///
    /// # Errors
    /// - `NotStarted` / `DeviceError` - lifecycle gating as for other
    ///   operations
    /// - `Unsupported` - otherwise
    pub fn statistics(&mut self, reset: bool) -> Result<()> {
        critical_section::with(|_| {
            self.require_initialized("statistics")?;
            let _ = reset;
            Err(Error::Unsupported)
        })
    }

    /// Map a multicast IP address to a MAC address (not implemented)
    ///
    /// # Errors
    /// - `NotStarted` / `DeviceError` - lifecycle gating as for other
    ///   operations
    /// - `Unsupported` - otherwise
    pub fn multicast_ip_to_mac(&mut self, ipv6: bool, ip: &[u8]) -> Result<[u8; MAC_ADDR_LEN]> {
        critical_section::with(|_| {
            self.require_initialized("multicast_ip_to_mac")?;
            let _ = (ipv6, ip);
            Err(Error::Unsupported)
        })
    }

    /// Access non-volatile parameter storage (not implemented)
    ///
    /// # Errors
    /// - `NotStarted` / `DeviceError` - lifecycle gating as for other
    ///   operations
    /// - `Unsupported` - otherwise
    pub fn nv_data(&mut self, read: bool, offset: usize, buf: &mut [u8]) -> Result<()> {
        critical_section::with(|_| {
            self.require_initialized("nv_data")?;
            let _ = (read, offset, buf);
            gmac_warn!("nv_data: no non-volatile storage");
            Err(Error::Unsupported)
        })
    }

    // =========================================================================
    // Test Hooks
    // =========================================================================

    /// Deliver `frame` into RX slot `index` as the DMA would
    #[cfg(test)]
    pub(crate) fn simulate_rx(&mut self, index: usize, frame: &[u8], status: u32) {
        self.dma.simulate_rx(index, frame, status);
    }

    /// Mark TX slot `index` as sent
    #[cfg(test)]
    pub(crate) fn simulate_tx_done(&self, index: usize) {
        self.dma.simulate_tx_done(index);
    }

    /// Raw status word of TX descriptor `index`
    #[cfg(test)]
    pub(crate) fn tx_descriptor_status(&self, index: usize) -> u32 {
        self.dma.tx_descriptor(index).raw_tdes0()
    }

    /// Raw status word of RX descriptor `index`
    #[cfg(test)]
    pub(crate) fn rx_descriptor_status(&self, index: usize) -> u32 {
        self.dma.rx_descriptor(index).raw_rdes0()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use std::boxed::Box;
    use std::vec;

    use super::*;
    use crate::driver::filtering::ReceiveFilter;
    use crate::driver::status::StatusQuery;
    use crate::driver::transfer::TxHeader;
    use crate::internal::constants::SOFT_RESET_TIMEOUT_MS;
    use crate::internal::dma::descriptor::bits::{rdes0, tdes0};
    use crate::internal::register::dma::{
        DMABUSMODE_ATDS, DMABUSMODE_OFFSET, DMAOPERATION_OFFSET, DMAOPERATION_SR,
        DMAOPERATION_ST, DMARXBASEADDR_OFFSET, DMATXBASEADDR_OFFSET,
    };
    use crate::internal::register::mac::{
        GMACADDR0H_OFFSET, GMACADDR0L_OFFSET, GMACCONFIG_OFFSET, GMACCONFIG_RE, GMACCONFIG_TE,
    };
    use crate::testing::{MockDelay, SimulatedGmac, TEST_RING_LEN, TestGmac, initialized_gmac};

    fn stopped_gmac() -> (SimulatedGmac, Box<TestGmac>) {
        let sim = SimulatedGmac::new();
        let gmac = Box::new(TestGmac::new(sim.clone(), GmacConfig::new()));
        (sim, gmac)
    }

    fn started_gmac() -> (SimulatedGmac, Box<TestGmac>) {
        let (sim, mut gmac) = stopped_gmac();
        gmac.start().unwrap();
        (sim, gmac)
    }

    /// Every gated operation, run once
    fn gated_results(gmac: &mut TestGmac) -> vec::Vec<Result<()>> {
        let mut buf = [0u8; 64];
        let mut frame = [0u8; 60];
        vec![
            gmac.shutdown(),
            gmac.reset(false),
            unsafe { gmac.transmit(&mut frame, None) },
            gmac.receive(&mut buf).map(|_| ()),
            gmac.get_status(StatusQuery::all()).map(|_| ()),
            gmac.set_receive_filters(ReceiveFilter::BROADCAST, ReceiveFilter::empty(), false, &[]),
            gmac.set_station_address(true, None),
            gmac.statistics(false),
            gmac.multicast_ip_to_mac(false, &[224, 0, 0, 1]).map(|_| ()),
            gmac.nv_data(true, 0, &mut buf),
        ]
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn new_device_is_stopped() {
        let (_sim, gmac) = stopped_gmac();
        assert_eq!(gmac.state(), State::Stopped);
        assert_eq!(gmac.mode().state, State::Stopped);
        assert_eq!(gmac.station_address(), GmacConfig::new().mac_address);
    }

    #[test]
    fn start_from_each_state() {
        let (_sim, mut gmac) = stopped_gmac();
        assert_eq!(gmac.start(), Ok(()));
        assert_eq!(gmac.state(), State::Started);
        assert_eq!(gmac.start(), Err(Error::AlreadyStarted));

        let (_sim, mut gmac) = initialized_gmac();
        assert_eq!(gmac.start(), Err(Error::AlreadyStarted));
        assert_eq!(gmac.state(), State::Initialized);
    }

    #[test]
    fn stop_from_each_state() {
        let (_sim, mut gmac) = stopped_gmac();
        assert_eq!(gmac.stop(), Err(Error::NotStarted));

        let (_sim, mut gmac) = started_gmac();
        assert_eq!(gmac.stop(), Ok(()));
        assert_eq!(gmac.state(), State::Stopped);

        let (_sim, mut gmac) = initialized_gmac();
        assert_eq!(gmac.stop(), Ok(()));
        assert_eq!(gmac.state(), State::Stopped);
    }

    #[test]
    fn initialize_requires_started() {
        let (_sim, mut gmac) = stopped_gmac();
        let mut delay = MockDelay::new();
        assert_eq!(gmac.initialize(0, 0, &mut delay), Err(Error::NotStarted));
        assert_eq!(gmac.state(), State::Stopped);
    }

    #[test]
    fn initialize_rejects_extra_buffers() {
        let (_sim, mut gmac) = started_gmac();
        let mut delay = MockDelay::new();
        assert_eq!(gmac.initialize(1, 0, &mut delay), Err(Error::Unsupported));
        assert_eq!(gmac.initialize(0, 16, &mut delay), Err(Error::Unsupported));
        assert_eq!(gmac.state(), State::Started);

        let (_sim, mut gmac) = stopped_gmac();
        assert_eq!(gmac.initialize(1, 1, &mut delay), Err(Error::Unsupported));
    }

    #[test]
    fn initialize_reset_timeout_is_device_error() {
        let (sim, mut gmac) = started_gmac();
        sim.set_stuck_reset(true);
        let mut delay = MockDelay::new();

        assert_eq!(gmac.initialize(0, 0, &mut delay), Err(Error::DeviceError));
        assert_eq!(gmac.state(), State::Started);
        assert_eq!(delay.total_ms(), u64::from(SOFT_RESET_TIMEOUT_MS));
    }

    #[test]
    fn gated_operations_when_stopped() {
        let (_sim, mut gmac) = stopped_gmac();
        for result in gated_results(&mut gmac) {
            assert_eq!(result, Err(Error::NotStarted));
        }
    }

    #[test]
    fn gated_operations_when_started() {
        let (_sim, mut gmac) = started_gmac();
        for result in gated_results(&mut gmac) {
            assert_eq!(result, Err(Error::DeviceError));
        }
    }

    #[test]
    fn reset_and_shutdown_leave_state_alone() {
        let (sim, mut gmac) = initialized_gmac();
        sim.set_link(true);
        let mut frame = [0u8; 60];
        unsafe { gmac.transmit(&mut frame, None) }.unwrap();

        assert_eq!(gmac.reset(true), Ok(()));
        assert_eq!(gmac.shutdown(), Ok(()));
        assert_eq!(gmac.state(), State::Initialized);
        assert_eq!(gmac.tx_write_index(), 1);
        assert_eq!(gmac.tx_ownership(0), Ownership::Hardware);
    }

    #[test]
    fn unsupported_operations_when_initialized() {
        let (_sim, mut gmac) = initialized_gmac();
        let mut buf = [0u8; 4];
        assert_eq!(gmac.statistics(true), Err(Error::Unsupported));
        assert_eq!(gmac.multicast_ip_to_mac(false, &[224, 0, 0, 1]), Err(Error::Unsupported));
        assert_eq!(gmac.nv_data(true, 0, &mut buf), Err(Error::Unsupported));
    }

    // -------------------------------------------------------------------------
    // Initialization
    // -------------------------------------------------------------------------

    #[test]
    fn scenario_start_then_initialize() {
        let (sim, mut gmac) = stopped_gmac();
        let mut delay = MockDelay::new();

        assert_eq!(gmac.start(), Ok(()));
        assert_eq!(gmac.state(), State::Started);
        assert_eq!(gmac.initialize(0, 0, &mut delay), Ok(()));
        assert_eq!(gmac.state(), State::Initialized);

        for i in 0..TEST_RING_LEN {
            assert_eq!(gmac.rx_ownership(i), Ownership::Hardware);
            assert_eq!(gmac.tx_ownership(i), Ownership::Software);
        }
        assert_eq!(gmac.rx_read_index(), 0);
        assert_eq!(gmac.tx_write_index(), 0);
        assert_eq!(gmac.tx_release_index(), 0);

        assert_eq!(sim.peek(DMARXBASEADDR_OFFSET), gmac.dma.rx_base_addr());
        assert_eq!(sim.peek(DMATXBASEADDR_OFFSET), gmac.dma.tx_base_addr());
    }

    #[test]
    fn initialize_programs_registers() {
        let (sim, _gmac) = initialized_gmac();

        assert_ne!(sim.peek(DMABUSMODE_OFFSET) & DMABUSMODE_ATDS, 0);
        let op = sim.peek(DMAOPERATION_OFFSET);
        assert_eq!(
            op,
            DMAOPERATION_TSF | DMAOPERATION_RSF | DMAOPERATION_ST | DMAOPERATION_SR
        );
        assert_eq!(
            sim.peek(GMACCONFIG_OFFSET),
            GMACCONFIG_DEFAULT | GMACCONFIG_TE | GMACCONFIG_RE
        );
        assert_eq!(sim.rx_poll_demands(), 1);

        let permanent = GmacConfig::new().mac_address;
        let low = u32::from_le_bytes([permanent[0], permanent[1], permanent[2], permanent[3]]);
        assert_eq!(sim.peek(GMACADDR0L_OFFSET), low);
        assert_eq!(
            sim.peek(GMACADDR0H_OFFSET),
            u32::from(permanent[4]) | (u32::from(permanent[5]) << 8)
        );
    }

    #[test]
    fn reinitialize_is_a_no_op() {
        let (sim, mut gmac) = initialized_gmac();
        sim.set_link(true);
        let mut frame = [0u8; 60];
        unsafe { gmac.transmit(&mut frame, None) }.unwrap();
        gmac.simulate_rx(0, &[0x33; 64], rdes0::SINGLE_DESC);
        let mut buf = [0u8; 64];
        gmac.receive(&mut buf).unwrap();
        sim.poke(GMACCONFIG_OFFSET, 0);

        let mut delay = MockDelay::new();
        assert_eq!(gmac.initialize(0, 0, &mut delay), Ok(()));

        assert_eq!(gmac.tx_write_index(), 1);
        assert_eq!(gmac.rx_read_index(), 1);
        assert_eq!(gmac.tx_ownership(0), Ownership::Hardware);
        assert_eq!(sim.peek(GMACCONFIG_OFFSET), 0);
        assert_eq!(sim.rx_poll_demands(), 1);
    }

    #[test]
    fn stop_then_reinitialize_rebuilds_rings() {
        let (sim, mut gmac) = initialized_gmac();
        sim.set_link(true);
        let mut frame = [0u8; 60];
        unsafe { gmac.transmit(&mut frame, None) }.unwrap();

        gmac.stop().unwrap();
        gmac.start().unwrap();
        let mut delay = MockDelay::new();
        gmac.initialize(0, 0, &mut delay).unwrap();

        assert_eq!(gmac.tx_write_index(), 0);
        assert_eq!(gmac.tx_release_index(), 0);
        assert_eq!(gmac.tx_ownership(0), Ownership::Software);
        assert_eq!(gmac.get_status(StatusQuery::TX_COMPLETION).unwrap().completed_tx, None);
    }

    // -------------------------------------------------------------------------
    // Transfer scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn scenario_transmit_then_complete() {
        let (sim, mut gmac) = initialized_gmac();
        sim.set_link(true);

        let mut frame = vec![0u8; 14 + 46];
        let addr = frame.as_ptr() as usize as u32;
        let header = TxHeader::ethernet([0xFF; 6], 0x0800);
        assert_eq!(unsafe { gmac.transmit(&mut frame, Some(header)) }, Ok(()));

        assert_eq!(gmac.tx_write_index(), 1);
        assert_eq!(gmac.tx_ownership(0), Ownership::Hardware);
        let status = gmac.tx_descriptor_status(0);
        for flag in [
            tdes0::FIRST_SEGMENT,
            tdes0::LAST_SEGMENT,
            tdes0::INTERRUPT_ON_COMPLETE,
            tdes0::SECOND_ADDR_CHAINED,
        ] {
            assert_ne!(status & flag, 0);
        }

        // Nothing reported while the DMA still owns the slot
        assert_eq!(gmac.get_status(StatusQuery::TX_COMPLETION).unwrap().completed_tx, None);

        gmac.simulate_tx_done(0);
        let first = gmac.get_status(StatusQuery::TX_COMPLETION).unwrap();
        assert_eq!(first.completed_tx, Some(addr));
        let second = gmac.get_status(StatusQuery::TX_COMPLETION).unwrap();
        assert_eq!(second.completed_tx, None);
        assert_eq!(gmac.tx_release_index(), gmac.tx_write_index());
    }

    #[test]
    fn scenario_receive_single_frame() {
        let (_sim, mut gmac) = initialized_gmac();
        let frame: vec::Vec<u8> = (0..64u8).collect();
        gmac.simulate_rx(0, &frame, rdes0::SINGLE_DESC);

        let mut buf = [0u8; 64];
        let received = gmac.receive(&mut buf).unwrap();
        assert_eq!(received.len, 64);
        assert_eq!(&buf[..], &frame[..]);
        assert_eq!(gmac.rx_ownership(0), Ownership::Hardware);
        assert_eq!(gmac.rx_descriptor_status(0), rdes0::OWN);
        assert_eq!(gmac.rx_read_index(), 1);
    }

    #[test]
    fn completions_are_fifo_across_wrap() {
        let (sim, mut gmac) = initialized_gmac();
        sim.set_link(true);
        let mut frames = vec![[0u8; 60]; TEST_RING_LEN + 2];
        let addrs: vec::Vec<u32> = frames.iter().map(|f| f.as_ptr() as usize as u32).collect();

        for (i, frame) in frames.iter_mut().take(TEST_RING_LEN).enumerate() {
            unsafe { gmac.transmit(frame, None) }.unwrap();
            gmac.simulate_tx_done(i);
        }
        for addr in &addrs[..2] {
            let status = gmac.get_status(StatusQuery::TX_COMPLETION).unwrap();
            assert_eq!(status.completed_tx, Some(*addr));
        }

        for (i, frame) in frames.iter_mut().skip(TEST_RING_LEN).enumerate() {
            unsafe { gmac.transmit(frame, None) }.unwrap();
            gmac.simulate_tx_done(i);
        }
        for addr in &addrs[2..] {
            let status = gmac.get_status(StatusQuery::TX_COMPLETION).unwrap();
            assert_eq!(status.completed_tx, Some(*addr));
        }
        assert_eq!(gmac.get_status(StatusQuery::TX_COMPLETION).unwrap().completed_tx, None);
    }

    #[test]
    fn full_ring_holds_unreported_completions() {
        let (sim, mut gmac) = initialized_gmac();
        sim.set_link(true);
        let mut frames = vec![[0u8; 60]; TEST_RING_LEN + 1];
        let addrs: vec::Vec<u32> = frames.iter().map(|f| f.as_ptr() as usize as u32).collect();

        for (i, frame) in frames.iter_mut().take(TEST_RING_LEN).enumerate() {
            unsafe { gmac.transmit(frame, None) }.unwrap();
            gmac.simulate_tx_done(i);
        }
        assert_eq!(gmac.tx_pending(), TEST_RING_LEN);

        // Every slot is back with software, but none has been reported yet
        let extra = &mut frames[TEST_RING_LEN];
        assert_eq!(unsafe { gmac.transmit(extra, None) }, Err(Error::NotReady));

        for addr in &addrs[..TEST_RING_LEN] {
            let status = gmac.get_status(StatusQuery::TX_COMPLETION).unwrap();
            assert_eq!(status.completed_tx, Some(*addr));
        }
        assert_eq!(gmac.tx_pending(), 0);

        let extra = &mut frames[TEST_RING_LEN];
        assert_eq!(unsafe { gmac.transmit(extra, None) }, Ok(()));
        gmac.simulate_tx_done(0);
        let status = gmac.get_status(StatusQuery::TX_COMPLETION).unwrap();
        assert_eq!(status.completed_tx, Some(addrs[TEST_RING_LEN]));
    }
}
