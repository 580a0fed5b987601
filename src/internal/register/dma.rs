//! DMA Controller Register Definitions
//!
//! The GMAC DMA controller moves frames between the MAC FIFOs and system
//! memory using descriptor-based scatter-gather DMA. Its block starts at
//! `0x1000` within the controller window.

#![allow(dead_code)]

use super::{RegisterAccess, reg_bit_check, reg_bit_ops, reg_ro, reg_rw};

/// Offset of the DMA block within the controller window
pub const DMA_BLOCK_OFFSET: usize = 0x1000;

// =============================================================================
// Register Offsets
// =============================================================================

/// Bus Mode Register offset
pub const DMABUSMODE_OFFSET: usize = DMA_BLOCK_OFFSET;
/// TX Poll Demand Register offset
pub const DMATXPOLLDEMAND_OFFSET: usize = DMA_BLOCK_OFFSET + 0x04;
/// RX Poll Demand Register offset
pub const DMARXPOLLDEMAND_OFFSET: usize = DMA_BLOCK_OFFSET + 0x08;
/// RX Descriptor List Address Register offset
pub const DMARXBASEADDR_OFFSET: usize = DMA_BLOCK_OFFSET + 0x0C;
/// TX Descriptor List Address Register offset
pub const DMATXBASEADDR_OFFSET: usize = DMA_BLOCK_OFFSET + 0x10;
/// Status Register offset
pub const DMASTATUS_OFFSET: usize = DMA_BLOCK_OFFSET + 0x14;
/// Operation Mode Register offset
pub const DMAOPERATION_OFFSET: usize = DMA_BLOCK_OFFSET + 0x18;
/// Interrupt Enable Register offset
pub const DMAINTENABLE_OFFSET: usize = DMA_BLOCK_OFFSET + 0x1C;
/// Missed Frame and Buffer Overflow Counter Register offset
pub const DMAMISSEDFR_OFFSET: usize = DMA_BLOCK_OFFSET + 0x20;
/// Receive Interrupt Watchdog Timer Register offset
pub const DMARXWATCHDOG_OFFSET: usize = DMA_BLOCK_OFFSET + 0x24;
/// AXI Bus Mode Register offset
pub const DMAAXIBUSMODE_OFFSET: usize = DMA_BLOCK_OFFSET + 0x28;
/// AXI Status Register offset
pub const DMAAXISTATUS_OFFSET: usize = DMA_BLOCK_OFFSET + 0x2C;
/// Current Host TX Descriptor Register offset (read-only)
pub const DMACURTXDESC_OFFSET: usize = DMA_BLOCK_OFFSET + 0x48;
/// Current Host RX Descriptor Register offset (read-only)
pub const DMACURRXDESC_OFFSET: usize = DMA_BLOCK_OFFSET + 0x4C;
/// Current Host TX Buffer Address Register offset (read-only)
pub const DMACURTXBUFADDR_OFFSET: usize = DMA_BLOCK_OFFSET + 0x50;
/// Current Host RX Buffer Address Register offset (read-only)
pub const DMACURRXBUFADDR_OFFSET: usize = DMA_BLOCK_OFFSET + 0x54;
/// HW Feature Register offset (read-only)
pub const DMAHWFEATURE_OFFSET: usize = DMA_BLOCK_OFFSET + 0x58;

// =============================================================================
// Bus Mode Register (DMABUSMODE) Bits
// =============================================================================

/// Software Reset - resets all GMAC logic, cleared automatically
pub const DMABUSMODE_SW_RST: u32 = 1 << 0;
/// DMA Arbitration Scheme
pub const DMABUSMODE_DA: u32 = 1 << 1;
/// Descriptor Skip Length shift
pub const DMABUSMODE_DSL_SHIFT: u32 = 2;
/// Alternate Descriptor Size (8 dwords instead of 4)
pub const DMABUSMODE_ATDS: u32 = 1 << 7;
/// Programmable Burst Length shift
pub const DMABUSMODE_PBL_SHIFT: u32 = 8;
/// Priority Ratio shift
pub const DMABUSMODE_PR_SHIFT: u32 = 14;
/// Fixed Burst
pub const DMABUSMODE_FB: u32 = 1 << 16;
/// RX DMA Programmable Burst Length shift
pub const DMABUSMODE_RPBL_SHIFT: u32 = 17;
/// Use Separate PBL
pub const DMABUSMODE_USP: u32 = 1 << 23;
/// PBL x8 Mode
pub const DMABUSMODE_PBL_X8: u32 = 1 << 24;
/// Address Aligned Beats
pub const DMABUSMODE_AAL: u32 = 1 << 25;
/// Mixed Burst
pub const DMABUSMODE_MB: u32 = 1 << 26;
/// Transmit Priority
pub const DMABUSMODE_TXPR: u32 = 1 << 27;
/// Channel Priority Weights shift
pub const DMABUSMODE_PRWG_SHIFT: u32 = 28;
/// Rebuild INCRx Burst
pub const DMABUSMODE_RIB: u32 = 1 << 31;

// =============================================================================
// Status Register (DMASTATUS) Bits
// =============================================================================

/// Transmit Interrupt - frame transmission complete
pub const DMASTATUS_TI: u32 = 1 << 0;
/// Transmit Process Stopped
pub const DMASTATUS_TPS: u32 = 1 << 1;
/// Transmit Buffer Unavailable
pub const DMASTATUS_TU: u32 = 1 << 2;
/// Transmit Jabber Timeout
pub const DMASTATUS_TJT: u32 = 1 << 3;
/// Receive Overflow
pub const DMASTATUS_OVF: u32 = 1 << 4;
/// Transmit Underflow
pub const DMASTATUS_UNF: u32 = 1 << 5;
/// Receive Interrupt - frame reception complete
pub const DMASTATUS_RI: u32 = 1 << 6;
/// Receive Buffer Unavailable
pub const DMASTATUS_RU: u32 = 1 << 7;
/// Receive Process Stopped
pub const DMASTATUS_RPS: u32 = 1 << 8;
/// Receive Watchdog Timeout
pub const DMASTATUS_RWT: u32 = 1 << 9;
/// Early Transmit Interrupt
pub const DMASTATUS_ETI: u32 = 1 << 10;
/// Fatal Bus Error Interrupt
pub const DMASTATUS_FBI: u32 = 1 << 13;
/// Early Receive Interrupt
pub const DMASTATUS_ERI: u32 = 1 << 14;
/// Abnormal Interrupt Summary
pub const DMASTATUS_AIS: u32 = 1 << 15;
/// Normal Interrupt Summary
pub const DMASTATUS_NIS: u32 = 1 << 16;
/// Receive Process State shift
pub const DMASTATUS_RS_SHIFT: u32 = 17;
/// Transmit Process State shift
pub const DMASTATUS_TS_SHIFT: u32 = 20;
/// Error Bits shift
pub const DMASTATUS_EB_SHIFT: u32 = 23;
/// GMAC Line Interface Interrupt
pub const DMASTATUS_GLI: u32 = 1 << 26;
/// GMAC MMC Interrupt
pub const DMASTATUS_GMI: u32 = 1 << 27;
/// GMAC PMT Interrupt
pub const DMASTATUS_GPI: u32 = 1 << 28;
/// Timestamp Trigger Interrupt
pub const DMASTATUS_TTI: u32 = 1 << 29;
/// GMAC LPI Interrupt
pub const DMASTATUS_GLPII: u32 = 1 << 30;

/// Value that clears every write-1-to-clear status bit
pub const DMASTATUS_CLEAR_ALL: u32 = 0xFFFF_FFFF;

// =============================================================================
// Operation Mode Register (DMAOPERATION) Bits
// =============================================================================

/// Start/Stop Receive
pub const DMAOPERATION_SR: u32 = 1 << 1;
/// Operate on Second Frame
pub const DMAOPERATION_OSF: u32 = 1 << 2;
/// Receive Threshold Control shift
pub const DMAOPERATION_RTC_SHIFT: u32 = 3;
/// Drop Giant Frames
pub const DMAOPERATION_DGF: u32 = 1 << 5;
/// Forward Undersized Good Frames
pub const DMAOPERATION_FUF: u32 = 1 << 6;
/// Forward Error Frames
pub const DMAOPERATION_FEF: u32 = 1 << 7;
/// Enable HW Flow Control
pub const DMAOPERATION_EFC: u32 = 1 << 8;
/// Threshold for Activating Flow Control shift
pub const DMAOPERATION_RFA_SHIFT: u32 = 9;
/// Threshold for Deactivating Flow Control shift
pub const DMAOPERATION_RFD_SHIFT: u32 = 11;
/// Start/Stop Transmission
pub const DMAOPERATION_ST: u32 = 1 << 13;
/// Transmit Threshold Control shift
pub const DMAOPERATION_TTC_SHIFT: u32 = 14;
/// Flush Transmit FIFO
pub const DMAOPERATION_FTF: u32 = 1 << 20;
/// Transmit Store and Forward
pub const DMAOPERATION_TSF: u32 = 1 << 21;
/// MSB of Threshold for Deactivating Flow Control
pub const DMAOPERATION_RFD2: u32 = 1 << 22;
/// MSB of Threshold for Activating Flow Control
pub const DMAOPERATION_RFA2: u32 = 1 << 23;
/// Disable Flushing of Received Frames
pub const DMAOPERATION_DFF: u32 = 1 << 24;
/// Receive Store and Forward
pub const DMAOPERATION_RSF: u32 = 1 << 25;
/// Disable Dropping of TCP/IP Checksum Error Frames
pub const DMAOPERATION_DT: u32 = 1 << 26;

// =============================================================================
// AXI Status Register (DMAAXISTATUS) Bits
// =============================================================================

/// AXI Master Write Channel Status (busy when set)
pub const DMAAXISTATUS_WHSTS: u32 = 1 << 0;
/// AXI Master Read Channel Status (busy when set)
pub const DMAAXISTATUS_RDSTS: u32 = 1 << 1;

// =============================================================================
// DMA Register Access
// =============================================================================

/// Typed view over the DMA register block
#[derive(Debug)]
pub struct DmaRegs<'a, R: RegisterAccess> {
    regs: &'a R,
}

impl<'a, R: RegisterAccess> DmaRegs<'a, R> {
    /// Create a view over the DMA block of `regs`
    #[inline(always)]
    pub const fn new(regs: &'a R) -> Self {
        Self { regs }
    }

    reg_rw!(bus_mode, set_bus_mode, DMABUSMODE_OFFSET, "Bus Mode register");
    reg_rw!(
        rx_desc_list_addr,
        set_rx_desc_list_addr,
        DMARXBASEADDR_OFFSET,
        "RX Descriptor List Address register"
    );
    reg_rw!(
        tx_desc_list_addr,
        set_tx_desc_list_addr,
        DMATXBASEADDR_OFFSET,
        "TX Descriptor List Address register"
    );
    reg_rw!(status, set_status, DMASTATUS_OFFSET, "Status register (write 1 to clear)");
    reg_rw!(operation_mode, set_operation_mode, DMAOPERATION_OFFSET, "Operation Mode register");
    reg_rw!(
        interrupt_enable,
        set_interrupt_enable,
        DMAINTENABLE_OFFSET,
        "Interrupt Enable register"
    );
    reg_rw!(axi_bus_mode, set_axi_bus_mode, DMAAXIBUSMODE_OFFSET, "AXI Bus Mode register");
    reg_ro!(axi_status, DMAAXISTATUS_OFFSET, "AXI Status register");
    reg_ro!(missed_frames, DMAMISSEDFR_OFFSET, "Missed Frame and Buffer Overflow Counter register");
    reg_ro!(current_tx_desc, DMACURTXDESC_OFFSET, "Current Host TX Descriptor register");
    reg_ro!(current_rx_desc, DMACURRXDESC_OFFSET, "Current Host RX Descriptor register");
    reg_ro!(current_tx_buffer, DMACURTXBUFADDR_OFFSET, "Current Host TX Buffer Address register");
    reg_ro!(current_rx_buffer, DMACURRXBUFADDR_OFFSET, "Current Host RX Buffer Address register");
    reg_ro!(hw_feature, DMAHWFEATURE_OFFSET, "HW Feature register");

    reg_bit_ops!(
        start_tx,
        stop_tx,
        DMAOPERATION_OFFSET,
        DMAOPERATION_ST,
        "TX DMA",
        "Start",
        "Stop"
    );
    reg_bit_ops!(
        start_rx,
        stop_rx,
        DMAOPERATION_OFFSET,
        DMAOPERATION_SR,
        "RX DMA",
        "Start",
        "Stop"
    );
    reg_bit_ops!(
        enable_alternate_descriptors,
        disable_alternate_descriptors,
        DMABUSMODE_OFFSET,
        DMABUSMODE_ATDS,
        "8-word descriptors",
        "Enable",
        "Disable"
    );

    reg_bit_check!(
        is_reset_in_progress,
        DMABUSMODE_OFFSET,
        DMABUSMODE_SW_RST,
        "Check whether a software reset is still in progress"
    );

    /// Assert the DMA software reset
    #[inline(always)]
    pub fn software_reset(&self) {
        self.set_bus_mode(DMABUSMODE_SW_RST);
    }

    /// Check whether both AXI master channels are idle
    #[inline(always)]
    pub fn is_axi_idle(&self) -> bool {
        (self.axi_status() & (DMAAXISTATUS_RDSTS | DMAAXISTATUS_WHSTS)) == 0
    }

    /// Issue a TX poll demand (any value wakes the engine)
    #[inline(always)]
    pub fn tx_poll_demand(&self) {
        self.regs.write(DMATXPOLLDEMAND_OFFSET, 0);
    }

    /// Issue an RX poll demand (any value wakes the engine)
    #[inline(always)]
    pub fn rx_poll_demand(&self) {
        self.regs.write(DMARXPOLLDEMAND_OFFSET, 0);
    }

    /// Clear all interrupt status flags
    #[inline(always)]
    pub fn clear_all_interrupts(&self) {
        self.set_status(DMASTATUS_CLEAR_ALL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SimulatedGmac;

    #[test]
    fn dma_offsets_sit_in_second_page() {
        assert_eq!(DMABUSMODE_OFFSET, 0x1000);
        assert_eq!(DMASTATUS_OFFSET, 0x1014);
        assert_eq!(DMAAXISTATUS_OFFSET, 0x102C);
        assert_eq!(DMAHWFEATURE_OFFSET, 0x1058);
    }

    #[test]
    fn poll_demands_are_counted() {
        let sim = SimulatedGmac::new();
        let dma = DmaRegs::new(&sim);
        dma.tx_poll_demand();
        dma.tx_poll_demand();
        dma.rx_poll_demand();
        assert_eq!(sim.tx_poll_demands(), 2);
        assert_eq!(sim.rx_poll_demands(), 1);
    }

    #[test]
    fn status_is_write_one_to_clear() {
        let sim = SimulatedGmac::new();
        let dma = DmaRegs::new(&sim);
        sim.raise_status(DMASTATUS_RI | DMASTATUS_TI | DMASTATUS_RU);
        dma.set_status(DMASTATUS_RI);
        assert_eq!(dma.status(), DMASTATUS_TI | DMASTATUS_RU);
        dma.clear_all_interrupts();
        assert_eq!(dma.status(), 0);
    }

    #[test]
    fn axi_idle_check() {
        let sim = SimulatedGmac::new();
        let dma = DmaRegs::new(&sim);
        assert!(dma.is_axi_idle());
        sim.poke(DMAAXISTATUS_OFFSET, DMAAXISTATUS_RDSTS);
        assert!(!dma.is_axi_idle());
    }
}
