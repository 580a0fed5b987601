//! MAC Register Definitions
//!
//! The MAC block handles framing, address filtering, and the MII management
//! and link status interface. It occupies the first 4 KiB of the controller
//! window.

#![allow(dead_code)]

use super::{RegisterAccess, reg_bit_check, reg_bit_ops, reg_ro, reg_rw};

// =============================================================================
// Register Offsets
// =============================================================================

/// MAC Configuration Register offset
pub const GMACCONFIG_OFFSET: usize = 0x00;
/// MAC Frame Filter Register offset
pub const GMACFF_OFFSET: usize = 0x04;
/// Hash Table High Register offset
pub const GMACHASTH_OFFSET: usize = 0x08;
/// Hash Table Low Register offset
pub const GMACHASTL_OFFSET: usize = 0x0C;
/// MII Address Register offset
pub const GMACMIIADDR_OFFSET: usize = 0x10;
/// MII Data Register offset
pub const GMACMIIDATA_OFFSET: usize = 0x14;
/// Flow Control Register offset
pub const GMACFC_OFFSET: usize = 0x18;
/// VLAN Tag Register offset
pub const GMACVLAN_OFFSET: usize = 0x1C;
/// Version Register offset
pub const GMACVERSION_OFFSET: usize = 0x20;
/// Debug Register offset
pub const GMACDEBUG_OFFSET: usize = 0x24;
/// Remote Wake-Up Frame Filter Register offset
pub const GMACWAKEUP_OFFSET: usize = 0x28;
/// PMT Control and Status Register offset
pub const GMACPMT_OFFSET: usize = 0x2C;
/// LPI Control and Status Register offset
pub const GMACLPI_OFFSET: usize = 0x30;
/// LPI Timers Control Register offset
pub const GMACLPITIMER_OFFSET: usize = 0x34;
/// Interrupt Status Register offset
pub const GMACINTS_OFFSET: usize = 0x38;
/// Interrupt Mask Register offset
pub const GMACINTMASK_OFFSET: usize = 0x3C;
/// MAC Address 0 High Register offset
pub const GMACADDR0H_OFFSET: usize = 0x40;
/// MAC Address 0 Low Register offset
pub const GMACADDR0L_OFFSET: usize = 0x44;
/// SGMII/RGMII/SMII Control and Status (MII status) Register offset
pub const GMACMIISTATUS_OFFSET: usize = 0xD8;
/// Watchdog Timeout Register offset
pub const GMACWDT_OFFSET: usize = 0xDC;
/// General Purpose IO Register offset
pub const GMACGPIO_OFFSET: usize = 0xE0;

/// Number of address register pairs exposed by the core
pub const MAC_ADDR_SLOTS: usize = 16;

/// Offset of the high register of address slot `n`
#[inline(always)]
pub const fn addr_high_offset(slot: usize) -> usize {
    GMACADDR0H_OFFSET + slot * 8
}

/// Offset of the low register of address slot `n`
#[inline(always)]
pub const fn addr_low_offset(slot: usize) -> usize {
    GMACADDR0L_OFFSET + slot * 8
}

// =============================================================================
// MAC Configuration Register (GMACCONFIG) Bits
// =============================================================================

/// Preamble length for transmit frames mask
pub const GMACCONFIG_PRELEN_MASK: u32 = 0x3;
/// Receiver Enable
pub const GMACCONFIG_RE: u32 = 1 << 2;
/// Transmitter Enable
pub const GMACCONFIG_TE: u32 = 1 << 3;
/// Deferral Check
pub const GMACCONFIG_DC: u32 = 1 << 4;
/// Back-Off Limit shift
pub const GMACCONFIG_BL_SHIFT: u32 = 5;
/// Automatic Pad/CRC Stripping
pub const GMACCONFIG_ACS: u32 = 1 << 7;
/// Link Up/Down
pub const GMACCONFIG_LUD: u32 = 1 << 8;
/// Disable Retry
pub const GMACCONFIG_DR: u32 = 1 << 9;
/// Checksum Offload
pub const GMACCONFIG_IPC: u32 = 1 << 10;
/// Duplex Mode (full duplex when set)
pub const GMACCONFIG_DM: u32 = 1 << 11;
/// Loopback Mode
pub const GMACCONFIG_LM: u32 = 1 << 12;
/// Disable Receive Own
pub const GMACCONFIG_DO: u32 = 1 << 13;
/// Speed (100 Mbps when set)
pub const GMACCONFIG_FES: u32 = 1 << 14;
/// Port Select
pub const GMACCONFIG_PS: u32 = 1 << 15;
/// Disable Carrier Sense During Transmission
pub const GMACCONFIG_DCRS: u32 = 1 << 16;
/// Inter-Frame Gap shift
pub const GMACCONFIG_IFG_SHIFT: u32 = 17;
/// Jumbo Frame Enable
pub const GMACCONFIG_JE: u32 = 1 << 20;
/// Frame Burst Enable
pub const GMACCONFIG_BE: u32 = 1 << 21;
/// Jabber Disable
pub const GMACCONFIG_JD: u32 = 1 << 22;
/// Watchdog Disable
pub const GMACCONFIG_WD: u32 = 1 << 23;
/// Transmit Configuration in RGMII
pub const GMACCONFIG_TC: u32 = 1 << 24;
/// CRC Stripping for Type Frames
pub const GMACCONFIG_CST: u32 = 1 << 25;
/// SMII Force Transmit Error
pub const GMACCONFIG_SFTERR: u32 = 1 << 26;
/// IEEE 802.3as 2K packets
pub const GMACCONFIG_TWOKPE: u32 = 1 << 27;
/// Source Address Insertion/Replacement Control shift
pub const GMACCONFIG_SARC_SHIFT: u32 = 28;

/// Configuration programmed at bring-up: frame burst, no carrier sense during
/// TX, no receive-own, full duplex, checksum offload, pad/CRC stripping.
pub const GMACCONFIG_DEFAULT: u32 = GMACCONFIG_BE
    | GMACCONFIG_DCRS
    | GMACCONFIG_DO
    | GMACCONFIG_DM
    | GMACCONFIG_IPC
    | GMACCONFIG_ACS;

// =============================================================================
// Frame Filter Register (GMACFF) Bits
// =============================================================================

/// Promiscuous Mode
pub const GMACFF_PR: u32 = 1 << 0;
/// Hash Unicast
pub const GMACFF_HUC: u32 = 1 << 1;
/// Hash Multicast
pub const GMACFF_HMC: u32 = 1 << 2;
/// DA Inverse Filtering
pub const GMACFF_DAIF: u32 = 1 << 3;
/// Pass All Multicast
pub const GMACFF_PM: u32 = 1 << 4;
/// Disable Broadcast Frames
pub const GMACFF_DBF: u32 = 1 << 5;
/// Pass Control Frames shift
pub const GMACFF_PCF_SHIFT: u32 = 6;
/// SA Inverse Filtering
pub const GMACFF_SAIF: u32 = 1 << 8;
/// Source Address Filter Enable
pub const GMACFF_SAF: u32 = 1 << 9;
/// Hash or Perfect Filter
pub const GMACFF_HPF: u32 = 1 << 10;
/// VLAN Tag Filter Enable
pub const GMACFF_VTFE: u32 = 1 << 16;
/// Layer 3 and Layer 4 Filter Enable
pub const GMACFF_IPFE: u32 = 1 << 20;
/// Drop non-TCP/UDP over IP Frames
pub const GMACFF_DNTU: u32 = 1 << 21;
/// Receive All
pub const GMACFF_RA: u32 = 1 << 31;

// =============================================================================
// MII Address Register (GMACMIIADDR) Bits
// =============================================================================

/// GMII Busy
pub const GMACMIIADDR_GB: u32 = 1 << 0;
/// GMII Write
pub const GMACMIIADDR_GW: u32 = 1 << 1;
/// CSR Clock Range shift
pub const GMACMIIADDR_CR_SHIFT: u32 = 2;
/// GMII Register shift
pub const GMACMIIADDR_GR_SHIFT: u32 = 6;
/// PHY Address shift
pub const GMACMIIADDR_PA_SHIFT: u32 = 11;

// =============================================================================
// MII Status Register (GMACMIISTATUS) Bits
// =============================================================================

/// Link Mode (full duplex when set)
pub const GMACMIISTATUS_LNKMOD: u32 = 1 << 0;
/// Link Status (up when set)
pub const GMACMIISTATUS_LNKSTS: u32 = 1 << 3;
/// Jabber Timeout
pub const GMACMIISTATUS_JABTO: u32 = 1 << 4;
/// False Carrier Detected
pub const GMACMIISTATUS_FALSCARDET: u32 = 1 << 5;
/// Delay SMII RX Data Sampling
pub const GMACMIISTATUS_SMIIDRXS: u32 = 1 << 16;

// =============================================================================
// GPIO Register (GMACGPIO) Bits
// =============================================================================

/// General Purpose Input Status
pub const GMACGPIO_GPIS: u32 = 1 << 0;
/// General Purpose Output
pub const GMACGPIO_GPO: u32 = 1 << 8;
/// GPI Interrupt Enable
pub const GMACGPIO_GPIE: u32 = 1 << 16;
/// GPI Type
pub const GMACGPIO_GPIT: u32 = 1 << 24;

// =============================================================================
// MAC Register Access
// =============================================================================

/// Typed view over the MAC register block
#[derive(Debug)]
pub struct MacRegs<'a, R: RegisterAccess> {
    regs: &'a R,
}

impl<'a, R: RegisterAccess> MacRegs<'a, R> {
    /// Create a view over the MAC block of `regs`
    #[inline(always)]
    pub const fn new(regs: &'a R) -> Self {
        Self { regs }
    }

    reg_rw!(config, set_config, GMACCONFIG_OFFSET, "MAC Configuration register");
    reg_rw!(frame_filter, set_frame_filter, GMACFF_OFFSET, "Frame Filter register");
    reg_rw!(hash_table_high, set_hash_table_high, GMACHASTH_OFFSET, "Hash Table High register");
    reg_rw!(hash_table_low, set_hash_table_low, GMACHASTL_OFFSET, "Hash Table Low register");
    reg_rw!(mii_address, set_mii_address, GMACMIIADDR_OFFSET, "MII Address register");
    reg_rw!(mii_data, set_mii_data, GMACMIIDATA_OFFSET, "MII Data register");
    reg_rw!(interrupt_mask, set_interrupt_mask, GMACINTMASK_OFFSET, "Interrupt Mask register");
    reg_rw!(gpio, set_gpio, GMACGPIO_OFFSET, "General Purpose IO register");
    reg_ro!(version, GMACVERSION_OFFSET, "Version register");
    reg_ro!(mii_status, GMACMIISTATUS_OFFSET, "MII Status register");
    reg_ro!(interrupt_status, GMACINTS_OFFSET, "Interrupt Status register");

    reg_bit_ops!(
        enable_tx,
        disable_tx,
        GMACCONFIG_OFFSET,
        GMACCONFIG_TE,
        "transmitter",
        "Enable",
        "Disable"
    );
    reg_bit_ops!(
        enable_rx,
        disable_rx,
        GMACCONFIG_OFFSET,
        GMACCONFIG_RE,
        "receiver",
        "Enable",
        "Disable"
    );
    reg_bit_ops!(
        set_gpio_output,
        clear_gpio_output,
        GMACGPIO_OFFSET,
        GMACGPIO_GPO,
        "general purpose output",
        "Raise",
        "Lower"
    );

    reg_bit_check!(
        is_link_up,
        GMACMIISTATUS_OFFSET,
        GMACMIISTATUS_LNKSTS,
        "Check whether the link status bit reports link up"
    );

    /// Program address slot 0 from a MAC address
    ///
    /// The low register holds bytes 0-3 little-endian, the high register
    /// bytes 4-5.
    pub fn set_station_address(&self, addr: &[u8; 6]) {
        self.set_address_slot(0, addr);
    }

    /// Read the MAC address programmed into slot 0
    pub fn station_address(&self) -> [u8; 6] {
        self.address_slot(0)
    }

    /// Program address pair `slot` (0..[`MAC_ADDR_SLOTS`])
    pub fn set_address_slot(&self, slot: usize, addr: &[u8; 6]) {
        let high = (addr[4] as u32) | ((addr[5] as u32) << 8);
        let low = u32::from_le_bytes([addr[0], addr[1], addr[2], addr[3]]);
        self.regs.write(addr_high_offset(slot), high);
        self.regs.write(addr_low_offset(slot), low);
    }

    /// Read address pair `slot`
    pub fn address_slot(&self, slot: usize) -> [u8; 6] {
        let high = self.regs.read(addr_high_offset(slot));
        let low = self.regs.read(addr_low_offset(slot)).to_le_bytes();
        [low[0], low[1], low[2], low[3], high as u8, (high >> 8) as u8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SimulatedGmac;

    #[test]
    fn station_address_register_layout() {
        let sim = SimulatedGmac::new();
        let mac = MacRegs::new(&sim);
        mac.set_station_address(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

        assert_eq!(sim.peek(GMACADDR0L_OFFSET), 0x4433_2211);
        assert_eq!(sim.peek(GMACADDR0H_OFFSET), 0x0000_6655);
        assert_eq!(mac.station_address(), [0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
    }

    #[test]
    fn address_slot_offsets() {
        assert_eq!(addr_high_offset(0), 0x40);
        assert_eq!(addr_low_offset(0), 0x44);
        assert_eq!(addr_high_offset(1), 0x48);
        assert_eq!(addr_low_offset(15), 0xBC);
    }

    #[test]
    fn default_config_bits() {
        assert_eq!(GMACCONFIG_DEFAULT, 0x0021_2C80);
        assert_eq!(GMACCONFIG_DEFAULT & (GMACCONFIG_TE | GMACCONFIG_RE), 0);
    }

    #[test]
    fn link_bit() {
        let sim = SimulatedGmac::new();
        let mac = MacRegs::new(&sim);
        assert!(!mac.is_link_up());
        sim.set_link(true);
        assert!(mac.is_link_up());
    }
}
