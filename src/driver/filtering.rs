//! Receive filtering and station address management.
//!
//! This module extends [`Gmac`] with the frame filter and address-slot
//! operations:
//!
//! - **Receive filters** - broadcast, accept-all-multicast, and promiscuous
//!   reception, driven by the Frame Filter register
//! - **Station address** - address slot 0, the address unicast frames are
//!   matched against
//!
//! The filter setting is never cached: it is recomputed from the Frame
//! Filter register every time it is queried.
//!
//! # Limitations
//!
//! No hash table or perfect-filter slots beyond slot 0 are programmed.
//! Requesting multicast reception engages the pass-all-multicast bit, so
//! per-group multicast filtering is not available.

use bitflags::bitflags;

use super::error::{Error, Result};
use super::gmac::Gmac;
use crate::internal::constants::MAC_ADDR_LEN;
use crate::internal::log::gmac_debug;
use crate::internal::register::RegisterAccess;
use crate::internal::register::mac::{GMACFF_DBF, GMACFF_PM, GMACFF_PR, MacRegs};

// =============================================================================
// Receive Filter Flags
// =============================================================================

bitflags! {
    /// Classes of frames the interface accepts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReceiveFilter: u8 {
        /// Unicast frames addressed to the station address
        const UNICAST = 0x01;
        /// Multicast frames
        const MULTICAST = 0x02;
        /// Broadcast frames
        const BROADCAST = 0x04;
        /// Every frame regardless of destination
        const PROMISCUOUS = 0x08;
        /// Every multicast frame
        const PROMISCUOUS_MULTICAST = 0x10;
    }
}

impl ReceiveFilter {
    /// Filters the hardware can honour.
    ///
    /// Plain multicast is accepted in requests but is implemented with the
    /// pass-all-multicast bit, so it never shows up in the reported setting.
    pub const SUPPORTED: Self = Self::UNICAST
        .union(Self::BROADCAST)
        .union(Self::PROMISCUOUS)
        .union(Self::PROMISCUOUS_MULTICAST);

    /// Decode the setting in effect from a Frame Filter register value
    #[must_use]
    pub const fn from_frame_filter(raw: u32) -> Self {
        let mut filter = Self::UNICAST;
        if raw & GMACFF_DBF == 0 {
            filter = filter.union(Self::BROADCAST);
        }
        if raw & GMACFF_PR != 0 {
            filter = filter.union(Self::PROMISCUOUS);
        }
        if raw & GMACFF_PM != 0 {
            filter = filter.union(Self::PROMISCUOUS_MULTICAST);
        }
        filter
    }

    /// Apply this request to a Frame Filter register value
    #[must_use]
    pub const fn apply_to_frame_filter(self, raw: u32) -> u32 {
        let mut value = raw;
        if self.contains(Self::BROADCAST) {
            value &= !GMACFF_DBF;
        } else {
            value |= GMACFF_DBF;
        }
        if self.intersects(Self::MULTICAST.union(Self::PROMISCUOUS_MULTICAST)) {
            value |= GMACFF_PM;
        } else {
            value &= !GMACFF_PM;
        }
        if self.contains(Self::PROMISCUOUS) {
            value |= GMACFF_PR;
        } else {
            value &= !GMACFF_PR;
        }
        value
    }

    /// One letter per flag in `UBMPW` order, upper case when set
    #[must_use]
    pub fn letters(self) -> [u8; 5] {
        let pick = |flag: Self, letter: u8| {
            if self.contains(flag) {
                letter
            } else {
                letter.to_ascii_lowercase()
            }
        };
        [
            pick(Self::UNICAST, b'U'),
            pick(Self::BROADCAST, b'B'),
            pick(Self::MULTICAST, b'M'),
            pick(Self::PROMISCUOUS, b'P'),
            pick(Self::PROMISCUOUS_MULTICAST, b'W'),
        ]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReceiveFilter {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "ReceiveFilter({=u8:#04x})", self.bits());
    }
}

fn log_filter(what: &str, filter: ReceiveFilter) {
    let letters = filter.letters();
    let text = core::str::from_utf8(&letters).unwrap_or("?????");
    gmac_debug!("{} = {}", what, text);
}

// =============================================================================
// Filter and Address Operations
// =============================================================================

impl<R: RegisterAccess, const RX_DESCS: usize, const TX_DESCS: usize> Gmac<R, RX_DESCS, TX_DESCS> {
    /// Filter setting currently programmed into the MAC
    ///
    /// Unicast is always reported. Valid in any lifecycle state.
    pub fn receive_filter_setting(&self) -> ReceiveFilter {
        critical_section::with(|_| self.filter_setting_raw())
    }

    pub(super) fn filter_setting_raw(&self) -> ReceiveFilter {
        ReceiveFilter::from_frame_filter(MacRegs::new(self.registers()).frame_filter())
    }

    /// Update the receive filters
    ///
    /// The effective request is `enable & !disable`. Broadcast, multicast,
    /// and promiscuous reception are switched on or off to match it.
    /// `reset_multicast` and `multicast_list` are accepted for interface
    /// compatibility and ignored, since no address list is ever programmed.
    ///
    /// # Errors
    /// - `NotStarted` - device is stopped
    /// - `DeviceError` - device is started but not initialized
    pub fn set_receive_filters(
        &mut self,
        enable: ReceiveFilter,
        disable: ReceiveFilter,
        reset_multicast: bool,
        multicast_list: &[[u8; MAC_ADDR_LEN]],
    ) -> Result<()> {
        critical_section::with(|_| {
            self.require_initialized("set_receive_filters")?;

            let request = enable.difference(disable);
            log_filter("filter request", request);
            if reset_multicast || !multicast_list.is_empty() {
                gmac_debug!(
                    "multicast list ignored (reset={}, entries={})",
                    reset_multicast,
                    multicast_list.len()
                );
            }

            let mac = MacRegs::new(self.registers());
            mac.set_frame_filter(request.apply_to_frame_filter(mac.frame_filter()));

            log_filter("filter setting", self.filter_setting_raw());
            Ok(())
        })
    }

    /// Change or restore the station address
    ///
    /// With `reset` set, the permanent address from [`GmacConfig`] replaces
    /// the current one and `new_address` is ignored. Otherwise
    /// `new_address` becomes the current address. Address slot 0 is
    /// reprogrammed in both cases.
    ///
    /// # Errors
    /// - `NotStarted` - device is stopped
    /// - `DeviceError` - device is started but not initialized
    /// - `InvalidParameter` - `reset` is false and no address was supplied
    ///
    /// [`GmacConfig`]: super::config::GmacConfig
    pub fn set_station_address(
        &mut self,
        reset: bool,
        new_address: Option<[u8; MAC_ADDR_LEN]>,
    ) -> Result<()> {
        critical_section::with(|_| {
            self.require_initialized("set_station_address")?;

            self.current_address = if reset {
                gmac_debug!("station address reset to permanent address");
                self.config.mac_address
            } else {
                new_address.ok_or(Error::InvalidParameter)?
            };

            MacRegs::new(self.registers()).set_station_address(&self.current_address);

            let a = self.current_address;
            gmac_debug!(
                "station address {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                a[0],
                a[1],
                a[2],
                a[3],
                a[4],
                a[5]
            );
            Ok(())
        })
    }

    /// Station address currently in use
    pub fn station_address(&self) -> [u8; MAC_ADDR_LEN] {
        self.current_address
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::GmacConfig;
    use crate::internal::register::mac::{GMACADDR0H_OFFSET, GMACADDR0L_OFFSET, GMACFF_OFFSET};
    use crate::testing::initialized_gmac;

    #[test]
    fn setting_decodes_frame_filter_bits() {
        assert_eq!(
            ReceiveFilter::from_frame_filter(0),
            ReceiveFilter::UNICAST | ReceiveFilter::BROADCAST
        );
        assert_eq!(ReceiveFilter::from_frame_filter(GMACFF_DBF), ReceiveFilter::UNICAST);
        assert_eq!(
            ReceiveFilter::from_frame_filter(GMACFF_DBF | GMACFF_PR | GMACFF_PM),
            ReceiveFilter::UNICAST
                | ReceiveFilter::PROMISCUOUS
                | ReceiveFilter::PROMISCUOUS_MULTICAST
        );
    }

    #[test]
    fn request_clears_unrequested_bits() {
        let raw = GMACFF_PR | GMACFF_PM | 0x8000_0000;
        let value = ReceiveFilter::UNICAST.apply_to_frame_filter(raw);
        assert_eq!(value, GMACFF_DBF | 0x8000_0000);
    }

    #[test]
    fn multicast_shares_pass_all_bit() {
        let a = ReceiveFilter::MULTICAST.apply_to_frame_filter(0);
        let b = ReceiveFilter::PROMISCUOUS_MULTICAST.apply_to_frame_filter(0);
        assert_eq!(a, b);
        assert_ne!(a & GMACFF_PM, 0);
    }

    #[test]
    fn letters_follow_request() {
        let filter = ReceiveFilter::UNICAST | ReceiveFilter::MULTICAST;
        assert_eq!(&filter.letters(), b"UbMpw");
        assert_eq!(&ReceiveFilter::empty().letters(), b"ubmpw");
    }

    #[test]
    fn set_filters_uses_enable_minus_disable() {
        let (sim, mut gmac) = initialized_gmac();
        gmac.set_receive_filters(
            ReceiveFilter::BROADCAST | ReceiveFilter::PROMISCUOUS,
            ReceiveFilter::PROMISCUOUS,
            false,
            &[],
        )
        .unwrap();

        assert_eq!(sim.peek(GMACFF_OFFSET) & (GMACFF_DBF | GMACFF_PR | GMACFF_PM), 0);
        assert_eq!(
            gmac.receive_filter_setting(),
            ReceiveFilter::UNICAST | ReceiveFilter::BROADCAST
        );
    }

    #[test]
    fn set_filters_promiscuous_and_multicast() {
        let (_sim, mut gmac) = initialized_gmac();
        gmac.set_receive_filters(
            ReceiveFilter::MULTICAST | ReceiveFilter::PROMISCUOUS,
            ReceiveFilter::empty(),
            true,
            &[[0x01, 0x00, 0x5E, 0x00, 0x00, 0x01]],
        )
        .unwrap();

        assert_eq!(
            gmac.receive_filter_setting(),
            ReceiveFilter::UNICAST
                | ReceiveFilter::PROMISCUOUS
                | ReceiveFilter::PROMISCUOUS_MULTICAST
        );
        assert_eq!(gmac.mode().receive_filter_setting, gmac.receive_filter_setting());
    }

    #[test]
    fn station_address_set_and_reset() {
        let (sim, mut gmac) = initialized_gmac();
        let permanent = GmacConfig::default().mac_address;
        let new = [0x4C, 0x4D, 0x00, 0xAB, 0xCD, 0xEF];

        gmac.set_station_address(false, Some(new)).unwrap();
        assert_eq!(gmac.station_address(), new);
        assert_eq!(sim.peek(GMACADDR0L_OFFSET), 0xAB00_4D4C);
        assert_eq!(sim.peek(GMACADDR0H_OFFSET), 0x0000_EFCD);
        assert_eq!(gmac.mode().permanent_address, permanent);

        gmac.set_station_address(true, Some([0xFF; 6])).unwrap();
        assert_eq!(gmac.station_address(), permanent);
        assert_eq!(gmac.mode().current_address, permanent);
    }

    #[test]
    fn station_address_requires_address_without_reset() {
        let (_sim, mut gmac) = initialized_gmac();
        let before = gmac.station_address();
        assert_eq!(gmac.set_station_address(false, None), Err(Error::InvalidParameter));
        assert_eq!(gmac.station_address(), before);
    }
}
