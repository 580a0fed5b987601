//! DMA descriptor bit field constants.
//!
//! Layout of the DesignWare GMAC alternate (8-word) descriptors used in
//! chained mode.

#![allow(dead_code)]

// =============================================================================
// RDES0 (RX Descriptor Word 0) - Status
// =============================================================================

/// RX Descriptor Word 0 bit field constants
pub mod rdes0 {
    /// Extended Status Available - extended status in RDES4 is valid
    pub const EXT_STATUS: u32 = 1 << 0;
    /// CRC Error - frame has CRC error
    pub const CRC_ERR: u32 = 1 << 1;
    /// Dribble Bit Error - frame contains non-integer multiple of 8 bits
    pub const DRIBBLE_ERR: u32 = 1 << 2;
    /// Receive Error - error reported by PHY (RX_ER signal)
    pub const RX_ERR: u32 = 1 << 3;
    /// Receive Watchdog Timeout - frame truncated due to watchdog
    pub const RX_WATCHDOG: u32 = 1 << 4;
    /// Frame Type - 1 = Ethernet frame (length/type > 0x600)
    pub const FRAME_TYPE: u32 = 1 << 5;
    /// Late Collision - collision detected after 64 bytes
    pub const LATE_COLLISION: u32 = 1 << 6;
    /// Timestamp Available / CRC of a giant frame
    pub const TIMESTAMP_AVAIL: u32 = 1 << 7;
    /// Last Descriptor - this is the last descriptor for the frame
    pub const LAST_DESC: u32 = 1 << 8;
    /// First Descriptor - this is the first descriptor for the frame
    pub const FIRST_DESC: u32 = 1 << 9;
    /// VLAN Tag - frame is VLAN tagged
    pub const VLAN_TAG: u32 = 1 << 10;
    /// Overflow Error - DMA buffer overflow
    pub const OVERFLOW_ERR: u32 = 1 << 11;
    /// Length Error - actual length doesn't match length/type field
    pub const LENGTH_ERR: u32 = 1 << 12;
    /// Source Address Filter Fail - frame failed SA filter
    pub const SA_FILTER_FAIL: u32 = 1 << 13;
    /// Descriptor Error - descriptor not available or bus error
    pub const DESC_ERR: u32 = 1 << 14;
    /// Error Summary - logical OR of error bits
    pub const ERR_SUMMARY: u32 = 1 << 15;
    /// Frame Length shift (14 bits)
    pub const FRAME_LEN_SHIFT: u32 = 16;
    /// Frame Length mask
    pub const FRAME_LEN_MASK: u32 = 0x3FFF << 16;
    /// Destination Address Filter Fail - frame failed DA filter
    pub const DA_FILTER_FAIL: u32 = 1 << 30;
    /// OWN - when set, descriptor owned by DMA; when clear, owned by CPU
    pub const OWN: u32 = 1 << 31;

    /// Both segment markers: the frame fits in this one descriptor
    pub const SINGLE_DESC: u32 = FIRST_DESC | LAST_DESC;

    /// All possible RX error bits
    pub const ALL_ERRORS: u32 = CRC_ERR
        | DRIBBLE_ERR
        | RX_ERR
        | RX_WATCHDOG
        | LATE_COLLISION
        | OVERFLOW_ERR
        | LENGTH_ERR
        | DESC_ERR;
}

// =============================================================================
// RDES1 (RX Descriptor Word 1) - Control
// =============================================================================

/// RX Descriptor Word 1 bit field constants
pub mod rdes1 {
    /// RX Buffer 1 Size mask (13 bits)
    pub const BUFFER1_SIZE_MASK: u32 = 0x1FFF;
    /// RX Buffer 1 Size shift
    pub const BUFFER1_SIZE_SHIFT: u32 = 0;
    /// Second Address Chained - buffer2 contains next descriptor address
    pub const SECOND_ADDR_CHAINED: u32 = 1 << 14;
    /// Receive End of Ring - this is the last descriptor in the ring
    pub const RX_END_OF_RING: u32 = 1 << 15;
    /// RX Buffer 2 Size shift
    pub const BUFFER2_SIZE_SHIFT: u32 = 16;
    /// RX Buffer 2 Size mask (13 bits)
    pub const BUFFER2_SIZE_MASK: u32 = 0x1FFF << 16;
    /// Disable Interrupt on Completion
    pub const DISABLE_INT_ON_COMPLETE: u32 = 1 << 31;
}

// =============================================================================
// TDES0 (TX Descriptor Word 0) - Status and Control
// =============================================================================

/// TX Descriptor Word 0 bit field constants
pub mod tdes0 {
    /// Deferred Bit - frame transmission was deferred
    pub const DEFERRED: u32 = 1 << 0;
    /// Underflow Error - TX FIFO underflow during transmission
    pub const UNDERFLOW_ERR: u32 = 1 << 1;
    /// Excessive Deferral - deferred for more than 24288 bit times
    pub const EXCESSIVE_DEFERRAL: u32 = 1 << 2;
    /// Collision Count shift
    pub const COLLISION_COUNT_SHIFT: u32 = 3;
    /// Collision Count mask (4 bits)
    pub const COLLISION_COUNT_MASK: u32 = 0xF << 3;
    /// VLAN Frame - transmitted frame was VLAN tagged
    pub const VLAN_FRAME: u32 = 1 << 7;
    /// Excessive Collision - aborted after 16 collisions
    pub const EXCESSIVE_COLLISION: u32 = 1 << 8;
    /// Late Collision - collision after the collision window
    pub const LATE_COLLISION: u32 = 1 << 9;
    /// No Carrier - carrier sense not asserted
    pub const NO_CARRIER: u32 = 1 << 10;
    /// Loss of Carrier - carrier lost during transmission
    pub const LOSS_OF_CARRIER: u32 = 1 << 11;
    /// IP Payload Error - checksum offload payload error
    pub const IP_PAYLOAD_ERR: u32 = 1 << 12;
    /// Frame Flushed - flushed by software
    pub const FRAME_FLUSHED: u32 = 1 << 13;
    /// Jabber Timeout
    pub const JABBER_TIMEOUT: u32 = 1 << 14;
    /// Error Summary - logical OR of error bits
    pub const ERR_SUMMARY: u32 = 1 << 15;
    /// IP Header Error - checksum offload header error
    pub const IP_HEADER_ERR: u32 = 1 << 16;
    /// Transmit Timestamp Status - timestamp captured
    pub const TX_TIMESTAMP_STATUS: u32 = 1 << 17;
    /// VLAN Insertion Control shift
    pub const VLAN_INSERT_SHIFT: u32 = 18;
    /// VLAN Insertion Control mask
    pub const VLAN_INSERT_MASK: u32 = 0x3 << 18;
    /// Second Address Chained - buffer2 contains next descriptor address
    pub const SECOND_ADDR_CHAINED: u32 = 1 << 20;
    /// Transmit End of Ring - this is the last descriptor in the ring
    pub const TX_END_OF_RING: u32 = 1 << 21;
    /// Checksum Insertion Control shift
    pub const CHECKSUM_INSERT_SHIFT: u32 = 22;
    /// Checksum Insertion Control mask
    pub const CHECKSUM_INSERT_MASK: u32 = 0x3 << 22;
    /// CRC Replacement Control
    pub const CRC_REPLACE: u32 = 1 << 24;
    /// Transmit Timestamp Enable
    pub const TX_TIMESTAMP_EN: u32 = 1 << 25;
    /// Disable Pad - don't add padding to short frames
    pub const DISABLE_PAD: u32 = 1 << 26;
    /// Disable CRC - don't append CRC
    pub const DISABLE_CRC: u32 = 1 << 27;
    /// First Segment - buffer contains first segment of frame
    pub const FIRST_SEGMENT: u32 = 1 << 28;
    /// Last Segment - buffer contains last segment of frame
    pub const LAST_SEGMENT: u32 = 1 << 29;
    /// Interrupt on Completion - set TI after this frame
    pub const INTERRUPT_ON_COMPLETE: u32 = 1 << 30;
    /// OWN - when set, descriptor owned by DMA; when clear, owned by CPU
    pub const OWN: u32 = 1 << 31;

    /// Control word for a whole frame handed to the DMA in one descriptor
    pub const SINGLE_FRAME: u32 =
        OWN | INTERRUPT_ON_COMPLETE | LAST_SEGMENT | FIRST_SEGMENT | SECOND_ADDR_CHAINED;

    /// All possible TX error bits
    pub const ALL_ERRORS: u32 = UNDERFLOW_ERR
        | EXCESSIVE_DEFERRAL
        | EXCESSIVE_COLLISION
        | LATE_COLLISION
        | NO_CARRIER
        | LOSS_OF_CARRIER
        | IP_PAYLOAD_ERR
        | FRAME_FLUSHED
        | JABBER_TIMEOUT
        | IP_HEADER_ERR;
}

// =============================================================================
// TDES1 (TX Descriptor Word 1) - Buffer Sizes
// =============================================================================

/// TX Descriptor Word 1 bit field constants
pub mod tdes1 {
    /// TX Buffer 1 Size mask (13 bits)
    pub const BUFFER1_SIZE_MASK: u32 = 0x1FFF;
    /// TX Buffer 1 Size shift
    pub const BUFFER1_SIZE_SHIFT: u32 = 0;
    /// TX Buffer 2 Size shift
    pub const BUFFER2_SIZE_SHIFT: u32 = 16;
    /// TX Buffer 2 Size mask (13 bits)
    pub const BUFFER2_SIZE_MASK: u32 = 0x1FFF << 16;
    /// Source Address Insertion Control shift
    pub const SA_INSERT_SHIFT: u32 = 29;
    /// Source Address Insertion Control mask
    pub const SA_INSERT_MASK: u32 = 0x7 << 29;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_frame_control_word() {
        assert_eq!(tdes0::SINGLE_FRAME, 0xF010_0000);
    }

    #[test]
    fn rx_segment_markers() {
        assert_eq!(rdes0::SINGLE_DESC, 0x300);
        assert_eq!(rdes0::FRAME_LEN_MASK >> rdes0::FRAME_LEN_SHIFT, 0x3FFF);
    }
}
