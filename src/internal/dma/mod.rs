//! DMA Engine
//!
//! This module provides the DMA engine for managing TX and RX descriptor rings
//! and the RX buffer pool. All memory is statically allocated using const
//! generics.
//!
//! # Architecture
//!
//! - [`DmaEngine`]: owns both rings, the RX buffers, and the TX release index
//! - [`DescriptorRing`](ring::DescriptorRing): circular ring carved out of an
//!   oversized region so its base is always descriptor-aligned
//! - Descriptor types for RX and TX plus their bit definitions
//!
//! # Note
//!
//! This is an internal module. Some inspection helpers exist only for
//! diagnostics and tests.

pub(crate) mod descriptor;
mod engine;
mod ring;

pub use descriptor::Ownership;
pub use engine::DmaEngine;
