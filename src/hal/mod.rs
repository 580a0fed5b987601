//! Hardware Abstraction Layer
//!
//! This module provides higher-level sequences over the raw registers.
//!
//! # Modules
//!
//! - [`reset`]: Reset controller for the GMAC
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod reset;

// Re-export commonly used types
pub use reset::ResetController;
