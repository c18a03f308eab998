//! Transceiver Firmware Library
//!
//! Control core for a handheld DMR/analog two-way radio. An STM32G474
//! drives an AT1846S-class analog RF transceiver over I2C and an
//! HR-C6000-class DMR modem over SPI, plus GPIO-switched amplifiers,
//! antenna switch and audio muxes, and a DAC setting PA power.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Control loop  │  Modem tick  │  Snapshot publication        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  TRANSCEIVER CONTROL CORE                    │
//! │  State machine │ Sequencer │ Calibration │ Switch │ Squelch  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  AT1846S (I2C)  │  HR-C6000 (SPI)  │  GPIO  │  DAC           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single owner**: one [`radio::Transceiver`] holds all tunable state
//! - **Commit after apply**: state changes only once the hardware accepted them
//! - **Type-driven design**: custom types enforce ranges at construction
//! - **No unsafe in application code**
//! - **Explicit error handling**: every bus call returns `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must come first so the logging macros are visible to later modules
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_sync;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Bus and pin wrappers over STM32G474 peripherals.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// Register-level drivers for the RF transceiver and DMR modem.
#[cfg(feature = "embedded")]
pub mod drivers;

/// Radio Control Logic
///
/// Transceiver state machine, sequencing, calibration and squelch.
pub mod radio;

/// Error types
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::{NonVolatileSettings, SettingsStore};
    pub use crate::error::{BusError, BusResult, Error, TrxResult};
    pub use crate::radio::{
        AudioHooks, Board, CalibrationSource, CalibrationTable, Line, ModemBus, RfBus,
        Transceiver, TrxSnapshot,
    };
    pub use crate::types::*;

    #[cfg(feature = "embedded")]
    pub use embedded_hal::digital::OutputPin;
}
