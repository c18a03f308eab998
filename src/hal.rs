//! Hardware Abstraction Layer
//!
//! Provides safe abstractions over STM32G474 peripherals.
//! Bus wrappers are blocking: the control core is synchronous and every
//! transaction is bounded by the peripheral timeout.

pub mod dac;
pub mod gpio;
pub mod i2c;
pub mod spi;
