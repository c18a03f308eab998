//! Peripheral Drivers
//!
//! Register-level drivers for the external ICs. Each implements one of the
//! bus traits the control core is written against.

pub mod at1846s;
pub mod hrc6000;
