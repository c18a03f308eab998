//! `AT1846S` RF Transceiver Driver
//!
//! Single-chip FM transceiver programmed through 16-bit registers over I2C.
//! Registers are written high byte first.

use crate::error::BusResult;
use crate::hal::i2c::{I2cAddress, I2cBus};
use crate::radio::bus::RfBus;

/// `AT1846S` driver
pub struct At1846s<'d> {
    bus: I2cBus<'d>,
    address: I2cAddress,
}

impl<'d> At1846s<'d> {
    /// Create a driver at the default address
    #[must_use]
    pub fn new(bus: I2cBus<'d>) -> Self {
        Self::with_address(bus, I2cAddress::AT1846S)
    }

    /// Create a driver at a specific address
    #[must_use]
    pub fn with_address(bus: I2cBus<'d>, address: I2cAddress) -> Self {
        Self { bus, address }
    }

    /// Get the device address
    #[must_use]
    pub const fn address(&self) -> I2cAddress {
        self.address
    }
}

impl RfBus for At1846s<'_> {
    fn write_reg(&mut self, reg: u8, value: u16) -> BusResult<()> {
        trace!("at1846s w 0x{:02X} = 0x{:04X}", reg, value);
        self.bus.write_reg16(self.address, reg, value)
    }

    fn read_reg(&mut self, reg: u8) -> BusResult<u16> {
        self.bus.read_reg16(self.address, reg)
    }
}
