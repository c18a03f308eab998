//! I2C Bus Abstractions
//!
//! Blocking I2C access for the RF transceiver. Transactions are bounded by
//! the peripheral timeout configured in `main` and surface as
//! [`BusError::Timeout`].

use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::mode::Blocking;

use crate::config::AT1846S_I2C_ADDR;
use crate::error::{BusError, BusResult};

impl From<I2cError> for BusError {
    fn from(err: I2cError) -> Self {
        match err {
            I2cError::Nack => Self::Nack,
            I2cError::Timeout => Self::Timeout,
            I2cError::Arbitration => Self::Arbitration,
            _ => Self::Other,
        }
    }
}

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// AT1846S RF transceiver address
    pub const AT1846S: Self = Self(AT1846S_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// I2C bus wrapper
pub struct I2cBus<'d> {
    i2c: I2c<'d, Blocking>,
}

impl<'d> I2cBus<'d> {
    /// Create a new I2C bus wrapper
    #[must_use]
    pub fn new(i2c: I2c<'d, Blocking>) -> Self {
        Self { i2c }
    }

    /// Write bytes to a device
    ///
    /// # Errors
    ///
    /// Returns the mapped peripheral error.
    pub fn write(&mut self, addr: I2cAddress, data: &[u8]) -> BusResult<()> {
        Ok(self.i2c.blocking_write(addr.addr(), data)?)
    }

    /// Write then read (combined transaction)
    ///
    /// # Errors
    ///
    /// Returns the mapped peripheral error.
    pub fn write_read(&mut self, addr: I2cAddress, write: &[u8], read: &mut [u8]) -> BusResult<()> {
        Ok(self.i2c.blocking_write_read(addr.addr(), write, read)?)
    }

    /// Write a 16-bit register, high byte first
    ///
    /// # Errors
    ///
    /// Returns the mapped peripheral error.
    pub fn write_reg16(&mut self, addr: I2cAddress, reg: u8, value: u16) -> BusResult<()> {
        let [hi, lo] = value.to_be_bytes();
        self.write(addr, &[reg, hi, lo])
    }

    /// Read a 16-bit register, high byte first
    ///
    /// # Errors
    ///
    /// Returns the mapped peripheral error.
    pub fn read_reg16(&mut self, addr: I2cAddress, reg: u8) -> BusResult<u16> {
        let mut buf = [0u8; 2];
        self.write_read(addr, &[reg], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }
}
