//! SPI Bus Abstractions
//!
//! Blocking SPI access with a software chip select, used by the DMR modem.

use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::{Error as SpiError, Spi};

use crate::error::{BusError, BusResult};

impl From<SpiError> for BusError {
    fn from(_: SpiError) -> Self {
        Self::Other
    }
}

/// SPI bus with a dedicated chip select line (active low)
pub struct SpiDevice<'d> {
    spi: Spi<'d, Blocking>,
    cs: Output<'d>,
}

impl<'d> SpiDevice<'d> {
    /// Create a device, chip select is released
    #[must_use]
    pub fn new(spi: Spi<'d, Blocking>, mut cs: Output<'d>) -> Self {
        cs.set_high();
        Self { spi, cs }
    }

    /// Write a frame with chip select held low for its duration
    ///
    /// # Errors
    ///
    /// Returns the mapped peripheral error. Chip select is released either
    /// way.
    pub fn write(&mut self, frame: &[u8]) -> BusResult<()> {
        self.cs.set_low();
        let result = self.spi.blocking_write(frame);
        self.cs.set_high();
        Ok(result?)
    }
}
