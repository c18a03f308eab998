//! `HR-C6000` DMR Modem Driver
//!
//! The modem exposes paged 8-bit registers over SPI. A write is a single
//! three-byte frame: page, register, value.

use crate::error::BusResult;
use crate::hal::spi::SpiDevice;
use crate::radio::bus::ModemBus;

/// `HR-C6000` driver
pub struct HrC6000<'d> {
    spi: SpiDevice<'d>,
}

impl<'d> HrC6000<'d> {
    /// Create a driver on an SPI device
    #[must_use]
    pub fn new(spi: SpiDevice<'d>) -> Self {
        Self { spi }
    }
}

impl ModemBus for HrC6000<'_> {
    fn write_page_reg(&mut self, page: u8, reg: u8, value: u8) -> BusResult<()> {
        trace!("c6000 w {}:0x{:02X} = 0x{:02X}", page, reg, value);
        self.spi.write(&[page, reg, value])
    }
}
