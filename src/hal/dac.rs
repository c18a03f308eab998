//! DAC Driver
//!
//! PA power control through the STM32G474 DAC.

use embassy_stm32::dac::{DacChannel, Instance, Value};

use crate::types::TxPower;

/// PA power DAC output
pub struct PaPowerDac<'d, T: Instance> {
    channel: DacChannel<'d, T, 1>,
    value: u16,
}

impl<'d, T: Instance> PaPowerDac<'d, T> {
    /// Create the driver with the PA off
    #[must_use]
    pub fn new(mut channel: DacChannel<'d, T, 1>) -> Self {
        channel.set(Value::Bit12Right(0));
        Self { channel, value: 0 }
    }

    /// Set the 12-bit output, values above 4095 are clamped
    pub fn set(&mut self, value: u16) {
        let value = value.min(TxPower::MAX.dac_value());
        self.channel.set(Value::Bit12Right(value));
        self.value = value;
    }

    /// Get the last value written
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }
}
