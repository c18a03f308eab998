//! System configuration and hardware constants
//!
//! Compile-time constants for the transceiver hardware: band limits, boot
//! defaults, bus addresses and timing, and pin assignments. The runtime
//! settings store consumed by the transceiver lives at the bottom of this
//! module.

use crate::types::TxPower;

/// Lowest frequency accepted for tuning in the VHF range (134.0 MHz)
pub const BAND_VHF_MIN: u32 = 1_340_000;

/// Highest frequency accepted for tuning in the VHF range (174.0 MHz, inclusive)
pub const BAND_VHF_MAX: u32 = 1_740_000;

/// Lowest frequency accepted for tuning in the UHF range (400.0 MHz)
pub const BAND_UHF_MIN: u32 = 4_000_000;

/// Highest frequency accepted for tuning in the UHF range (520.0 MHz, inclusive)
pub const BAND_UHF_MAX: u32 = 5_200_000;

/// VHF amplifier window start (inclusive)
pub const RADIO_VHF_MIN: u32 = 1_340_000;

/// VHF amplifier window end (exclusive)
pub const RADIO_VHF_MAX: u32 = 1_740_000;

/// UHF amplifier window start (inclusive)
pub const RADIO_UHF_MIN: u32 = 4_000_000;

/// UHF amplifier window end (exclusive)
pub const RADIO_UHF_MAX: u32 = 5_200_000;

/// Size of one internal frequency unit in Hz
pub const FREQUENCY_UNIT_HZ: u32 = 100;

/// Default startup frequency (144.0 MHz)
pub const DEFAULT_FREQUENCY: u32 = 1_440_000;

/// Default DMR colour code
pub const DEFAULT_COLOUR_CODE: u8 = 1;

/// Default DMR talk group (local)
pub const DEFAULT_TALK_GROUP: u32 = 9;

/// Default DMR ID (unset until loaded from the codeplug)
pub const DEFAULT_DMR_ID: u32 = 0;

/// Default PA DAC setting
pub const DEFAULT_TX_POWER: u16 = 3_100;

/// Largest value accepted for DMR talk groups and IDs (24 bits)
pub const DMR_ADDRESS_MAX: u32 = 0x00FF_FFFF;

/// Squelch monitor ticks between noise-floor samples
pub const SQUELCH_SAMPLE_TICKS: u8 = 50;

/// Noise reading below which the analog squelch opens
pub const SQUELCH_NOISE_THRESHOLD: u8 = 45;

/// Control loop period in milliseconds (drives the squelch monitor)
pub const CONTROL_TICK_MS: u64 = 2;

/// Upper bound on a single bus transaction
pub const BUS_TIMEOUT_MS: u64 = 10;

/// I2C bus frequency for the RF transceiver
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// SPI clock for the DMR modem
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// AT1846S 7-bit I2C address
pub const AT1846S_I2C_ADDR: u8 = 0x71;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// I2C1 SCL (RF transceiver)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (RF transceiver)
    pub const I2C1_SDA: &str = "PB9";

    /// SPI1 SCK (DMR modem)
    pub const SPI1_SCK: &str = "PA5";

    /// SPI1 MISO (DMR modem)
    pub const SPI1_MISO: &str = "PA6";

    /// SPI1 MOSI (DMR modem)
    pub const SPI1_MOSI: &str = "PA7";

    /// DMR modem chip select (active low)
    pub const MODEM_CS: &str = "PB6";

    /// RX audio mux (high = RF chip to speaker, low = RF chip to modem)
    pub const RX_AUDIO_MUX: &str = "PC0";

    /// TX audio mux (high = modem drives modulation)
    pub const TX_AUDIO_MUX: &str = "PC1";

    /// Speaker amplifier enable
    pub const SPEAKER_ENABLE: &str = "PC2";

    /// VHF receive preamp power
    pub const VHF_RX_AMP: &str = "PC3";

    /// UHF receive preamp power
    pub const UHF_RX_AMP: &str = "PC4";

    /// VHF transmit preamp power
    pub const VHF_TX_AMP: &str = "PC5";

    /// UHF transmit preamp power
    pub const UHF_TX_AMP: &str = "PC6";

    /// Antenna T/R switch (high = transmit)
    pub const ANTENNA_SWITCH: &str = "PB0";

    /// PA power DAC output
    pub const PA_DAC: &str = "PA4";
}

/// Persisted-settings store consumed by the transceiver
///
/// The persistence medium itself (flash, EEPROM) is owned by the settings
/// subsystem; the transceiver only reads and updates these two values.
pub trait SettingsStore {
    /// Current transmit power DAC setting
    fn tx_power(&self) -> TxPower;

    /// Store a new transmit power DAC setting
    fn set_tx_power(&mut self, power: TxPower);

    /// Whether per-band modem calibration is applied on frequency changes
    fn use_calibration(&self) -> bool;
}

/// In-memory copy of the non-volatile settings block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonVolatileSettings {
    /// Transmit power DAC setting
    pub tx_power: TxPower,
    /// Apply modem calibration
    pub use_calibration: bool,
}

impl NonVolatileSettings {
    /// Create settings with explicit values
    #[must_use]
    pub const fn new(tx_power: TxPower, use_calibration: bool) -> Self {
        Self {
            tx_power,
            use_calibration,
        }
    }
}

impl Default for NonVolatileSettings {
    fn default() -> Self {
        Self::new(TxPower::DEFAULT, true)
    }
}

impl SettingsStore for NonVolatileSettings {
    fn tx_power(&self) -> TxPower {
        self.tx_power
    }

    fn set_tx_power(&mut self, power: TxPower) {
        self.tx_power = power;
    }

    fn use_calibration(&self) -> bool {
        self.use_calibration
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for NonVolatileSettings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Settings(pwr={}, cal={})",
            self.tx_power,
            self.use_calibration
        );
    }
}
