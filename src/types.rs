//! Shared types used across the transceiver firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at construction time and provide type safety throughout the codebase.

use core::fmt;

use crate::config;
use crate::error::{Argument, Error};

/// Frequency in internal units (100 Hz steps)
///
/// Only values inside the broad VHF/UHF operating bounds can be constructed.
/// A valid `Frequency` may still fall outside the narrower amplifier windows,
/// see [`Band`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Boot-time frequency (144.0 MHz)
    pub const DEFAULT: Self = Self(config::DEFAULT_FREQUENCY);

    /// Create a new Frequency from internal units, returns None if out of range
    #[must_use]
    pub const fn new(units: u32) -> Option<Self> {
        if Self::in_operating_bounds(units) {
            Some(Self(units))
        } else {
            None
        }
    }

    /// Create a new Frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Option<Self> {
        match khz.checked_mul(10) {
            Some(units) => Self::new(units),
            None => None,
        }
    }

    /// Check a raw value against the broad operating bounds (inclusive)
    #[must_use]
    pub const fn in_operating_bounds(units: u32) -> bool {
        (units >= config::BAND_VHF_MIN && units <= config::BAND_VHF_MAX)
            || (units >= config::BAND_UHF_MIN && units <= config::BAND_UHF_MAX)
    }

    /// Get the frequency in internal units
    #[must_use]
    pub const fn units(self) -> u32 {
        self.0
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u64 {
        self.0 as u64 * config::FREQUENCY_UNIT_HZ as u64
    }

    /// Amplifier band for this frequency
    #[must_use]
    pub const fn band(self) -> Band {
        Band::classify(self.0)
    }

    /// Synthesizer word for the RF chip (1/16 kHz steps)
    ///
    /// Fixed-point `units * 1.6`, truncated to 32 bits.
    #[must_use]
    pub const fn synth_word(self) -> u32 {
        (self.0 as u64 * 8 / 5) as u32
    }
}

impl TryFrom<u32> for Frequency {
    type Error = Error;

    fn try_from(units: u32) -> Result<Self, Self::Error> {
        Self::new(units).ok_or(Error::InvalidArgument(Argument::Frequency(units)))
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} x 100 Hz)", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04} MHz", self.0 / 10_000, self.0 % 10_000)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}.{=u32:04} MHz", self.0 / 10_000, self.0 % 10_000);
    }
}

/// Amplifier band, derived from a frequency
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// 134 - 174 MHz
    Vhf,
    /// 400 - 520 MHz
    Uhf,
    /// Outside both amplifier windows
    Unsupported,
}

impl Band {
    /// Classify a raw frequency (internal units)
    #[must_use]
    pub const fn classify(units: u32) -> Self {
        if units >= config::RADIO_VHF_MIN && units < config::RADIO_VHF_MAX {
            Self::Vhf
        } else if units >= config::RADIO_UHF_MIN && units < config::RADIO_UHF_MAX {
            Self::Uhf
        } else {
            Self::Unsupported
        }
    }

    /// Check if a power amplifier chain exists for this band
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Noise level below which the analog squelch opens
    #[must_use]
    pub const fn squelch_threshold(self) -> u8 {
        match self {
            Self::Vhf | Self::Uhf | Self::Unsupported => config::SQUELCH_NOISE_THRESHOLD,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vhf => f.write_str("VHF"),
            Self::Uhf => f.write_str("UHF"),
            Self::Unsupported => f.write_str("out-of-band"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Vhf => defmt::write!(f, "VHF"),
            Self::Uhf => defmt::write!(f, "UHF"),
            Self::Unsupported => defmt::write!(f, "out-of-band"),
        }
    }
}

/// Operating mode for the radio
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OperatingMode {
    /// Boot state, no audio path configured
    #[default]
    None,
    /// Analog FM
    Analog,
    /// DMR
    Digital,
}

impl OperatingMode {
    /// Check if this mode routes audio through the DMR modem
    #[must_use]
    pub const fn is_digital(self) -> bool {
        matches!(self, Self::Digital)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("NONE"),
            Self::Analog => f.write_str("FM"),
            Self::Digital => f.write_str("DMR"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for OperatingMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::None => defmt::write!(f, "NONE"),
            Self::Analog => defmt::write!(f, "FM"),
            Self::Digital => defmt::write!(f, "DMR"),
        }
    }
}

/// Channel bandwidth
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Bandwidth {
    /// 12.5 kHz (narrow, mandatory for DMR)
    #[default]
    Narrow12k5,
    /// 25 kHz (wide analog)
    Wide25k,
}

impl Bandwidth {
    /// Build from the "is 25 kHz" flag used by channel settings
    #[must_use]
    pub const fn from_25khz(is_25khz: bool) -> Self {
        if is_25khz {
            Self::Wide25k
        } else {
            Self::Narrow12k5
        }
    }

    /// Check if this is the 25 kHz setting
    #[must_use]
    pub const fn is_25khz(self) -> bool {
        matches!(self, Self::Wide25k)
    }

    /// Bandwidth in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        match self {
            Self::Narrow12k5 => 12_500,
            Self::Wide25k => 25_000,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Bandwidth {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Narrow12k5 => defmt::write!(f, "12.5k"),
            Self::Wide25k => defmt::write!(f, "25k"),
        }
    }
}

/// DMR colour code (0-15)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColourCode(u8);

impl ColourCode {
    /// Highest valid colour code
    pub const MAX: u8 = 15;

    /// Boot-time colour code
    pub const DEFAULT: Self = Self(config::DEFAULT_COLOUR_CODE);

    /// Create a colour code, returns None above 15
    #[must_use]
    pub const fn new(cc: u8) -> Option<Self> {
        if cc <= Self::MAX {
            Some(Self(cc))
        } else {
            None
        }
    }

    /// Get the colour code value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Register byte with the colour code in the upper nibble
    #[must_use]
    pub const fn register_value(self) -> u8 {
        self.0 << 4
    }
}

impl Default for ColourCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ColourCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CC{}", self.0);
    }
}

/// Transmit power as a 12-bit PA DAC setting
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TxPower(u16);

impl TxPower {
    /// PA off
    pub const OFF: Self = Self(0);

    /// Full-scale DAC value
    pub const MAX: Self = Self(4095);

    /// Factory default power
    pub const DEFAULT: Self = Self(config::DEFAULT_TX_POWER);

    /// Create a power setting, returns None above 4095 (never clamps)
    #[must_use]
    pub const fn new(value: u16) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw DAC value
    #[must_use]
    pub const fn dac_value(self) -> u16 {
        self.0
    }
}

impl Default for TxPower {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TxPower {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DAC({})", self.0);
    }
}

/// Sub-audible CTCSS tone, stored as tone frequency x10 (0.1 Hz units)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CtcssTone(u16);

impl CtcssTone {
    /// Codeplug value meaning "no tone selected"
    pub const NONE_SENTINEL: u16 = 0xFFFF;

    /// Create from tone x10 (e.g. 1000 for 100.0 Hz)
    ///
    /// Returns None for the sentinel and for tones whose register
    /// encoding does not fit in 16 bits.
    #[must_use]
    pub const fn from_x10(tone_x10: u16) -> Option<Self> {
        if tone_x10 == Self::NONE_SENTINEL || tone_x10 > u16::MAX / 10 {
            None
        } else {
            Some(Self(tone_x10))
        }
    }

    /// Tone frequency x10
    #[must_use]
    pub const fn tone_x10(self) -> u16 {
        self.0
    }

    /// Value for the RF chip tone register (0.01 Hz units)
    #[must_use]
    pub const fn register_value(self) -> u16 {
        self.0 * 10
    }
}

impl fmt::Display for CtcssTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} Hz", self.0 / 10, self.0 % 10)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CtcssTone {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}.{} Hz", self.0 / 10, self.0 % 10);
    }
}

/// Audio output gate driven by the squelch monitor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SquelchState {
    /// Speaker muted
    #[default]
    Closed,
    /// Speaker unmuted
    Open,
}

impl SquelchState {
    /// Check if audio passes to the speaker
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SquelchState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Closed => defmt::write!(f, "SQL-CLOSED"),
            Self::Open => defmt::write!(f, "SQL-OPEN"),
        }
    }
}

/// Transmit/Receive path direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TxRxState {
    /// Receiving
    #[default]
    Rx,
    /// Transmitting
    Tx,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TxRxState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Rx => defmt::write!(f, "RX"),
            Self::Tx => defmt::write!(f, "TX"),
        }
    }
}
