//! Hardware seams
//!
//! The control core only talks to hardware through these traits. The
//! embedded build implements them over the STM32 peripherals in `drivers`
//! and `hal`; host tests implement them with recording fakes.

use crate::error::BusResult;

/// 16-bit register access to the analog RF transceiver
pub trait RfBus {
    /// Write a 16-bit register
    fn write_reg(&mut self, reg: u8, value: u16) -> BusResult<()>;

    /// Read a 16-bit register
    fn read_reg(&mut self, reg: u8) -> BusResult<u16>;

    /// Read a register as its (high, low) byte pair
    fn read_pair(&mut self, reg: u8) -> BusResult<(u8, u8)> {
        let [hi, lo] = self.read_reg(reg)?.to_be_bytes();
        Ok((hi, lo))
    }

    /// Read-modify-write: `new = (old & keep) | set`
    fn modify_reg(&mut self, reg: u8, keep: u16, set: u16) -> BusResult<()> {
        let old = self.read_reg(reg)?;
        self.write_reg(reg, (old & keep) | set)
    }
}

/// Paged 8-bit register access to the digital modem
pub trait ModemBus {
    /// Write one register on a register page
    fn write_page_reg(&mut self, page: u8, reg: u8, value: u8) -> BusResult<()>;
}

/// Board-level control lines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    /// RX audio mux, high routes the RF chip straight to the speaker
    RxAudioMux,
    /// TX audio mux, high lets the modem drive modulation
    TxAudioMux,
    /// Speaker amplifier enable
    SpeakerEnable,
    /// VHF receive preamp
    VhfRxAmp,
    /// UHF receive preamp
    UhfRxAmp,
    /// VHF transmit preamp
    VhfTxAmp,
    /// UHF transmit preamp
    UhfTxAmp,
    /// Antenna T/R switch, high selects transmit
    AntennaSwitch,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Line {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::RxAudioMux => defmt::write!(f, "RX_MUX"),
            Self::TxAudioMux => defmt::write!(f, "TX_MUX"),
            Self::SpeakerEnable => defmt::write!(f, "SPK"),
            Self::VhfRxAmp => defmt::write!(f, "VHF_RX"),
            Self::UhfRxAmp => defmt::write!(f, "UHF_RX"),
            Self::VhfTxAmp => defmt::write!(f, "VHF_TX"),
            Self::UhfTxAmp => defmt::write!(f, "UHF_TX"),
            Self::AntennaSwitch => defmt::write!(f, "ANT"),
        }
    }
}

/// GPIO lines and PA power DAC
///
/// Pin writes on the target cannot fail, so these calls are infallible.
pub trait Board {
    /// Drive a control line high (`true`) or low
    fn set_line(&mut self, line: Line, high: bool);

    /// Set the 12-bit PA power DAC
    fn set_pa_power(&mut self, value: u16);
}

/// Audio pipeline lifecycle, owned by the audio subsystem
///
/// Calls are idempotent: tearing down a pipeline that is not running is a
/// no-op.
pub trait AudioHooks {
    /// Start the analog FM audio path
    fn init_analog(&mut self);

    /// Stop the analog FM audio path
    fn teardown_analog(&mut self);

    /// Start the vocoder audio path
    fn init_digital(&mut self);

    /// Stop the vocoder audio path
    fn teardown_digital(&mut self);
}
