//! GPIO Abstractions
//!
//! Board control lines for the transceiver: audio muxes, speaker enable,
//! band amplifiers and the antenna switch. Together with the PA power DAC
//! these implement [`Board`]. Lines are any `embedded-hal` output pin; the
//! firmware uses `embassy_stm32::gpio::Output`.

use embassy_stm32::dac::Instance;
use embedded_hal::digital::{OutputPin, PinState};

use crate::radio::bus::{Board, Line};

use super::dac::PaPowerDac;

/// Output pins for every board control line
pub struct ControlLines<P> {
    /// RX audio mux
    pub rx_audio_mux: P,
    /// TX audio mux
    pub tx_audio_mux: P,
    /// Speaker amplifier enable
    pub speaker_enable: P,
    /// VHF receive preamp power
    pub vhf_rx_amp: P,
    /// UHF receive preamp power
    pub uhf_rx_amp: P,
    /// VHF transmit preamp power
    pub vhf_tx_amp: P,
    /// UHF transmit preamp power
    pub uhf_tx_amp: P,
    /// Antenna T/R switch
    pub antenna_switch: P,
}

impl<P: OutputPin> ControlLines<P> {
    fn pin(&mut self, line: Line) -> &mut P {
        match line {
            Line::RxAudioMux => &mut self.rx_audio_mux,
            Line::TxAudioMux => &mut self.tx_audio_mux,
            Line::SpeakerEnable => &mut self.speaker_enable,
            Line::VhfRxAmp => &mut self.vhf_rx_amp,
            Line::UhfRxAmp => &mut self.uhf_rx_amp,
            Line::VhfTxAmp => &mut self.vhf_tx_amp,
            Line::UhfTxAmp => &mut self.uhf_tx_amp,
            Line::AntennaSwitch => &mut self.antenna_switch,
        }
    }
}

/// Board control: GPIO lines plus PA power DAC
pub struct BoardPins<'d, P, T: Instance> {
    lines: ControlLines<P>,
    pa: PaPowerDac<'d, T>,
}

impl<'d, P: OutputPin, T: Instance> BoardPins<'d, P, T> {
    /// Create the board controller
    #[must_use]
    pub fn new(lines: ControlLines<P>, pa: PaPowerDac<'d, T>) -> Self {
        Self { lines, pa }
    }

    /// Get the current PA DAC setting
    #[must_use]
    pub const fn pa_power(&self) -> u16 {
        self.pa.value()
    }
}

impl<P: OutputPin, T: Instance> Board for BoardPins<'_, P, T> {
    fn set_line(&mut self, line: Line, high: bool) {
        trace!("line {:?} -> {}", line, high);
        if self.lines.pin(line).set_state(PinState::from(high)).is_err() {
            warn!("line {:?} write failed", line);
        }
    }

    fn set_pa_power(&mut self, value: u16) {
        self.pa.set(value);
    }
}
