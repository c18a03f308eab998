//! Amplifier and antenna switch controller
//!
//! At most one amplifier of each RX/TX pair is ever asserted. Selection
//! always deasserts the other band's amplifier first, and out-of-band
//! frequencies leave both amplifiers of the pair off.

use crate::types::Band;

use super::bus::{Board, Line};

/// Which amplifier of a VHF/UHF pair to power
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmpSelection {
    /// VHF amplifier powered
    pub vhf: bool,
    /// UHF amplifier powered
    pub uhf: bool,
}

impl AmpSelection {
    /// Both amplifiers off
    pub const NONE: Self = Self {
        vhf: false,
        uhf: false,
    };

    /// Amplifier selection for a band
    #[must_use]
    pub const fn for_band(band: Band) -> Self {
        match band {
            Band::Vhf => Self {
                vhf: true,
                uhf: false,
            },
            Band::Uhf => Self {
                vhf: false,
                uhf: true,
            },
            Band::Unsupported => Self::NONE,
        }
    }
}

fn apply<B: Board>(board: &mut B, vhf_line: Line, uhf_line: Line, selection: AmpSelection) {
    // Break before make
    if !selection.vhf {
        board.set_line(vhf_line, false);
    }
    if !selection.uhf {
        board.set_line(uhf_line, false);
    }
    if selection.vhf {
        board.set_line(vhf_line, true);
    }
    if selection.uhf {
        board.set_line(uhf_line, true);
    }
}

/// Power the receive preamp for a band
pub fn select_rx_amps<B: Board>(board: &mut B, band: Band) {
    apply(board, Line::VhfRxAmp, Line::UhfRxAmp, AmpSelection::for_band(band));
}

/// Power the transmit preamp for a band
pub fn select_tx_amps<B: Board>(board: &mut B, band: Band) {
    apply(board, Line::VhfTxAmp, Line::UhfTxAmp, AmpSelection::for_band(band));
}

/// Power down both receive preamps
pub fn release_rx_amps<B: Board>(board: &mut B) {
    apply(board, Line::VhfRxAmp, Line::UhfRxAmp, AmpSelection::NONE);
}

/// Power down both transmit preamps
pub fn release_tx_amps<B: Board>(board: &mut B) {
    apply(board, Line::VhfTxAmp, Line::UhfTxAmp, AmpSelection::NONE);
}

/// Point the antenna at the transmitter (`true`) or receiver
pub fn set_antenna_tx<B: Board>(board: &mut B, transmit: bool) {
    board.set_line(Line::AntennaSwitch, transmit);
}
