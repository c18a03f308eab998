//! Transceiver state
//!
//! The tunable state owned by the [`Transceiver`](super::trx::Transceiver).
//! Transitions are immutable: each `with_*` returns a new state, so the
//! transceiver only commits a value once the hardware has accepted it.

use crate::config;
use crate::types::{
    Band, Bandwidth, ColourCode, CtcssTone, Frequency, OperatingMode, TxRxState,
};

use super::regmap;

/// Complete transceiver state (immutable)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrxState {
    mode: OperatingMode,
    frequency: Frequency,
    bandwidth: Bandwidth,
    colour_code: ColourCode,
    ctcss: Option<CtcssTone>,
    open_squelch: bool,
    txrx: TxRxState,
    talk_group: u32,
    dmr_id: u32,
}

impl TrxState {
    /// Boot-time state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: OperatingMode::None,
            frequency: Frequency::DEFAULT,
            bandwidth: Bandwidth::Narrow12k5,
            colour_code: ColourCode::DEFAULT,
            ctcss: None,
            open_squelch: false,
            txrx: TxRxState::Rx,
            talk_group: config::DEFAULT_TALK_GROUP,
            dmr_id: config::DEFAULT_DMR_ID,
        }
    }

    /// Get operating mode
    #[must_use]
    pub const fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Get current frequency
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Get amplifier band of the current frequency
    #[must_use]
    pub const fn band(&self) -> Band {
        self.frequency.band()
    }

    /// Get channel bandwidth
    #[must_use]
    pub const fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    /// Get DMR colour code
    #[must_use]
    pub const fn colour_code(&self) -> ColourCode {
        self.colour_code
    }

    /// Get transmit CTCSS tone, None when disabled
    #[must_use]
    pub const fn ctcss(&self) -> Option<CtcssTone> {
        self.ctcss
    }

    /// Check if the squelch override is active
    #[must_use]
    pub const fn open_squelch(&self) -> bool {
        self.open_squelch
    }

    /// Get TX/RX path direction
    #[must_use]
    pub const fn txrx(&self) -> TxRxState {
        self.txrx
    }

    /// Check if transmitting
    #[must_use]
    pub const fn is_transmitting(&self) -> bool {
        matches!(self.txrx, TxRxState::Tx)
    }

    /// Get DMR talk group
    #[must_use]
    pub const fn talk_group(&self) -> u32 {
        self.talk_group
    }

    /// Get DMR ID
    #[must_use]
    pub const fn dmr_id(&self) -> u32 {
        self.dmr_id
    }

    /// Control word bits carried through tuning (bandwidth and squelch)
    #[must_use]
    pub const fn control_bits(&self) -> u16 {
        regmap::bandwidth_bits(self.bandwidth) | regmap::squelch_bits(self.mode, self.open_squelch)
    }

    /// Set mode (returns new state)
    #[must_use]
    pub const fn with_mode(self, mode: OperatingMode) -> Self {
        Self { mode, ..self }
    }

    /// Set frequency (returns new state)
    #[must_use]
    pub const fn with_frequency(self, frequency: Frequency) -> Self {
        Self { frequency, ..self }
    }

    /// Set bandwidth (returns new state)
    #[must_use]
    pub const fn with_bandwidth(self, bandwidth: Bandwidth) -> Self {
        Self { bandwidth, ..self }
    }

    /// Set colour code (returns new state)
    #[must_use]
    pub const fn with_colour_code(self, colour_code: ColourCode) -> Self {
        Self {
            colour_code,
            ..self
        }
    }

    /// Set CTCSS tone (returns new state)
    #[must_use]
    pub const fn with_ctcss(self, ctcss: Option<CtcssTone>) -> Self {
        Self { ctcss, ..self }
    }

    /// Set squelch override (returns new state)
    #[must_use]
    pub const fn with_open_squelch(self, open_squelch: bool) -> Self {
        Self {
            open_squelch,
            ..self
        }
    }

    /// Set TX/RX direction (returns new state)
    #[must_use]
    pub const fn with_txrx(self, txrx: TxRxState) -> Self {
        Self { txrx, ..self }
    }

    /// Set talk group (returns new state)
    #[must_use]
    pub const fn with_talk_group(self, talk_group: u32) -> Self {
        Self { talk_group, ..self }
    }

    /// Set DMR ID (returns new state)
    #[must_use]
    pub const fn with_dmr_id(self, dmr_id: u32) -> Self {
        Self { dmr_id, ..self }
    }

    /// Value copy for collaborators
    #[must_use]
    pub const fn snapshot(&self) -> TrxSnapshot {
        TrxSnapshot {
            mode: self.mode,
            frequency: self.frequency,
            bandwidth: self.bandwidth,
            colour_code: self.colour_code,
            talk_group: self.talk_group,
            dmr_id: self.dmr_id,
            transmitting: self.is_transmitting(),
        }
    }
}

impl Default for TrxState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TrxState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Trx({}, {}, {}, {}, {})",
            self.frequency,
            self.mode,
            self.bandwidth,
            self.colour_code,
            self.txrx
        );
    }
}

/// Immutable copy of the state handed to the modem tick task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrxSnapshot {
    /// Operating mode
    pub mode: OperatingMode,
    /// Current frequency
    pub frequency: Frequency,
    /// Channel bandwidth
    pub bandwidth: Bandwidth,
    /// DMR colour code
    pub colour_code: ColourCode,
    /// DMR talk group
    pub talk_group: u32,
    /// DMR ID
    pub dmr_id: u32,
    /// Transmit path active
    pub transmitting: bool,
}

impl Default for TrxSnapshot {
    fn default() -> Self {
        TrxState::new().snapshot()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TrxSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Snapshot({}, {}, tg={}, tx={})",
            self.frequency,
            self.mode,
            self.talk_group,
            self.transmitting
        );
    }
}
