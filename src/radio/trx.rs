//! Transceiver state machine
//!
//! [`Transceiver`] is the single owner of the radio's tunable state and of
//! the buses that program it. Setters compare against the stored state,
//! drive the sequencer and switch controller, and commit the new value only
//! once the hardware accepted it. A failed call leaves the previous value in
//! place, so repeating it re-issues the full sequence.

use crate::config::{SettingsStore, DMR_ADDRESS_MAX};
use crate::error::{Argument, Error, Operation, TrxResult};
use crate::types::{
    Band, Bandwidth, ColourCode, CtcssTone, Frequency, OperatingMode, SquelchState, TxPower,
};

use super::bus::{AudioHooks, Board, Line, ModemBus, RfBus};
use super::calibration::{self, CalibrationSource};
use super::sequencer::{self, StepLog};
use super::squelch::{SquelchMonitor, SquelchTick};
use super::state::{TrxSnapshot, TrxState};
use super::switch;

/// Transceiver control engine
pub struct Transceiver<R, M, B, A, S, C> {
    pub(super) rf: R,
    pub(super) modem: M,
    pub(super) board: B,
    pub(super) audio: A,
    pub(super) settings: S,
    pub(super) calibration: C,
    pub(super) state: TrxState,
    pub(super) squelch: SquelchMonitor,
}

impl<R, M, B, A, S, C> Transceiver<R, M, B, A, S, C>
where
    R: RfBus,
    M: ModemBus,
    B: Board,
    A: AudioHooks,
    S: SettingsStore,
    C: CalibrationSource,
{
    /// Create a transceiver in the boot state
    ///
    /// No hardware is touched until [`boot`](Self::boot).
    #[must_use]
    pub fn new(rf: R, modem: M, board: B, audio: A, settings: S, calibration: C) -> Self {
        Self {
            rf,
            modem,
            board,
            audio,
            settings,
            calibration,
            state: TrxState::new(),
            squelch: SquelchMonitor::new(),
        }
    }

    /// Bring the hardware in line with the boot state and enter receive
    ///
    /// # Errors
    ///
    /// Any bus failure is returned as [`Error::Boot`]. The radio is not
    /// usable afterwards.
    pub fn boot(&mut self) -> TrxResult<()> {
        info!("trx boot");
        self.resync()
            .and_then(|()| self.enter_receive())
            .map_err(|err| match err.bus_cause() {
                Some(cause) => Error::Boot(cause),
                None => err,
            })
    }

    /// Get operating mode
    #[must_use]
    pub const fn mode(&self) -> OperatingMode {
        self.state.mode()
    }

    /// Get current frequency
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.state.frequency()
    }

    /// Get amplifier band of the current frequency
    #[must_use]
    pub const fn band(&self) -> Band {
        self.state.band()
    }

    /// Get channel bandwidth
    #[must_use]
    pub const fn bandwidth(&self) -> Bandwidth {
        self.state.bandwidth()
    }

    /// Get DMR colour code
    #[must_use]
    pub const fn colour_code(&self) -> ColourCode {
        self.state.colour_code()
    }

    /// Get transmit CTCSS tone, None when disabled
    #[must_use]
    pub const fn tx_ctcss(&self) -> Option<CtcssTone> {
        self.state.ctcss()
    }

    /// Check if the squelch override is active
    #[must_use]
    pub const fn open_squelch(&self) -> bool {
        self.state.open_squelch()
    }

    /// Check if the transmit path is active
    #[must_use]
    pub const fn is_transmitting(&self) -> bool {
        self.state.is_transmitting()
    }

    /// Get DMR talk group
    #[must_use]
    pub const fn talk_group(&self) -> u32 {
        self.state.talk_group()
    }

    /// Get DMR ID
    #[must_use]
    pub const fn dmr_id(&self) -> u32 {
        self.state.dmr_id()
    }

    /// Get speaker gate state
    #[must_use]
    pub const fn squelch_state(&self) -> SquelchState {
        self.squelch.state()
    }

    /// Get transmit power
    #[must_use]
    pub fn tx_power(&self) -> TxPower {
        self.settings.tx_power()
    }

    /// Get the settings store
    #[must_use]
    pub const fn settings(&self) -> &S {
        &self.settings
    }

    /// Get the settings store mutably
    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    /// Value copy of the state for the modem tick task
    #[must_use]
    pub const fn snapshot(&self) -> TrxSnapshot {
        self.state.snapshot()
    }

    /// Select an operating mode
    ///
    /// Entering Digital forces 12.5 kHz bandwidth. Audio routing changes
    /// only after the chip accepted the mode profile. While transmitting,
    /// the transmit path is re-selected for the new mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for mode None while transmitting.
    /// Returns the sequence report if any chip write failed; mode, bandwidth
    /// and audio routing are then left unchanged.
    pub fn set_mode(&mut self, mode: OperatingMode) -> TrxResult<()> {
        if mode == self.state.mode() {
            return Ok(());
        }
        if mode == OperatingMode::None && self.state.is_transmitting() {
            return Err(Error::InvalidArgument(Argument::Mode(mode)));
        }

        let mut log = StepLog::new(Operation::ModeSelect);
        sequencer::select_mode(&mut self.rf, mode, &mut log);
        let mut next = self.state.with_mode(mode);
        if mode.is_digital() && next.bandwidth() != Bandwidth::Narrow12k5 {
            sequencer::set_bandwidth(&mut self.rf, Bandwidth::Narrow12k5, &mut log);
            next = next.with_bandwidth(Bandwidth::Narrow12k5);
        }
        if next.is_transmitting() {
            sequencer::select_transmit(&mut self.rf, mode, &mut log);
        }
        log.finish()?;

        self.state = next;
        self.route_audio(mode);
        if next.is_transmitting() {
            self.board.set_line(Line::TxAudioMux, mode.is_digital());
        }
        info!("mode -> {}", mode);
        Ok(())
    }

    /// Tune to a frequency
    ///
    /// Applies modem calibration for the new band segment (when enabled),
    /// reprograms the synthesizer and switches the amplifiers to the new
    /// band. While transmitting, the chip's transmit path is re-selected
    /// after the tune and the TX amplifier follows the band.
    ///
    /// # Errors
    ///
    /// Returns the sequence report if the calibration or tuning writes
    /// failed; the stored frequency is then unchanged. Returns
    /// [`Error::UncalibratedBand`] after a successful tune outside both
    /// calibrated bands while calibration is enabled.
    pub fn set_frequency(&mut self, frequency: Frequency) -> TrxResult<()> {
        if frequency == self.state.frequency() {
            return Ok(());
        }

        let uncalibrated = if self.settings.use_calibration() {
            match self.calibrate(frequency) {
                Ok(()) => false,
                Err(Error::UncalibratedBand(_)) => true,
                Err(err) => return Err(err),
            }
        } else {
            false
        };

        let next = self.state.with_frequency(frequency);
        let mut log = StepLog::new(Operation::Tune);
        sequencer::tune(
            &mut self.rf,
            frequency.synth_word(),
            next.control_bits(),
            &mut log,
        );
        // Tuning leaves the chip receiving
        if next.is_transmitting() {
            sequencer::select_transmit(&mut self.rf, next.mode(), &mut log);
        }
        log.finish()?;

        self.state = next;
        self.select_amps();
        debug!("tuned {}", frequency.units());

        if uncalibrated {
            warn!("no calibration for {}", frequency.units());
            return Err(Error::UncalibratedBand(frequency.units()));
        }
        Ok(())
    }

    /// Select a mode, then tune
    ///
    /// # Errors
    ///
    /// Stops at the first failing step; see [`set_mode`](Self::set_mode)
    /// and [`set_frequency`](Self::set_frequency).
    pub fn set_frequency_and_mode(
        &mut self,
        frequency: Frequency,
        mode: OperatingMode,
    ) -> TrxResult<()> {
        self.set_mode(mode)?;
        self.set_frequency(frequency)
    }

    /// Set channel bandwidth
    ///
    /// A 25 kHz request in Digital mode is coerced to 12.5 kHz.
    ///
    /// # Errors
    ///
    /// Returns the sequence report if the chip writes failed.
    pub fn set_bandwidth(&mut self, bandwidth: Bandwidth) -> TrxResult<()> {
        let bandwidth = if self.state.mode().is_digital() && bandwidth.is_25khz() {
            warn!("25k not available in DMR, using 12.5k");
            Bandwidth::Narrow12k5
        } else {
            bandwidth
        };
        if bandwidth == self.state.bandwidth() {
            return Ok(());
        }

        let mut log = StepLog::new(Operation::Bandwidth);
        sequencer::set_bandwidth(&mut self.rf, bandwidth, &mut log);
        log.finish()?;

        self.state = self.state.with_bandwidth(bandwidth);
        Ok(())
    }

    /// Write the DMR colour code (always issued)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] above 15, or the sequence report
    /// if the modem write failed.
    pub fn set_colour_code(&mut self, cc: u8) -> TrxResult<()> {
        let cc = ColourCode::new(cc).ok_or(Error::InvalidArgument(Argument::ColourCode(cc)))?;

        let mut log = StepLog::new(Operation::ColourCode);
        sequencer::set_colour_code(&mut self.modem, cc, &mut log);
        log.finish()?;

        self.state = self.state.with_colour_code(cc);
        Ok(())
    }

    /// Store a new transmit power
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for values of 4096 and above; the
    /// stored power is unchanged.
    pub fn set_tx_power(&mut self, value: u16) -> TrxResult<()> {
        let power = TxPower::new(value).ok_or(Error::InvalidArgument(Argument::TxPower(value)))?;
        self.settings.set_tx_power(power);
        Ok(())
    }

    /// Program the transmit CTCSS tone (always issued)
    ///
    /// `tone_x10` is the tone frequency times ten; `0xFFFF` disables the
    /// tone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the tone does not fit the
    /// register, or the sequence report if the chip writes failed.
    pub fn set_tx_ctcss(&mut self, tone_x10: u16) -> TrxResult<()> {
        let tone = if tone_x10 == CtcssTone::NONE_SENTINEL {
            None
        } else {
            Some(
                CtcssTone::from_x10(tone_x10)
                    .ok_or(Error::InvalidArgument(Argument::CtcssTone(tone_x10)))?,
            )
        };

        let mut log = StepLog::new(Operation::Ctcss);
        sequencer::set_ctcss(&mut self.rf, tone, &mut log);
        log.finish()?;

        self.state = self.state.with_ctcss(tone);
        Ok(())
    }

    /// Re-apply modem calibration for the current frequency
    ///
    /// Does nothing while calibration is disabled in the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UncalibratedBand`] outside both bands, or the
    /// sequence report if a modem write failed.
    pub fn update_calibration(&mut self) -> TrxResult<()> {
        if !self.settings.use_calibration() {
            return Ok(());
        }
        self.calibrate(self.state.frequency())
    }

    /// Force the squelch open regardless of the noise reading
    ///
    /// Takes effect on the next tune and the next squelch sample.
    pub fn set_open_squelch(&mut self, open: bool) {
        self.state = self.state.with_open_squelch(open);
    }

    /// Set the DMR talk group
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for values wider than 24 bits.
    pub fn set_talk_group(&mut self, talk_group: u32) -> TrxResult<()> {
        if talk_group > DMR_ADDRESS_MAX {
            return Err(Error::InvalidArgument(Argument::TalkGroup(talk_group)));
        }
        self.state = self.state.with_talk_group(talk_group);
        Ok(())
    }

    /// Set the DMR ID
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for values wider than 24 bits.
    pub fn set_dmr_id(&mut self, dmr_id: u32) -> TrxResult<()> {
        if dmr_id > DMR_ADDRESS_MAX {
            return Err(Error::InvalidArgument(Argument::DmrId(dmr_id)));
        }
        self.state = self.state.with_dmr_id(dmr_id);
        Ok(())
    }

    /// Re-issue the whole stored state to the hardware
    ///
    /// Ignores change detection. Used at boot and to recover after a
    /// reported bus failure.
    ///
    /// # Errors
    ///
    /// Returns the sequence report if any chip write failed.
    pub fn resync(&mut self) -> TrxResult<()> {
        let state = self.state;

        let mut log = StepLog::new(Operation::Resync);
        sequencer::select_mode(&mut self.rf, state.mode(), &mut log);
        sequencer::set_bandwidth(&mut self.rf, state.bandwidth(), &mut log);
        sequencer::tune(
            &mut self.rf,
            state.frequency().synth_word(),
            state.control_bits(),
            &mut log,
        );
        if state.is_transmitting() {
            sequencer::select_transmit(&mut self.rf, state.mode(), &mut log);
        }
        sequencer::set_ctcss(&mut self.rf, state.ctcss(), &mut log);
        sequencer::set_colour_code(&mut self.modem, state.colour_code(), &mut log);
        log.finish()?;

        if self.settings.use_calibration() {
            match self.calibrate(state.frequency()) {
                Err(Error::UncalibratedBand(units)) => warn!("resync without calibration at {}", units),
                other => other?,
            }
        }

        self.route_audio(state.mode());
        self.select_amps();
        info!("resync done");
        Ok(())
    }

    /// Advance the squelch monitor by one tick
    ///
    /// Every sampling tick drives the speaker enable line from the new gate
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the noise read failed; the gate is left as
    /// it was.
    pub fn tick_squelch(&mut self) -> TrxResult<SquelchState> {
        let band = self.state.band();
        let open = self.state.open_squelch();
        let rf = &mut self.rf;
        let tick = self.squelch.tick(band, open, || {
            sequencer::read_signal_noise(rf).map(|(_signal, noise)| noise)
        })?;

        if let SquelchTick::Sampled(gate) = tick {
            self.board.set_line(Line::SpeakerEnable, gate.is_open());
        }
        Ok(self.squelch.state())
    }

    fn calibrate(&mut self, frequency: Frequency) -> TrxResult<()> {
        let key = calibration::key_for(frequency.units())?;
        let values = self.calibration.lookup(key);

        let mut log = StepLog::new(Operation::Calibration);
        sequencer::apply_calibration(&mut self.modem, &values, &mut log);
        log.finish()
    }

    fn route_audio(&mut self, mode: OperatingMode) {
        match mode {
            OperatingMode::Analog => {
                self.board.set_line(Line::RxAudioMux, true);
                self.audio.teardown_digital();
                self.audio.init_analog();
            }
            OperatingMode::Digital => {
                self.board.set_line(Line::RxAudioMux, false);
                self.audio.teardown_analog();
                self.audio.init_digital();
            }
            OperatingMode::None => {
                self.board.set_line(Line::SpeakerEnable, false);
                self.board.set_line(Line::RxAudioMux, false);
                self.audio.teardown_analog();
                self.audio.teardown_digital();
            }
        }
    }

    fn select_amps(&mut self) {
        let band = self.state.band();
        if self.state.is_transmitting() {
            switch::select_tx_amps(&mut self.board, band);
        } else {
            switch::select_rx_amps(&mut self.board, band);
        }
    }
}
