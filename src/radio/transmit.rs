//! Transmit/receive path switching
//!
//! Ordering constraints on the board:
//! - entering receive zeroes the PA DAC before the antenna leaves transmit
//! - entering transmit points the antenna at the PA before the DAC is
//!   restored, and the DAC write is always the last step
//!
//! Receive is the safe state, so [`enter_receive`](Transceiver::enter_receive)
//! attempts every step and reports what failed afterwards, while
//! [`enter_transmit`](Transceiver::enter_transmit) aborts on the first chip
//! failure with the PA still unpowered. If the radio was already
//! transmitting, that abort tears the PA chain down and falls back to
//! receive.

use crate::config::SettingsStore;
use crate::error::{Argument, Error, Operation, TrxResult};
use crate::types::{OperatingMode, TxRxState};

use super::bus::{AudioHooks, Board, Line, ModemBus, RfBus};
use super::calibration::CalibrationSource;
use super::sequencer::{self, StepLog};
use super::switch;
use super::trx::Transceiver;

impl<R, M, B, A, S, C> Transceiver<R, M, B, A, S, C>
where
    R: RfBus,
    M: ModemBus,
    B: Board,
    A: AudioHooks,
    S: SettingsStore,
    C: CalibrationSource,
{
    /// Switch the radio to receive
    ///
    /// The board is always left in receive (PA off, antenna on the
    /// receiver, TX amps off) and the direction is recorded as receive
    /// even if a chip write failed.
    ///
    /// # Errors
    ///
    /// Returns the sequence report naming every failed chip write.
    pub fn enter_receive(&mut self) -> TrxResult<()> {
        let mode = self.state.mode();
        let band = self.state.band();
        let mut log = StepLog::new(Operation::EnterReceive);

        sequencer::select_mode(&mut self.rf, mode, &mut log);
        self.board.set_line(Line::TxAudioMux, false);

        self.release_transmit_chain();

        sequencer::select_receive(&mut self.rf, &mut log);
        switch::select_rx_amps(&mut self.board, band);

        self.state = self.state.with_txrx(TxRxState::Rx);
        debug!("rx path, {} chip steps", log.attempted());
        log.finish()
    }

    /// Switch the radio to transmit
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] in mode None or when the current
    /// frequency has no PA chain. Returns the sequence report if a chip
    /// write failed; the TX amps, antenna and PA DAC are then untouched and
    /// the radio stays in receive. When already transmitting, a failed
    /// repeat releases the PA chain and leaves the radio in receive.
    pub fn enter_transmit(&mut self) -> TrxResult<()> {
        let mode = self.state.mode();
        if mode == OperatingMode::None {
            return Err(Error::InvalidArgument(Argument::Mode(mode)));
        }
        let band = self.state.band();
        if !band.is_supported() {
            return Err(Error::InvalidArgument(Argument::Frequency(
                self.state.frequency().units(),
            )));
        }

        let was_transmitting = self.state.is_transmitting();
        let mut log = StepLog::new(Operation::EnterTransmit);
        sequencer::select_mode(&mut self.rf, mode, &mut log);
        log.checkpoint()?;

        self.board.set_line(Line::TxAudioMux, mode.is_digital());
        switch::release_rx_amps(&mut self.board);

        sequencer::select_transmit(&mut self.rf, mode, &mut log);
        if let Err(err) = log.checkpoint() {
            error!("tx switch failed, falling back to rx");
            self.board.set_line(Line::TxAudioMux, false);
            if was_transmitting {
                // PA chain is live from the previous key-up
                self.release_transmit_chain();
                self.state = self.state.with_txrx(TxRxState::Rx);
            }
            switch::select_rx_amps(&mut self.board, band);
            return Err(err);
        }

        switch::select_tx_amps(&mut self.board, band);
        switch::set_antenna_tx(&mut self.board, true);
        self.board.set_pa_power(self.settings.tx_power().dac_value());

        self.state = self.state.with_txrx(TxRxState::Tx);
        debug!("tx path");
        Ok(())
    }

    /// PA off, antenna to the receiver, then both TX amps off
    fn release_transmit_chain(&mut self) {
        self.board.set_pa_power(0);
        switch::set_antenna_tx(&mut self.board, false);
        switch::release_tx_amps(&mut self.board);
    }
}
