//! RF register sequencer
//!
//! Issues the ordered register sequences for each chip operation. Every step
//! goes through a [`StepLog`], which records which steps landed so a partial
//! failure can be reported precisely. Sequences attempt every step unless
//! the caller checkpoints the log between stages.

use heapless::Vec;

use crate::error::{
    BusError, BusResult, Operation, SequenceFailure, TrxResult, MAX_REPORTED_FAILURES,
};
use crate::types::{Bandwidth, ColourCode, CtcssTone, OperatingMode};

use super::bus::{ModemBus, RfBus};
use super::calibration::CalibrationValues;
use super::regmap::{self, modem as page4, rf as reg};

/// Per-step result log for one multi-step operation
#[derive(Clone, Debug)]
pub struct StepLog {
    operation: Operation,
    step: u8,
    succeeded: u32,
    failures: Vec<(u8, BusError), MAX_REPORTED_FAILURES>,
}

impl StepLog {
    /// Start a log for an operation
    #[must_use]
    pub const fn new(operation: Operation) -> Self {
        Self {
            operation,
            step: 0,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    /// Record the result of the next step, returns true if it succeeded
    pub fn record(&mut self, result: BusResult<()>) -> bool {
        let index = self.step;
        self.step = self.step.saturating_add(1);
        match result {
            Ok(()) => {
                if index < 32 {
                    self.succeeded |= 1 << index;
                }
                true
            }
            Err(cause) => {
                warn!("step {} failed", index);
                // Report keeps the earliest failures once full
                let _ = self.failures.push((index, cause));
                false
            }
        }
    }

    /// Number of steps recorded so far
    #[must_use]
    pub const fn attempted(&self) -> u8 {
        self.step
    }

    /// Check if every recorded step succeeded
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fail fast if any step so far has failed
    ///
    /// # Errors
    ///
    /// Returns the sequence report when a recorded step failed.
    pub fn checkpoint(&self) -> TrxResult<()> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(self.report().into())
        }
    }

    /// Close the log
    ///
    /// # Errors
    ///
    /// Returns the sequence report when any step failed.
    pub fn finish(self) -> TrxResult<()> {
        self.checkpoint()
    }

    fn report(&self) -> SequenceFailure {
        SequenceFailure {
            operation: self.operation,
            attempted: self.step,
            succeeded: self.succeeded,
            failures: self.failures.clone(),
        }
    }
}

/// Write the mode profile registers
pub fn select_mode<R: RfBus>(rf: &mut R, mode: OperatingMode, log: &mut StepLog) {
    for write in regmap::mode_profile(mode) {
        log.record(rf.write_reg(write.reg, write.value));
    }
}

/// Tune the synthesizer
///
/// `control_bits` are OR-ed into both control words so the tuning sequence
/// keeps the channel's bandwidth and squelch settings.
pub fn tune<R: RfBus>(rf: &mut R, word: u32, control_bits: u16, log: &mut StepLog) {
    let high = (word >> 16) as u16;
    let low = (word & 0xFFFF) as u16;

    log.record(rf.write_reg(reg::CONTROL, reg::CONTROL_RX_OFF | control_bits));
    log.record(rf.write_reg(reg::FREQ_MODE, reg::FREQ_MODE_NORMAL));
    log.record(rf.write_reg(reg::FREQ_HIGH, high));
    log.record(rf.write_reg(reg::FREQ_LOW, low));
    log.record(rf.write_reg(reg::SQUELCH_THRESHOLD, reg::SQUELCH_THRESHOLD_VALUE));
    log.record(rf.write_reg(reg::CONTROL, reg::CONTROL_RX_ON | control_bits));
}

/// Program the channel filter and control word bandwidth bits
pub fn set_bandwidth<R: RfBus>(rf: &mut R, bandwidth: Bandwidth, log: &mut StepLog) {
    log.record(rf.write_reg(reg::FILTER_BW, regmap::filter_value(bandwidth)));
    log.record(rf.modify_reg(
        reg::CONTROL,
        !reg::CONTROL_BW_MASK,
        regmap::bandwidth_bits(bandwidth),
    ));
}

/// Program or disable the transmit CTCSS tone
pub fn set_ctcss<R: RfBus>(rf: &mut R, tone: Option<CtcssTone>, log: &mut StepLog) {
    match tone {
        Some(tone) => {
            log.record(rf.write_reg(reg::CTCSS_FREQ, tone.register_value()));
            log.record(rf.write_reg(reg::CTCSS_CONTROL, reg::CTCSS_ENABLED));
        }
        None => {
            log.record(rf.write_reg(reg::CTCSS_FREQ, 0));
            log.record(rf.write_reg(reg::CTCSS_CONTROL, reg::CTCSS_DISABLED));
        }
    }
}

/// Write modem calibration, two-point low byte before the high bits
pub fn apply_calibration<M: ModemBus>(modem: &mut M, values: &CalibrationValues, log: &mut StepLog) {
    let page = page4::CONFIG_PAGE;
    log.record(modem.write_page_reg(page, page4::DAC_SHIFT, values.dac_shift));
    log.record(modem.write_page_reg(page, page4::MOD2_OFFSET, values.mod2_offset));
    log.record(modem.write_page_reg(page, page4::PHASE_REDUCE, values.phase_reduce));
    log.record(modem.write_page_reg(page, page4::TWO_POINT_LOW, values.two_point_low()));
    log.record(modem.write_page_reg(page, page4::TWO_POINT_HIGH, values.two_point_high()));
}

/// Write the DMR colour code
pub fn set_colour_code<M: ModemBus>(modem: &mut M, cc: ColourCode, log: &mut StepLog) {
    log.record(modem.write_page_reg(
        page4::CONFIG_PAGE,
        page4::COLOUR_CODE,
        cc.register_value(),
    ));
}

/// Switch the chip to receive: clear the path bits, then enable RX
pub fn select_receive<R: RfBus>(rf: &mut R, log: &mut StepLog) {
    log.record(rf.modify_reg(reg::CONTROL, reg::PATH_KEEP, 0));
    log.record(rf.modify_reg(reg::CONTROL, reg::PATH_KEEP, reg::PATH_RX));
}

/// Switch the chip to transmit for a mode: clear the path bits, then enable TX
pub fn select_transmit<R: RfBus>(rf: &mut R, mode: OperatingMode, log: &mut StepLog) {
    log.record(rf.modify_reg(reg::CONTROL, reg::PATH_KEEP, 0));
    log.record(rf.modify_reg(reg::CONTROL, reg::PATH_KEEP, regmap::tx_path_bits(mode)));
}

/// Read the (signal, noise) pair used by the squelch monitor
///
/// # Errors
///
/// Returns the bus error if the read fails.
pub fn read_signal_noise<R: RfBus>(rf: &mut R) -> BusResult<(u8, u8)> {
    rf.read_pair(reg::SIGNAL_NOISE)
}
