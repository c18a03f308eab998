//! Error types for the transceiver control core
//!
//! Every bus primitive returns a [`BusResult`]; multi-step operations fold
//! their per-step results into a [`SequenceFailure`] so callers can see how
//! far a sequence got before the hardware stopped answering.

use core::fmt;

use heapless::Vec;
use thiserror::Error;

use crate::types::OperatingMode;

/// Maximum number of failed steps kept in a [`SequenceFailure`] report
pub const MAX_REPORTED_FAILURES: usize = 8;

/// Single bus transaction failure
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Device did not acknowledge its address or data
    #[error("device did not acknowledge")]
    Nack,

    /// Transaction did not complete within the bus timeout
    #[error("bus transaction timed out")]
    Timeout,

    /// Lost arbitration on a multi-master bus
    #[error("bus arbitration lost")]
    Arbitration,

    /// Any other peripheral fault
    #[error("bus fault")]
    Other,
}

#[cfg(feature = "embedded")]
impl defmt::Format for BusError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Nack => defmt::write!(f, "NACK"),
            Self::Timeout => defmt::write!(f, "TIMEOUT"),
            Self::Arbitration => defmt::write!(f, "ARB-LOST"),
            Self::Other => defmt::write!(f, "BUS-FAULT"),
        }
    }
}

/// Caller input rejected before any hardware was touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// Frequency outside the operating bounds (internal units)
    Frequency(u32),
    /// Transmit power above the 12-bit DAC range
    TxPower(u16),
    /// Colour code above 15
    ColourCode(u8),
    /// CTCSS tone (x10) whose register encoding overflows
    CtcssTone(u16),
    /// Operation not available in this mode
    Mode(OperatingMode),
    /// Talk group wider than 24 bits
    TalkGroup(u32),
    /// DMR ID wider than 24 bits
    DmrId(u32),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frequency(units) => write!(f, "frequency {units} out of range"),
            Self::TxPower(value) => write!(f, "tx power {value} exceeds 4095"),
            Self::ColourCode(cc) => write!(f, "colour code {cc} exceeds 15"),
            Self::CtcssTone(tone) => write!(f, "ctcss tone {tone} not encodable"),
            Self::Mode(mode) => write!(f, "not allowed in mode {mode}"),
            Self::TalkGroup(tg) => write!(f, "talk group {tg} exceeds 24 bits"),
            Self::DmrId(id) => write!(f, "dmr id {id} exceeds 24 bits"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Argument {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Frequency(units) => defmt::write!(f, "Frequency({})", units),
            Self::TxPower(value) => defmt::write!(f, "TxPower({})", value),
            Self::ColourCode(cc) => defmt::write!(f, "ColourCode({})", cc),
            Self::CtcssTone(tone) => defmt::write!(f, "CtcssTone({})", tone),
            Self::Mode(mode) => defmt::write!(f, "Mode({})", mode),
            Self::TalkGroup(tg) => defmt::write!(f, "TalkGroup({})", tg),
            Self::DmrId(id) => defmt::write!(f, "DmrId({})", id),
        }
    }
}

/// Multi-step hardware operation, named in failure reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Mode profile register writes
    ModeSelect,
    /// Frequency tuning sequence
    Tune,
    /// Modem calibration writes
    Calibration,
    /// Bandwidth filter and control bits
    Bandwidth,
    /// Modem colour code register
    ColourCode,
    /// CTCSS tone and control registers
    Ctcss,
    /// Transmit to receive path switch
    EnterReceive,
    /// Receive to transmit path switch
    EnterTransmit,
    /// Full re-application of the stored state
    Resync,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ModeSelect => "mode select",
            Self::Tune => "tune",
            Self::Calibration => "calibration",
            Self::Bandwidth => "bandwidth",
            Self::ColourCode => "colour code",
            Self::Ctcss => "ctcss",
            Self::EnterReceive => "enter receive",
            Self::EnterTransmit => "enter transmit",
            Self::Resync => "resync",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Operation {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ModeSelect => defmt::write!(f, "mode select"),
            Self::Tune => defmt::write!(f, "tune"),
            Self::Calibration => defmt::write!(f, "calibration"),
            Self::Bandwidth => defmt::write!(f, "bandwidth"),
            Self::ColourCode => defmt::write!(f, "colour code"),
            Self::Ctcss => defmt::write!(f, "ctcss"),
            Self::EnterReceive => defmt::write!(f, "enter receive"),
            Self::EnterTransmit => defmt::write!(f, "enter transmit"),
            Self::Resync => defmt::write!(f, "resync"),
        }
    }
}

/// Report of a multi-step operation that did not fully apply
///
/// Steps are numbered from zero in issue order. `succeeded` has bit `n`
/// set when step `n` completed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{operation} failed: {} of {attempted} steps applied", .succeeded.count_ones())]
pub struct SequenceFailure {
    /// Operation that failed
    pub operation: Operation,
    /// Number of steps issued before the operation returned
    pub attempted: u8,
    /// Bitmask of steps that completed
    pub succeeded: u32,
    /// Failed step indices with their causes, in issue order
    pub failures: Vec<(u8, BusError), MAX_REPORTED_FAILURES>,
}

impl SequenceFailure {
    /// Cause of the earliest failed step
    #[must_use]
    pub fn first_cause(&self) -> Option<BusError> {
        self.failures.first().map(|&(_, cause)| cause)
    }

    /// Check if a given step completed
    #[must_use]
    pub const fn step_succeeded(&self, step: u8) -> bool {
        step < 32 && self.succeeded & (1 << step) != 0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SequenceFailure {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{} failed: {=u32:b} of {} steps, first cause {}",
            self.operation,
            self.succeeded,
            self.attempted,
            self.first_cause()
        );
    }
}

/// Top-level error for transceiver operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A single bus transaction failed
    #[error("bus error: {0}")]
    Bus(#[from] BusError),

    /// A multi-step sequence was only partially applied
    #[error("{0}")]
    Sequence(#[from] SequenceFailure),

    /// Caller input was rejected
    #[error("invalid argument: {0}")]
    InvalidArgument(Argument),

    /// Calibration requested for a frequency outside both calibrated bands
    #[error("no calibration for frequency {0}")]
    UncalibratedBand(u32),

    /// Initial hardware bring-up failed
    #[error("boot failed: {0}")]
    Boot(BusError),
}

impl Error {
    /// Underlying bus cause, if the error came from the hardware
    #[must_use]
    pub fn bus_cause(&self) -> Option<BusError> {
        match self {
            Self::Bus(cause) | Self::Boot(cause) => Some(*cause),
            Self::Sequence(report) => report.first_cause(),
            Self::InvalidArgument(_) | Self::UncalibratedBand(_) => None,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(cause) => defmt::write!(f, "Bus({})", cause),
            Self::Sequence(report) => defmt::write!(f, "Sequence({})", report),
            Self::InvalidArgument(arg) => defmt::write!(f, "InvalidArgument({})", arg),
            Self::UncalibratedBand(units) => defmt::write!(f, "UncalibratedBand({})", units),
            Self::Boot(cause) => defmt::write!(f, "Boot({})", cause),
        }
    }
}

/// Result of a single bus transaction
pub type BusResult<T> = Result<T, BusError>;

/// Result of a transceiver operation
pub type TrxResult<T> = Result<T, Error>;
