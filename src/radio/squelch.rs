//! Squelch monitor
//!
//! Samples the RF chip's noise reading once every
//! [`SQUELCH_SAMPLE_TICKS`](crate::config::SQUELCH_SAMPLE_TICKS) ticks and
//! gates the speaker on the result.

use crate::config::SQUELCH_SAMPLE_TICKS;
use crate::error::BusResult;
use crate::types::{Band, SquelchState};

/// Squelch gate decision for one noise sample
#[must_use]
pub const fn evaluate(noise: u8, band: Band, open_squelch: bool) -> SquelchState {
    if open_squelch || noise < band.squelch_threshold() {
        SquelchState::Open
    } else {
        SquelchState::Closed
    }
}

/// Result of a squelch tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquelchTick {
    /// Not a sampling tick
    Idle,
    /// Sample taken, gate set to this state
    Sampled(SquelchState),
}

/// Tick-driven squelch monitor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SquelchMonitor {
    counter: u8,
    state: SquelchState,
}

impl SquelchMonitor {
    /// Create a monitor with the gate closed
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: 0,
            state: SquelchState::Closed,
        }
    }

    /// Get the current gate state
    #[must_use]
    pub const fn state(&self) -> SquelchState {
        self.state
    }

    /// Get ticks counted since the last sample
    #[must_use]
    pub const fn counter(&self) -> u8 {
        self.counter
    }

    /// Advance one tick
    ///
    /// On every sampling tick `read_noise` is called and the counter is
    /// reset, whether or not the read succeeds.
    ///
    /// # Errors
    ///
    /// Returns the bus error from a failed read; the gate keeps its state.
    pub fn tick<F>(&mut self, band: Band, open_squelch: bool, read_noise: F) -> BusResult<SquelchTick>
    where
        F: FnOnce() -> BusResult<u8>,
    {
        self.counter += 1;
        if self.counter < SQUELCH_SAMPLE_TICKS {
            return Ok(SquelchTick::Idle);
        }
        self.counter = 0;

        let noise = read_noise()?;
        self.state = evaluate(noise, band, open_squelch);
        Ok(SquelchTick::Sampled(self.state))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SquelchMonitor {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Squelch({}, {})", self.state, self.counter);
    }
}
