//! Radio Control Logic
//!
//! The transceiver control core: owned state, register sequencing,
//! calibration, amplifier switching and squelch. Everything here is
//! hardware-independent and talks to the chips through the traits in
//! [`bus`].

pub mod bus;
pub mod calibration;
pub mod regmap;
pub mod sequencer;
pub mod squelch;
pub mod state;
pub mod switch;
pub mod transmit;
pub mod trx;

pub use bus::{AudioHooks, Board, Line, ModemBus, RfBus};
pub use calibration::{CalibrationSource, CalibrationTable};
pub use state::{TrxSnapshot, TrxState};
pub use trx::Transceiver;
