//! Recording fakes for the hardware seams
//!
//! Every fake shares one [`Hw`] handle, so a test sees a single ordered
//! trace of RF writes, modem writes, GPIO changes, DAC writes and audio
//! hook calls.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use trx_firmware::config::NonVolatileSettings;
use trx_firmware::error::{BusError, BusResult};
use trx_firmware::radio::bus::{AudioHooks, Board, Line, ModemBus, RfBus};
use trx_firmware::radio::calibration::CalibrationTable;
use trx_firmware::radio::Transceiver;

/// Audio hook call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audio {
    InitAnalog,
    TeardownAnalog,
    InitDigital,
    TeardownDigital,
}

/// One observed hardware interaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    RfWrite(u8, u16),
    RfRead(u8),
    ModemWrite(u8, u8, u8),
    Line(Line, bool),
    PaPower(u16),
    Audio(Audio),
}

#[derive(Default)]
struct HwState {
    events: Vec<Event>,
    registers: HashMap<u8, u16>,
    failing_rf_writes: HashMap<u8, BusError>,
    failing_rf_reads: HashSet<u8>,
    modem_failure: Option<BusError>,
    lines: HashMap<Line, bool>,
    pa_power: u16,
}

/// Shared handle onto the fake hardware
#[derive(Clone, Default)]
pub struct Hw(Rc<RefCell<HwState>>);

impl Hw {
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }

    pub fn bus_traffic(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::RfWrite(..) | Event::RfRead(_) | Event::ModemWrite(..)))
            .count()
    }

    pub fn rf_writes(&self) -> Vec<(u8, u16)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::RfWrite(reg, value) => Some((reg, value)),
                _ => None,
            })
            .collect()
    }

    pub fn modem_writes(&self) -> Vec<(u8, u8, u8)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::ModemWrite(page, reg, value) => Some((page, reg, value)),
                _ => None,
            })
            .collect()
    }

    pub fn audio_calls(&self) -> Vec<Audio> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Audio(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    /// Index of the first event matching `pred`
    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events().iter().position(pred)
    }

    pub fn line(&self, line: Line) -> bool {
        self.0.borrow().lines.get(&line).copied().unwrap_or(false)
    }

    pub fn pa_power(&self) -> u16 {
        self.0.borrow().pa_power
    }

    pub fn register(&self, reg: u8) -> u16 {
        self.0.borrow().registers.get(&reg).copied().unwrap_or(0)
    }

    pub fn set_register(&self, reg: u8, value: u16) {
        self.0.borrow_mut().registers.insert(reg, value);
    }

    pub fn fail_rf_write(&self, reg: u8, cause: BusError) {
        self.0.borrow_mut().failing_rf_writes.insert(reg, cause);
    }

    pub fn fail_rf_read(&self, reg: u8) {
        self.0.borrow_mut().failing_rf_reads.insert(reg);
    }

    pub fn fail_modem(&self, cause: BusError) {
        self.0.borrow_mut().modem_failure = Some(cause);
    }

    pub fn heal(&self) {
        let mut hw = self.0.borrow_mut();
        hw.failing_rf_writes.clear();
        hw.failing_rf_reads.clear();
        hw.modem_failure = None;
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }
}

pub struct FakeRf(pub Hw);

impl RfBus for FakeRf {
    fn write_reg(&mut self, reg: u8, value: u16) -> BusResult<()> {
        if let Some(&cause) = self.0 .0.borrow().failing_rf_writes.get(&reg) {
            return Err(cause);
        }
        self.0.set_register(reg, value);
        self.0.push(Event::RfWrite(reg, value));
        Ok(())
    }

    fn read_reg(&mut self, reg: u8) -> BusResult<u16> {
        if self.0 .0.borrow().failing_rf_reads.contains(&reg) {
            return Err(BusError::Timeout);
        }
        self.0.push(Event::RfRead(reg));
        Ok(self.0.register(reg))
    }
}

pub struct FakeModem(pub Hw);

impl ModemBus for FakeModem {
    fn write_page_reg(&mut self, page: u8, reg: u8, value: u8) -> BusResult<()> {
        if let Some(cause) = self.0 .0.borrow().modem_failure {
            return Err(cause);
        }
        self.0.push(Event::ModemWrite(page, reg, value));
        Ok(())
    }
}

pub struct FakeBoard(pub Hw);

impl Board for FakeBoard {
    fn set_line(&mut self, line: Line, high: bool) {
        self.0 .0.borrow_mut().lines.insert(line, high);
        self.0.push(Event::Line(line, high));
    }

    fn set_pa_power(&mut self, value: u16) {
        self.0 .0.borrow_mut().pa_power = value;
        self.0.push(Event::PaPower(value));
    }
}

pub struct FakeAudio(pub Hw);

impl AudioHooks for FakeAudio {
    fn init_analog(&mut self) {
        self.0.push(Event::Audio(Audio::InitAnalog));
    }

    fn teardown_analog(&mut self) {
        self.0.push(Event::Audio(Audio::TeardownAnalog));
    }

    fn init_digital(&mut self) {
        self.0.push(Event::Audio(Audio::InitDigital));
    }

    fn teardown_digital(&mut self) {
        self.0.push(Event::Audio(Audio::TeardownDigital));
    }
}

pub type TestTrx =
    Transceiver<FakeRf, FakeModem, FakeBoard, FakeAudio, NonVolatileSettings, CalibrationTable>;

/// Transceiver in the boot state with nominal calibration, no hardware touched
pub fn transceiver() -> (TestTrx, Hw) {
    transceiver_with(NonVolatileSettings::default(), CalibrationTable::default())
}

pub fn transceiver_with(settings: NonVolatileSettings, table: CalibrationTable) -> (TestTrx, Hw) {
    let hw = Hw::default();
    let trx = Transceiver::new(
        FakeRf(hw.clone()),
        FakeModem(hw.clone()),
        FakeBoard(hw.clone()),
        FakeAudio(hw.clone()),
        settings,
        table,
    );
    (trx, hw)
}

/// Booted transceiver in the given mode, trace cleared
pub fn booted(mode: trx_firmware::types::OperatingMode) -> (TestTrx, Hw) {
    let (mut trx, hw) = transceiver();
    trx.boot().unwrap();
    trx.set_mode(mode).unwrap();
    hw.clear();
    (trx, hw)
}
