//! Squelch Tests
//!
//! Sampling cadence, threshold decision and speaker gating.

mod common;

use trx_firmware::config::SQUELCH_SAMPLE_TICKS;
use trx_firmware::error::{BusError, Error};
use trx_firmware::radio::bus::Line;
use trx_firmware::radio::squelch::{evaluate, SquelchMonitor, SquelchTick};
use trx_firmware::types::{Band, OperatingMode, SquelchState};

use common::{booted, Event, Hw, TestTrx};

fn set_noise(hw: &Hw, signal: u8, noise: u8) {
    hw.set_register(0x1B, (u16::from(signal) << 8) | u16::from(noise));
}

fn run_ticks(trx: &mut TestTrx, n: u8) -> SquelchState {
    let mut state = trx.squelch_state();
    for _ in 0..n {
        state = trx.tick_squelch().unwrap();
    }
    state
}

fn noise_reads(hw: &Hw) -> usize {
    hw.events()
        .iter()
        .filter(|e| **e == Event::RfRead(0x1B))
        .count()
}

// =============================================================================
// Decision
// =============================================================================

#[test]
fn test_evaluate_threshold() {
    assert_eq!(evaluate(30, Band::Vhf, false), SquelchState::Open);
    assert_eq!(evaluate(44, Band::Uhf, false), SquelchState::Open);
    assert_eq!(evaluate(45, Band::Vhf, false), SquelchState::Closed);
    assert_eq!(evaluate(200, Band::Uhf, false), SquelchState::Closed);
}

#[test]
fn test_evaluate_open_squelch_overrides_noise() {
    assert_eq!(evaluate(255, Band::Vhf, true), SquelchState::Open);
}

#[test]
fn test_monitor_counts_to_sample() {
    let mut monitor = SquelchMonitor::new();
    for i in 1..SQUELCH_SAMPLE_TICKS {
        assert_eq!(monitor.tick(Band::Vhf, false, || Ok(0)), Ok(SquelchTick::Idle));
        assert_eq!(monitor.counter(), i);
    }
    assert_eq!(
        monitor.tick(Band::Vhf, false, || Ok(0)),
        Ok(SquelchTick::Sampled(SquelchState::Open))
    );
    assert_eq!(monitor.counter(), 0);
    assert_eq!(monitor.state(), SquelchState::Open);
}

// =============================================================================
// Transceiver Gating
// =============================================================================

#[test]
fn test_weak_noise_opens_on_fiftieth_tick() {
    let (mut trx, hw) = booted(OperatingMode::Analog);
    set_noise(&hw, 0x80, 30);

    assert_eq!(run_ticks(&mut trx, SQUELCH_SAMPLE_TICKS - 1), SquelchState::Closed);
    assert_eq!(noise_reads(&hw), 0);
    assert!(!hw.line(Line::SpeakerEnable));

    assert_eq!(trx.tick_squelch(), Ok(SquelchState::Open));
    assert_eq!(noise_reads(&hw), 1);
    assert!(hw.line(Line::SpeakerEnable));
}

#[test]
fn test_strong_noise_keeps_gate_closed() {
    let (mut trx, hw) = booted(OperatingMode::Analog);
    set_noise(&hw, 0x10, 120);

    assert_eq!(run_ticks(&mut trx, SQUELCH_SAMPLE_TICKS), SquelchState::Closed);
    assert_eq!(hw.events().last(), Some(&Event::Line(Line::SpeakerEnable, false)));
}

#[test]
fn test_gate_closes_when_noise_rises() {
    let (mut trx, hw) = booted(OperatingMode::Analog);
    set_noise(&hw, 0x80, 10);
    assert_eq!(run_ticks(&mut trx, SQUELCH_SAMPLE_TICKS), SquelchState::Open);

    set_noise(&hw, 0x80, 90);
    assert_eq!(run_ticks(&mut trx, SQUELCH_SAMPLE_TICKS), SquelchState::Closed);
    assert!(!hw.line(Line::SpeakerEnable));
    assert_eq!(noise_reads(&hw), 2);
}

#[test]
fn test_open_squelch_forces_gate_open() {
    let (mut trx, hw) = booted(OperatingMode::Analog);
    trx.set_open_squelch(true);
    set_noise(&hw, 0x00, 255);

    assert_eq!(run_ticks(&mut trx, SQUELCH_SAMPLE_TICKS), SquelchState::Open);
    assert!(hw.line(Line::SpeakerEnable));
}

#[test]
fn test_read_failure_resets_counter() {
    let (mut trx, hw) = booted(OperatingMode::Analog);
    set_noise(&hw, 0x80, 10);
    hw.fail_rf_read(0x1B);

    run_ticks(&mut trx, SQUELCH_SAMPLE_TICKS - 1);
    assert_eq!(trx.tick_squelch(), Err(Error::Bus(BusError::Timeout)));
    assert_eq!(trx.squelch_state(), SquelchState::Closed);

    // Next sample is a full period away
    hw.heal();
    assert_eq!(run_ticks(&mut trx, SQUELCH_SAMPLE_TICKS - 1), SquelchState::Closed);
    assert_eq!(noise_reads(&hw), 0);
    assert_eq!(trx.tick_squelch(), Ok(SquelchState::Open));
}
