//! Calibration Tests
//!
//! Segment classification and the modem calibration writes issued on
//! frequency changes.

mod common;

use proptest::prelude::*;

use trx_firmware::config::NonVolatileSettings;
use trx_firmware::error::{BusError, Error, Operation};
use trx_firmware::radio::calibration::{
    calibration_segment, key_for, BandCalibration, CalibrationTable,
};
use trx_firmware::radio::regmap::{UHF_SEGMENT_THRESHOLDS, VHF_SEGMENT_THRESHOLDS};
use trx_firmware::types::{Band, Frequency, OperatingMode, TxPower};

use common::{transceiver, transceiver_with};

// =============================================================================
// Segment Classification
// =============================================================================

#[test]
fn test_scenario_145_05_mhz() {
    let freq = Frequency::new(1_450_500).unwrap();
    assert_eq!(freq.band(), Band::Vhf);
    // 1,450,000 is the third VHF threshold, so 145.05 MHz is past it
    assert_eq!(calibration_segment(freq.units()), Some(3));

    let key = key_for(freq.units()).unwrap();
    assert_eq!(key.band_offset, 0x70);
    assert_eq!(key.segment, 3);
    assert_eq!(freq.synth_word(), 2_320_800);
}

#[test]
fn test_segment_steps_exactly_at_thresholds() {
    for thresholds in [VHF_SEGMENT_THRESHOLDS, UHF_SEGMENT_THRESHOLDS] {
        for (i, &t) in thresholds.iter().enumerate() {
            let i = u8::try_from(i).unwrap();
            assert_eq!(calibration_segment(t - 1), Some(i));
            assert_eq!(calibration_segment(t), Some(i + 1));
        }
    }
}

#[test]
fn test_uhf_key() {
    let key = key_for(4_300_000).unwrap();
    assert_eq!(key.band_offset, 0x00);
    assert_eq!(key.segment, 3);
}

#[test]
fn test_unsupported_band_has_no_key() {
    assert_eq!(key_for(1_740_000), Err(Error::UncalibratedBand(1_740_000)));
    assert_eq!(key_for(5_200_000), Err(Error::UncalibratedBand(5_200_000)));
}

proptest! {
    #[test]
    fn vhf_segment_monotonic(a in 1_340_000u32..1_740_000, b in 1_340_000u32..1_740_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let seg_lo = calibration_segment(lo).unwrap();
        let seg_hi = calibration_segment(hi).unwrap();
        prop_assert!(seg_lo <= seg_hi);
        prop_assert!(seg_hi <= 7);
    }

    #[test]
    fn uhf_segment_in_range(units in 4_000_000u32..5_200_000) {
        let seg = calibration_segment(units).unwrap();
        prop_assert!(seg <= 7);
        let expected = UHF_SEGMENT_THRESHOLDS.iter().filter(|&&t| t <= units).count();
        prop_assert_eq!(usize::from(seg), expected);
    }

    #[test]
    fn segment_only_inside_bands(units in any::<u32>()) {
        prop_assert_eq!(
            calibration_segment(units).is_some(),
            Band::classify(units).is_supported()
        );
    }
}

// =============================================================================
// Calibration Writes
// =============================================================================

fn vhf_table() -> CalibrationTable {
    let mut vhf = BandCalibration::NOMINAL;
    vhf.dac_shift = 0x0A;
    vhf.mod2_offset = 0x21;
    vhf.phase_reduce = [0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17];
    vhf.two_point_mod = 0x02C4;
    CalibrationTable::new(BandCalibration::NOMINAL, vhf)
}

#[test]
fn test_frequency_change_writes_calibration_in_order() {
    let (mut trx, hw) = transceiver_with(NonVolatileSettings::default(), vhf_table());
    trx.boot().unwrap();
    hw.clear();

    trx.set_frequency(Frequency::new(1_450_500).unwrap()).unwrap();

    assert_eq!(
        hw.modem_writes(),
        vec![
            (0x04, 0x37, 0x0A),
            (0x04, 0x04, 0x21),
            (0x04, 0x46, 0x13),
            (0x04, 0x47, 0xC4),
            (0x04, 0x48, 0x02),
        ]
    );
}

#[test]
fn test_calibration_precedes_tuning() {
    let (mut trx, hw) = transceiver();
    trx.boot().unwrap();
    hw.clear();

    trx.set_frequency(Frequency::new(4_300_000).unwrap()).unwrap();

    let last_modem = hw
        .events()
        .iter()
        .rposition(|e| matches!(e, common::Event::ModemWrite(..)))
        .unwrap();
    let first_rf = hw
        .position(|e| matches!(e, common::Event::RfWrite(..)))
        .unwrap();
    assert!(last_modem < first_rf);
}

#[test]
fn test_calibration_disabled_issues_no_modem_writes() {
    let settings = NonVolatileSettings::new(TxPower::DEFAULT, false);
    let (mut trx, hw) = transceiver_with(settings, CalibrationTable::default());
    trx.boot().unwrap();
    hw.clear();

    trx.set_frequency(Frequency::new(4_300_000).unwrap()).unwrap();
    assert!(hw.modem_writes().is_empty());

    trx.update_calibration().unwrap();
    assert!(hw.modem_writes().is_empty());
}

#[test]
fn test_unsupported_band_tunes_then_reports() {
    let (mut trx, hw) = transceiver();
    trx.boot().unwrap();
    hw.clear();

    let top = Frequency::new(1_740_000).unwrap();
    assert_eq!(trx.set_frequency(top), Err(Error::UncalibratedBand(1_740_000)));

    // Tuned and committed, no calibration issued
    assert_eq!(trx.frequency(), top);
    assert!(hw.modem_writes().is_empty());
    assert!(hw.rf_writes().contains(&(0x2A, (top.synth_word() & 0xFFFF) as u16)));
}

#[test]
fn test_update_calibration_reapplies_current_segment() {
    let (mut trx, hw) = transceiver_with(NonVolatileSettings::default(), vhf_table());
    trx.boot().unwrap();
    hw.clear();

    trx.update_calibration().unwrap();
    // 144.0 MHz is VHF segment 2
    assert!(hw.modem_writes().contains(&(0x04, 0x46, 0x12)));
    assert_eq!(hw.modem_writes().len(), 5);
}

#[test]
fn test_calibration_failure_keeps_frequency() {
    let (mut trx, hw) = transceiver();
    trx.boot().unwrap();
    hw.clear();
    hw.fail_modem(BusError::Nack);

    let before = trx.frequency();
    let err = trx.set_frequency(Frequency::new(1_460_000).unwrap()).unwrap_err();
    match err {
        Error::Sequence(report) => {
            assert_eq!(report.operation, Operation::Calibration);
            assert_eq!(report.attempted, 5);
            assert_eq!(report.succeeded, 0);
            assert_eq!(report.first_cause(), Some(BusError::Nack));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(trx.frequency(), before);
    assert!(hw.rf_writes().is_empty());
}

#[test]
fn test_calibration_mode_independent() {
    let (mut trx, hw) = common::booted(OperatingMode::Digital);
    trx.set_frequency(Frequency::new(4_700_000).unwrap()).unwrap();
    assert_eq!(hw.modem_writes().len(), 5);
}
