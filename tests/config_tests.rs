//! Configuration Tests
//!
//! Sanity checks on compile-time constants and the settings store.

use trx_firmware::config::{self, NonVolatileSettings, SettingsStore};
use trx_firmware::types::{Band, Frequency, TxPower};

#[test]
fn test_amplifier_windows_inside_operating_bounds() {
    assert!(config::RADIO_VHF_MIN >= config::BAND_VHF_MIN);
    assert!(config::RADIO_VHF_MAX <= config::BAND_VHF_MAX);
    assert!(config::RADIO_UHF_MIN >= config::BAND_UHF_MIN);
    assert!(config::RADIO_UHF_MAX <= config::BAND_UHF_MAX);
    assert!(config::BAND_VHF_MAX < config::BAND_UHF_MIN);
}

#[test]
fn test_default_frequency_is_vhf() {
    let freq = Frequency::new(config::DEFAULT_FREQUENCY).unwrap();
    assert_eq!(freq.band(), Band::Vhf);
    assert_eq!(freq.as_hz(), 144_000_000);
}

#[test]
fn test_squelch_cadence() {
    assert_eq!(config::SQUELCH_SAMPLE_TICKS, 50);
    assert_eq!(config::SQUELCH_NOISE_THRESHOLD, 45);
}

#[test]
fn test_default_tx_power_in_dac_range() {
    assert!(TxPower::new(config::DEFAULT_TX_POWER).is_some());
}

#[test]
fn test_dmr_defaults() {
    assert_eq!(config::DEFAULT_TALK_GROUP, 9);
    assert_eq!(config::DEFAULT_DMR_ID, 0);
    assert_eq!(config::DMR_ADDRESS_MAX, 0xFF_FFFF);
}

#[test]
fn test_settings_store() {
    let mut settings = NonVolatileSettings::default();
    assert_eq!(settings.tx_power(), TxPower::DEFAULT);
    assert!(settings.use_calibration());

    let power = TxPower::new(1_000).unwrap();
    settings.set_tx_power(power);
    assert_eq!(settings.tx_power(), power);
}

#[test]
fn test_settings_without_calibration() {
    let settings = NonVolatileSettings::new(TxPower::OFF, false);
    assert!(!settings.use_calibration());
    assert_eq!(settings.tx_power().dac_value(), 0);
}
