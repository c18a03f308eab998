//! Named register map
//!
//! Every register address, control word and bit mask the control core
//! writes is defined here once. The sequencer consumes these tables; the
//! unit tests at the bottom pin the values down independently of the
//! control flow that uses them.

use crate::types::{Band, Bandwidth, OperatingMode};

/// A single 16-bit register write on the RF chip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegWrite {
    /// Register address
    pub reg: u8,
    /// Value written
    pub value: u16,
}

impl RegWrite {
    /// Create a register write
    #[must_use]
    pub const fn new(reg: u8, value: u16) -> Self {
        Self { reg, value }
    }
}

/// RF transceiver (AT1846S) registers
pub mod rf {
    /// Frequency mode select
    pub const FREQ_MODE: u8 = 0x05;
    /// Channel filter bandwidth
    pub const FILTER_BW: u8 = 0x15;
    /// RSSI (high byte) and noise (low byte) readback
    pub const SIGNAL_NOISE: u8 = 0x1B;
    /// Synthesizer word, high 16 bits
    pub const FREQ_HIGH: u8 = 0x29;
    /// Synthesizer word, low 16 bits
    pub const FREQ_LOW: u8 = 0x2A;
    /// Main control: RX/TX enable, bandwidth, squelch
    pub const CONTROL: u8 = 0x30;
    /// Audio path select
    pub const AUDIO_PATH: u8 = 0x3A;
    /// Modulation source
    pub const MOD_SOURCE: u8 = 0x40;
    /// Internal volume and gain
    pub const VOLUME: u8 = 0x44;
    /// Squelch open/shut threshold
    pub const SQUELCH_THRESHOLD: u8 = 0x49;
    /// CTCSS tone frequency (0.01 Hz units)
    pub const CTCSS_FREQ: u8 = 0x4A;
    /// CTCSS/CDCSS control
    pub const CTCSS_CONTROL: u8 = 0x4E;
    /// Filter and de-emphasis options
    pub const FILTER_OPTIONS: u8 = 0x58;

    /// Control word with the receiver held off during tuning
    pub const CONTROL_RX_OFF: u16 = 0x4006;
    /// Control word with the receiver running
    pub const CONTROL_RX_ON: u16 = 0x4026;
    /// Squelch enable bit in the control word
    pub const CONTROL_SQUELCH: u16 = 0x0008;
    /// Bandwidth bits in the control word
    pub const CONTROL_BW_MASK: u16 = 0x3000;

    /// Normal (non-scan) frequency mode
    pub const FREQ_MODE_NORMAL: u16 = 0x8763;
    /// Squelch open/shut threshold used on every channel
    pub const SQUELCH_THRESHOLD_VALUE: u16 = 0x0C15;

    /// Mask kept when switching the RX/TX path bits of the control word
    pub const PATH_KEEP: u16 = 0xFF1F;
    /// Path bits: receiver enabled
    pub const PATH_RX: u16 = 0x0020;
    /// Path bits: analog transmit
    pub const PATH_TX_ANALOG: u16 = 0x0040;
    /// Path bits: digital transmit (TX enable plus external modulation)
    pub const PATH_TX_DIGITAL: u16 = 0x00C0;

    /// Filter setting for 25 kHz channels
    pub const FILTER_BW_25K: u16 = 0x1F00;
    /// Filter setting for 12.5 kHz channels
    pub const FILTER_BW_12K5: u16 = 0x1100;

    /// CTCSS control with tone transmit enabled
    pub const CTCSS_ENABLED: u16 = 0x2682;
    /// CTCSS control with tone transmit disabled
    pub const CTCSS_DISABLED: u16 = 0x2082;
}

/// Digital modem (HR-C6000) registers
pub mod modem {
    /// Register page holding the modulation and colour code registers
    pub const CONFIG_PAGE: u8 = 0x04;
    /// Modulation DAC shift
    pub const DAC_SHIFT: u8 = 0x37;
    /// Second modulation offset
    pub const MOD2_OFFSET: u8 = 0x04;
    /// Phase reduction
    pub const PHASE_REDUCE: u8 = 0x46;
    /// Two-point modulation, low 8 bits
    pub const TWO_POINT_LOW: u8 = 0x47;
    /// Two-point modulation, high 2 bits
    pub const TWO_POINT_HIGH: u8 = 0x48;
    /// Colour code (upper nibble)
    pub const COLOUR_CODE: u8 = 0x1F;
}

/// Mode profile for analog FM
pub const PROFILE_ANALOG: &[RegWrite] = &[
    RegWrite::new(rf::AUDIO_PATH, 0x44CB),
    RegWrite::new(rf::FILTER_OPTIONS, 0xBC05),
    RegWrite::new(rf::VOLUME, 0x0680),
    RegWrite::new(rf::MOD_SOURCE, 0x0030),
];

/// Mode profile for DMR
pub const PROFILE_DIGITAL: &[RegWrite] = &[
    RegWrite::new(rf::AUDIO_PATH, 0x4003),
    RegWrite::new(rf::FILTER_OPTIONS, 0xBCFD),
    RegWrite::new(rf::VOLUME, 0x06CC),
    RegWrite::new(rf::MOD_SOURCE, 0x0031),
];

/// Silent profile: digital setup with the internal volume at zero
pub const PROFILE_SILENT: &[RegWrite] = &[
    RegWrite::new(rf::AUDIO_PATH, 0x4003),
    RegWrite::new(rf::FILTER_OPTIONS, 0xBCFD),
    RegWrite::new(rf::VOLUME, 0x0600),
    RegWrite::new(rf::MOD_SOURCE, 0x0031),
];

/// Register writes selecting a mode on the RF chip
#[must_use]
pub const fn mode_profile(mode: OperatingMode) -> &'static [RegWrite] {
    match mode {
        OperatingMode::None => PROFILE_SILENT,
        OperatingMode::Analog => PROFILE_ANALOG,
        OperatingMode::Digital => PROFILE_DIGITAL,
    }
}

/// Channel filter value for a bandwidth
#[must_use]
pub const fn filter_value(bandwidth: Bandwidth) -> u16 {
    match bandwidth {
        Bandwidth::Wide25k => rf::FILTER_BW_25K,
        Bandwidth::Narrow12k5 => rf::FILTER_BW_12K5,
    }
}

/// Bandwidth bits of the control word
#[must_use]
pub const fn bandwidth_bits(bandwidth: Bandwidth) -> u16 {
    match bandwidth {
        Bandwidth::Wide25k => rf::CONTROL_BW_MASK,
        Bandwidth::Narrow12k5 => 0,
    }
}

/// Squelch bits of the control word
#[must_use]
pub const fn squelch_bits(mode: OperatingMode, open_squelch: bool) -> u16 {
    if matches!(mode, OperatingMode::Analog) && !open_squelch {
        rf::CONTROL_SQUELCH
    } else {
        0
    }
}

/// Path bits for transmit in a given mode
#[must_use]
pub const fn tx_path_bits(mode: OperatingMode) -> u16 {
    if mode.is_digital() {
        rf::PATH_TX_DIGITAL
    } else {
        rf::PATH_TX_ANALOG
    }
}

/// Calibration band offset for VHF
pub const VHF_BAND_OFFSET: u8 = 0x70;

/// Calibration band offset for UHF
pub const UHF_BAND_OFFSET: u8 = 0x00;

/// VHF calibration segment thresholds (internal units)
pub const VHF_SEGMENT_THRESHOLDS: [u32; 7] = [
    1_360_000, 1_400_000, 1_450_000, 1_500_000, 1_550_000, 1_600_000, 1_650_000,
];

/// UHF calibration segment thresholds (internal units)
pub const UHF_SEGMENT_THRESHOLDS: [u32; 7] = [
    4_050_000, 4_150_000, 4_250_000, 4_350_000, 4_450_000, 4_550_000, 4_650_000,
];

/// Calibration band offset, None outside both bands
#[must_use]
pub const fn band_offset(band: Band) -> Option<u8> {
    match band {
        Band::Vhf => Some(VHF_BAND_OFFSET),
        Band::Uhf => Some(UHF_BAND_OFFSET),
        Band::Unsupported => None,
    }
}

/// Segment thresholds for a band, None outside both bands
#[must_use]
pub const fn segment_thresholds(band: Band) -> Option<&'static [u32; 7]> {
    match band {
        Band::Vhf => Some(&VHF_SEGMENT_THRESHOLDS),
        Band::Uhf => Some(&UHF_SEGMENT_THRESHOLDS),
        Band::Unsupported => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuning_control_words() {
        assert_eq!(rf::CONTROL_RX_OFF, 0x4006);
        assert_eq!(rf::CONTROL_RX_ON, 0x4026);
        assert_eq!(rf::CONTROL_RX_ON & !rf::CONTROL_RX_OFF, rf::PATH_RX);
        assert_eq!(rf::FREQ_MODE_NORMAL, 0x8763);
        assert_eq!(rf::SQUELCH_THRESHOLD_VALUE, 0x0C15);
    }

    #[test]
    fn path_bits_fit_the_keep_mask() {
        for bits in [rf::PATH_RX, rf::PATH_TX_ANALOG, rf::PATH_TX_DIGITAL] {
            assert_eq!(bits & rf::PATH_KEEP, 0);
        }
    }

    #[test]
    fn squelch_only_in_analog_without_override() {
        assert_eq!(squelch_bits(OperatingMode::Analog, false), 0x08);
        assert_eq!(squelch_bits(OperatingMode::Analog, true), 0);
        assert_eq!(squelch_bits(OperatingMode::Digital, false), 0);
        assert_eq!(squelch_bits(OperatingMode::None, false), 0);
    }

    #[test]
    fn bandwidth_bits_inside_mask() {
        assert_eq!(bandwidth_bits(Bandwidth::Wide25k), rf::CONTROL_BW_MASK);
        assert_eq!(bandwidth_bits(Bandwidth::Narrow12k5), 0);
        assert_eq!(rf::CONTROL_BW_MASK & rf::PATH_KEEP, rf::CONTROL_BW_MASK);
    }

    #[test]
    fn profiles_share_registers() {
        let regs = |p: &[RegWrite]| p.iter().map(|w| w.reg).collect::<heapless::Vec<u8, 8>>();
        assert_eq!(regs(PROFILE_ANALOG), regs(PROFILE_DIGITAL));
        assert_eq!(regs(PROFILE_SILENT), regs(PROFILE_DIGITAL));
    }

    #[test]
    fn silent_profile_mutes_volume() {
        let volume = PROFILE_SILENT.iter().find(|w| w.reg == rf::VOLUME);
        assert_eq!(volume.map(|w| w.value), Some(0x0600));
    }

    #[test]
    fn thresholds_strictly_increase_inside_band() {
        for (thresholds, band) in [
            (VHF_SEGMENT_THRESHOLDS, Band::Vhf),
            (UHF_SEGMENT_THRESHOLDS, Band::Uhf),
        ] {
            assert!(thresholds.windows(2).all(|w| w[0] < w[1]));
            assert!(thresholds.iter().all(|&t| Band::classify(t) == band));
        }
    }

    #[test]
    fn band_offsets() {
        assert_eq!(band_offset(Band::Vhf), Some(0x70));
        assert_eq!(band_offset(Band::Uhf), Some(0x00));
        assert_eq!(band_offset(Band::Unsupported), None);
    }
}
