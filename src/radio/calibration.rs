//! Band-aware modem calibration
//!
//! The modem's modulation registers need per-band correction, with the
//! phase correction further split into eight frequency segments per band.

use crate::error::{Error, TrxResult};
use crate::types::Band;

use super::regmap;

/// Number of calibration segments per band
pub const SEGMENTS_PER_BAND: u8 = 8;

/// Calibration segment (0-7) for a frequency, None outside both bands
///
/// The segment is the number of band thresholds at or below `units`.
#[must_use]
pub fn calibration_segment(units: u32) -> Option<u8> {
    let thresholds = regmap::segment_thresholds(Band::classify(units))?;
    let below = thresholds.iter().take_while(|&&t| t <= units).count();
    u8::try_from(below).ok()
}

/// Lookup key into the calibration data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalibrationKey {
    /// Band offset (VHF 0x70, UHF 0x00)
    pub band_offset: u8,
    /// Segment within the band (0-7)
    pub segment: u8,
}

impl CalibrationKey {
    /// Band the key belongs to
    #[must_use]
    pub const fn band(self) -> Band {
        if self.band_offset == regmap::VHF_BAND_OFFSET {
            Band::Vhf
        } else {
            Band::Uhf
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CalibrationKey {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Cal(0x{=u8:02X}+{})", self.band_offset, self.segment);
    }
}

/// Calibration key for a frequency
///
/// # Errors
///
/// Returns [`Error::UncalibratedBand`] outside VHF and UHF.
pub fn key_for(units: u32) -> TrxResult<CalibrationKey> {
    let band_offset =
        regmap::band_offset(Band::classify(units)).ok_or(Error::UncalibratedBand(units))?;
    let segment = calibration_segment(units).ok_or(Error::UncalibratedBand(units))?;
    Ok(CalibrationKey {
        band_offset,
        segment,
    })
}

/// Register values produced by a calibration lookup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CalibrationValues {
    /// Modulation DAC shift
    pub dac_shift: u8,
    /// Second modulation offset
    pub mod2_offset: u8,
    /// Phase reduction for the segment
    pub phase_reduce: u8,
    /// Two-point modulation (10 bits)
    pub two_point_mod: u16,
}

impl CalibrationValues {
    /// Two-point modulation low 8 bits
    #[must_use]
    pub const fn two_point_low(&self) -> u8 {
        (self.two_point_mod & 0xFF) as u8
    }

    /// Two-point modulation high 2 bits
    #[must_use]
    pub const fn two_point_high(&self) -> u8 {
        ((self.two_point_mod >> 8) & 0x03) as u8
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CalibrationValues {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "dac={} mod2={} phase={} 2pt={}",
            self.dac_shift,
            self.mod2_offset,
            self.phase_reduce,
            self.two_point_mod
        );
    }
}

/// Source of factory calibration data
pub trait CalibrationSource {
    /// DAC shift for a band
    fn dac_shift(&self, band: Band) -> u8;

    /// MOD2 offset for a band
    fn mod2_offset(&self, band: Band) -> u8;

    /// Phase reduction for a band segment
    fn phase_reduce(&self, key: CalibrationKey) -> u8;

    /// Two-point modulation for a band (10 bits)
    fn two_point_mod(&self, band: Band) -> u16;

    /// All calibration values for a key
    fn lookup(&self, key: CalibrationKey) -> CalibrationValues {
        let band = key.band();
        CalibrationValues {
            dac_shift: self.dac_shift(band),
            mod2_offset: self.mod2_offset(band),
            phase_reduce: self.phase_reduce(key),
            two_point_mod: self.two_point_mod(band),
        }
    }
}

/// Calibration record for one band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandCalibration {
    /// Modulation DAC shift
    pub dac_shift: u8,
    /// Second modulation offset
    pub mod2_offset: u8,
    /// Phase reduction per segment
    pub phase_reduce: [u8; SEGMENTS_PER_BAND as usize],
    /// Two-point modulation (10 bits)
    pub two_point_mod: u16,
}

impl BandCalibration {
    /// Nominal values for an uncalibrated radio
    pub const NOMINAL: Self = Self {
        dac_shift: 0x0C,
        mod2_offset: 0x28,
        phase_reduce: [0x8B; SEGMENTS_PER_BAND as usize],
        two_point_mod: 0x0200,
    };
}

impl Default for BandCalibration {
    fn default() -> Self {
        Self::NOMINAL
    }
}

/// Per-band calibration table loaded from the factory calibration block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CalibrationTable {
    /// UHF record
    pub uhf: BandCalibration,
    /// VHF record
    pub vhf: BandCalibration,
}

impl CalibrationTable {
    /// Create a table from per-band records
    #[must_use]
    pub const fn new(uhf: BandCalibration, vhf: BandCalibration) -> Self {
        Self { uhf, vhf }
    }

    fn band(&self, band: Band) -> &BandCalibration {
        match band {
            Band::Vhf => &self.vhf,
            Band::Uhf | Band::Unsupported => &self.uhf,
        }
    }
}

impl CalibrationSource for CalibrationTable {
    fn dac_shift(&self, band: Band) -> u8 {
        self.band(band).dac_shift
    }

    fn mod2_offset(&self, band: Band) -> u8 {
        self.band(band).mod2_offset
    }

    fn phase_reduce(&self, key: CalibrationKey) -> u8 {
        let segment = usize::from(key.segment.min(SEGMENTS_PER_BAND - 1));
        self.band(key.band()).phase_reduce[segment]
    }

    fn two_point_mod(&self, band: Band) -> u16 {
        self.band(band).two_point_mod & 0x03FF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_boundaries_vhf() {
        assert_eq!(calibration_segment(1_340_000), Some(0));
        assert_eq!(calibration_segment(1_359_999), Some(0));
        assert_eq!(calibration_segment(1_360_000), Some(1));
        assert_eq!(calibration_segment(1_449_999), Some(2));
        assert_eq!(calibration_segment(1_450_500), Some(3));
        assert_eq!(calibration_segment(1_650_000), Some(7));
        assert_eq!(calibration_segment(1_739_999), Some(7));
    }

    #[test]
    fn segment_boundaries_uhf() {
        assert_eq!(calibration_segment(4_000_000), Some(0));
        assert_eq!(calibration_segment(4_050_000), Some(1));
        assert_eq!(calibration_segment(4_649_999), Some(6));
        assert_eq!(calibration_segment(5_199_999), Some(7));
    }

    #[test]
    fn no_segment_outside_bands() {
        assert_eq!(calibration_segment(1_740_000), None);
        assert_eq!(calibration_segment(2_000_000), None);
        assert_eq!(calibration_segment(5_200_000), None);
    }

    #[test]
    fn key_for_unsupported_reports_frequency() {
        assert_eq!(key_for(3_000_000), Err(Error::UncalibratedBand(3_000_000)));
    }

    #[test]
    fn key_band_round_trip() {
        let vhf = key_for(1_450_500).ok();
        assert_eq!(vhf.map(CalibrationKey::band), Some(Band::Vhf));
        let uhf = key_for(4_300_000).ok();
        assert_eq!(uhf.map(CalibrationKey::band), Some(Band::Uhf));
    }

    #[test]
    fn two_point_split() {
        let values = CalibrationValues {
            two_point_mod: 0x02AB,
            ..CalibrationValues::default()
        };
        assert_eq!(values.two_point_low(), 0xAB);
        assert_eq!(values.two_point_high(), 0x02);
    }

    #[test]
    fn table_selects_band_record() {
        let mut vhf = BandCalibration::NOMINAL;
        vhf.dac_shift = 0x11;
        vhf.phase_reduce[2] = 0x42;
        let table = CalibrationTable::new(BandCalibration::NOMINAL, vhf);
        let key = CalibrationKey {
            band_offset: regmap::VHF_BAND_OFFSET,
            segment: 2,
        };
        let values = table.lookup(key);
        assert_eq!(values.dac_shift, 0x11);
        assert_eq!(values.phase_reduce, 0x42);
        assert_eq!(table.dac_shift(Band::Uhf), BandCalibration::NOMINAL.dac_shift);
    }
}
