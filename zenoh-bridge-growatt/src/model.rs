//! Growatt register-map families.

use crate::registry::FieldDef;

/// Word-swap threshold for energy accumulator fields.
///
/// Energy counters (0.1 kWh units) move slowly from zero, so a freshly
/// commissioned inverter reporting more than a million raw units almost
/// certainly has the firmware word-swap bug rather than 100 MWh on the
/// clock.
pub const ENERGY_SWAP_THRESHOLD: u64 = 1_000_000;

/// A family of Growatt models sharing one register layout style.
///
/// Families differ materially in where their registers live (0-based,
/// 3000-based, or 1000-based storage blocks) and in how the composite
/// `InverterStatus` word is rendered. A model belongs to exactly one
/// family; the registry maps exact model identifiers onto plans tagged
/// with their family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// MIN TL-X / TL-XH single-phase hybrids (3000-based maps).
    MinTlxh,
    /// MOD TL3-XH three-phase battery-ready hybrids (3000-based maps).
    ModTl3Xh,
    /// TL3-X / MID / MAC / MIC grid-tie string inverters (0-based maps).
    Tl3x,
    /// MAX commercial string inverters (0-based maps plus string monitor).
    Max,
    /// SPH / MIX storage hybrids (0-based plus 1000-based storage block).
    StorageSph,
    /// SPA AC-coupled storage units (1000/2000-based maps).
    StorageSpa,
    /// Standalone smart meters (Eastron / Chint, IEEE-754 registers).
    Meter,
}

impl ModelFamily {
    /// Battery-capable families report a composite status word: low byte is
    /// machine status, high byte is run mode. Plain grid-tie inverters and
    /// meters use the whole word as a single state code.
    pub fn is_hybrid(&self) -> bool {
        matches!(
            self,
            ModelFamily::MinTlxh
                | ModelFamily::ModTl3Xh
                | ModelFamily::StorageSph
                | ModelFamily::StorageSpa
        )
    }

    /// Implausibility threshold for the 32-bit word-order heuristic.
    ///
    /// Canonical word order is high-word-first, but several firmware
    /// revisions ship low-word-first without documentation. A combined
    /// value above this threshold is treated as swapped. Values that
    /// legitimately exceed the threshold (very long `WorkTimeTotal`, for
    /// instance) will decode wrong; that is a known limitation of the
    /// heuristic, inherited from the field-observed firmware behavior.
    pub fn swap_threshold(&self) -> u64 {
        match self {
            ModelFamily::Tl3x | ModelFamily::Max | ModelFamily::Meter => 10_000_000,
            _ => 100_000_000,
        }
    }

    /// Threshold applied to a specific field: energy accumulators get the
    /// tighter [`ENERGY_SWAP_THRESHOLD`].
    pub fn swap_threshold_for(&self, field: &FieldDef) -> u64 {
        if field.is_energy_accumulator() {
            ENERGY_SWAP_THRESHOLD
        } else {
            self.swap_threshold()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DType, field};

    #[test]
    fn test_hybrid_families() {
        assert!(ModelFamily::MinTlxh.is_hybrid());
        assert!(ModelFamily::StorageSpa.is_hybrid());
        assert!(!ModelFamily::Tl3x.is_hybrid());
        assert!(!ModelFamily::Meter.is_hybrid());
    }

    #[test]
    fn test_accumulator_threshold_is_tighter() {
        let energy = field("Eac_Total", 55, 2, 10.0, DType::U32);
        let power = field("Pac", 35, 2, 10.0, DType::U32);

        assert_eq!(
            ModelFamily::MinTlxh.swap_threshold_for(&energy),
            ENERGY_SWAP_THRESHOLD
        );
        assert_eq!(
            ModelFamily::MinTlxh.swap_threshold_for(&power),
            100_000_000
        );
        assert_eq!(ModelFamily::Tl3x.swap_threshold_for(&power), 10_000_000);
    }
}
