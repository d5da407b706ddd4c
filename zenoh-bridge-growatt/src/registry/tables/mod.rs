//! Built-in register maps, one module per model family.
//!
//! Offsets inside each block are relative to the block base. Sources are
//! the Growatt Modbus protocol documents (V1.05 for the 0-based grid-tie
//! maps, V1.24 for the 3000-based TL-XH/TL3-XH maps) cross-checked
//! against field captures. Several model identifiers alias the same plan
//! when Growatt reuses a layout across product lines.

pub mod max;
pub mod meter;
pub mod min_tlxh;
pub mod mod_tl3_xh;
pub mod spa;
pub mod sph;
pub mod tl3x;

use super::ModelPlan;

/// Catalogue of supported models, keyed by the exact identifier used in
/// device configuration.
pub static BUILTIN_MODELS: &[(&str, &ModelPlan)] = &[
    ("min-tlx", &min_tlxh::PLAN),
    ("min-tlxh", &min_tlxh::PLAN),
    ("mod-tl3-xh", &mod_tl3_xh::PLAN),
    ("tl3-x", &tl3x::PLAN),
    ("mid", &tl3x::PLAN),
    ("mac", &tl3x::PLAN),
    ("mic", &tl3x::PLAN),
    ("max", &max::PLAN),
    ("sph", &sph::PLAN),
    ("mix", &sph::PLAN),
    ("spa", &spa::PLAN),
    ("sdm630", &meter::EASTRON_PLAN),
    ("ddsu666", &meter::CHINT_PLAN),
];
