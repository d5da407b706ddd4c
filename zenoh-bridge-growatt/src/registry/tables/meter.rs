//! Standalone smart meters. Both report IEEE-754 floats in engineering
//! units (scale 1) and expose no settings surface.

use crate::model::ModelFamily;
use crate::registry::{BlockDef, DType::*, FieldDef, ModelPlan, RegisterClass, field};

/// Eastron SDM630, 0-based float registers.
pub static EASTRON_PLAN: ModelPlan = ModelPlan {
    family: ModelFamily::Meter,
    telemetry: &[
        BlockDef {
            base: 0,
            len: 80,
            class: RegisterClass::Input,
            fields: EASTRON_MAIN,
        },
        BlockDef {
            base: 342,
            len: 2,
            class: RegisterClass::Input,
            fields: EASTRON_ENERGY,
        },
    ],
    settings: &[],
};

const EASTRON_MAIN: &[FieldDef] = &[
    field("Voltage_L1", 0, 2, 1.0, F32),
    field("Voltage_L2", 2, 2, 1.0, F32),
    field("Voltage_L3", 4, 2, 1.0, F32),
    field("Current_L1", 6, 2, 1.0, F32),
    field("Current_L2", 8, 2, 1.0, F32),
    field("Current_L3", 10, 2, 1.0, F32),
    field("Power_L1", 12, 2, 1.0, F32),
    field("Power_L2", 14, 2, 1.0, F32),
    field("Power_L3", 16, 2, 1.0, F32),
    field("ApparentPower_L1", 18, 2, 1.0, F32),
    field("ApparentPower_L2", 20, 2, 1.0, F32),
    field("ApparentPower_L3", 22, 2, 1.0, F32),
    field("ReactivePower_L1", 24, 2, 1.0, F32),
    field("ReactivePower_L2", 26, 2, 1.0, F32),
    field("ReactivePower_L3", 28, 2, 1.0, F32),
    field("PowerFactor_L1", 30, 2, 1.0, F32),
    field("PowerFactor_L2", 32, 2, 1.0, F32),
    field("PowerFactor_L3", 34, 2, 1.0, F32),
    field("TotalActivePower", 52, 2, 1.0, F32),
    field("TotalApparentPower", 56, 2, 1.0, F32),
    field("TotalReactivePower", 60, 2, 1.0, F32),
    field("TotalPowerFactor", 62, 2, 1.0, F32),
    field("Frequency", 70, 2, 1.0, F32),
    field("ImportActiveEnergy", 72, 2, 1.0, F32),
    field("ExportActiveEnergy", 74, 2, 1.0, F32),
];

const EASTRON_ENERGY: &[FieldDef] = &[field("TotalActiveEnergy", 0, 2, 1.0, F32)];

/// Chint DDSU666, float registers based at 0x2000 and 0x4000.
pub static CHINT_PLAN: ModelPlan = ModelPlan {
    family: ModelFamily::Meter,
    telemetry: &[
        BlockDef {
            base: 8192,
            len: 40,
            class: RegisterClass::Input,
            fields: CHINT_MAIN,
        },
        BlockDef {
            base: 16384,
            len: 12,
            class: RegisterClass::Input,
            fields: CHINT_ENERGY,
        },
    ],
    settings: &[],
};

const CHINT_MAIN: &[FieldDef] = &[
    field("Voltage_L1", 0, 2, 1.0, F32),
    field("Voltage_L2", 2, 2, 1.0, F32),
    field("Voltage_L3", 4, 2, 1.0, F32),
    field("Current_L1", 10, 2, 1.0, F32),
    field("Current_L2", 12, 2, 1.0, F32),
    field("Current_L3", 14, 2, 1.0, F32),
    field("TotalActivePower", 20, 2, 1.0, F32),
    field("Power_L1", 22, 2, 1.0, F32),
    field("Power_L2", 24, 2, 1.0, F32),
    field("Power_L3", 26, 2, 1.0, F32),
    field("TotalReactivePower", 28, 2, 1.0, F32),
    field("TotalPowerFactor", 36, 2, 1.0, F32),
    field("Frequency", 38, 2, 1.0, F32),
];

const CHINT_ENERGY: &[FieldDef] = &[
    field("ImportActiveEnergy", 0, 2, 1.0, F32),
    field("ExportActiveEnergy", 10, 2, 1.0, F32),
];
