//! TL3-X / MID / MAC / MIC grid-tie string inverters, 0-based maps.
//!
//! These four product lines share the classic V1.05 layout; they differ
//! only in string count, which the shared map covers by reading registers
//! that simply stay zero on the smaller units.

use crate::model::ModelFamily;
use crate::registry::{BlockDef, DType::*, FieldDef, ModelPlan, RegisterClass, field};

pub static PLAN: ModelPlan = ModelPlan {
    family: ModelFamily::Tl3x,
    telemetry: &[
        BlockDef {
            base: 0,
            len: 125,
            class: RegisterClass::Input,
            fields: INVERTER,
        },
        BlockDef {
            base: 125,
            len: 125,
            class: RegisterClass::Input,
            fields: EXTENSION,
        },
    ],
    settings: &[
        BlockDef {
            base: 0,
            len: 125,
            class: RegisterClass::Holding,
            fields: BASE_SETTINGS,
        },
        BlockDef {
            base: 125,
            len: 125,
            class: RegisterClass::Holding,
            fields: EXT_SETTINGS,
        },
        BlockDef {
            base: 3000,
            len: 25,
            class: RegisterClass::Holding,
            fields: IDENTITY,
        },
    ],
};

/// Input 0-124: core telemetry.
const INVERTER: &[FieldDef] = &[
    field("InverterStatus", 0, 1, 1.0, U16),
    field("PpvInput", 1, 2, 10.0, U32),
    field("Vpv1", 3, 1, 10.0, U16),
    field("Ipv1", 4, 1, 10.0, U16),
    field("Ppv1", 5, 2, 10.0, U32),
    field("Vpv2", 7, 1, 10.0, U16),
    field("Ipv2", 8, 1, 10.0, U16),
    field("Ppv2", 9, 2, 10.0, U32),
    field("Vpv3", 11, 1, 10.0, U16),
    field("Ipv3", 12, 1, 10.0, U16),
    field("Ppv3", 13, 2, 10.0, U32),
    field("Vpv4", 15, 1, 10.0, U16),
    field("Ipv4", 16, 1, 10.0, U16),
    field("Ppv4", 17, 2, 10.0, U32),
    field("Pac", 35, 2, 10.0, U32),
    field("Fac", 37, 1, 100.0, U16),
    field("Vac1", 38, 1, 10.0, U16),
    field("Iac1", 39, 1, 10.0, U16),
    field("Pac1", 40, 2, 10.0, U32),
    field("Vac2", 42, 1, 10.0, U16),
    field("Iac2", 43, 1, 10.0, U16),
    field("Pac2", 44, 2, 10.0, U32),
    field("Vac3", 46, 1, 10.0, U16),
    field("Iac3", 47, 1, 10.0, U16),
    field("Pac3", 48, 2, 10.0, U32),
    field("Vac_RS", 50, 1, 10.0, U16),
    field("Vac_ST", 51, 1, 10.0, U16),
    field("Vac_TR", 52, 1, 10.0, U16),
    field("Eac_Today", 53, 2, 10.0, U32),
    field("Eac_Total", 55, 2, 10.0, U32),
    field("WorkTimeTotal", 57, 2, 2.0, U32),
    field("Epv1_Today", 59, 2, 10.0, U32),
    field("Epv1_Total", 61, 2, 10.0, U32),
    field("Epv2_Today", 63, 2, 10.0, U32),
    field("Epv2_Total", 65, 2, 10.0, U32),
    field("Epv_Total", 91, 2, 10.0, U32),
    field("TempInverter", 93, 1, 10.0, U16),
    field("TempIPM", 94, 1, 10.0, U16),
    field("TempBoost", 95, 1, 10.0, U16),
    field("VbusP", 98, 1, 10.0, U16),
    field("VbusN", 99, 1, 10.0, U16),
    field("IPF", 100, 1, 1.0, U16),
    field("RealOPPercent", 101, 1, 1.0, U16),
    field("DeratingMode", 104, 1, 1.0, U16),
    field("FaultCode", 105, 1, 1.0, U16),
    field("FaultSubCode", 107, 1, 1.0, U16),
    field("WarnBitHigh", 110, 1, 1.0, U16),
    field("WarnSubCode", 111, 1, 1.0, U16),
    field("WarnCode", 112, 1, 1.0, U16),
];

/// Input 125-249: PID module and per-string monitoring.
const EXTENSION: &[FieldDef] = &[
    field("PID_Vpv1", 0, 1, 10.0, U16),
    field("PID_Ipv1", 1, 1, 10.0, I16),
    field("PID_Status", 16, 1, 1.0, U16),
    field("V_String1", 17, 1, 10.0, U16),
    field("I_String1", 18, 1, 10.0, I16),
    field("V_String2", 19, 1, 10.0, U16),
    field("I_String2", 20, 1, 10.0, I16),
    field("V_String3", 21, 1, 10.0, U16),
    field("I_String3", 22, 1, 10.0, I16),
    field("V_String4", 23, 1, 10.0, U16),
    field("I_String4", 24, 1, 10.0, I16),
    field("StringUnmatch", 49, 1, 1.0, U16),
    field("PID_FaultCode", 52, 1, 1.0, U16),
    field("Sac", 105, 2, 10.0, U32),
    field("Qac_Real", 107, 2, 10.0, I32),
    field("E_Reactive_Total", 111, 2, 10.0, U32),
    field("AFCI_Status", 113, 1, 1.0, U16),
];

/// Holding 0-124: grid code and power limits.
const BASE_SETTINGS: &[FieldDef] = &[
    field("OnOff", 0, 1, 1.0, U16),
    field("GridStandard", 1, 1, 1.0, U16),
    field("ActivePowerRate", 3, 1, 1.0, U16),
    field("ReactivePowerRate", 4, 1, 1.0, U16),
    field("PowerFactor", 5, 1, 10_000.0, U16),
    field("GridVoltHigh", 16, 1, 10.0, U16),
    field("GridVoltLow", 17, 1, 10.0, U16),
    field("GridFreqHigh", 18, 1, 100.0, U16),
    field("GridFreqLow", 19, 1, 100.0, U16),
    field("ModbusAddress", 88, 1, 1.0, U16),
];

/// Holding 125-249.
const EXT_SETTINGS: &[FieldDef] = &[
    field("VpvStart", 0, 1, 10.0, U16),
    field("ExportLimitEnable", 106, 1, 1.0, U16),
    field("ExportLimitRate", 107, 1, 10.0, U16),
];

/// Holding 3000-3024: identity block shared with the newer maps.
const IDENTITY: &[FieldDef] = &[
    field("SerialNumber", 1, 15, 1.0, Ascii),
    field("FirmwareVersion", 21, 4, 1.0, Ascii),
];
