//! MAX commercial string inverters, 0-based maps plus the 875-based
//! extended string monitor block (MAX models with more than 8 trackers).

use crate::model::ModelFamily;
use crate::registry::{BlockDef, DType::*, FieldDef, ModelPlan, RegisterClass, field};

pub static PLAN: ModelPlan = ModelPlan {
    family: ModelFamily::Max,
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
            fields: STRINGS,
        },
        BlockDef {
            base: 875,
            len: 125,
            class: RegisterClass::Input,
            fields: STRINGS_EXT,
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
    ],
};

/// Input 0-124: core telemetry with 8 PV trackers.
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
    field("Vpv5", 19, 1, 10.0, U16),
    field("Ipv5", 20, 1, 10.0, U16),
    field("Ppv5", 21, 2, 10.0, U32),
    field("Vpv6", 23, 1, 10.0, U16),
    field("Ipv6", 24, 1, 10.0, U16),
    field("Ppv6", 25, 2, 10.0, U32),
    field("Vpv7", 27, 1, 10.0, U16),
    field("Ipv7", 28, 1, 10.0, U16),
    field("Ppv7", 29, 2, 10.0, U32),
    field("Vpv8", 31, 1, 10.0, U16),
    field("Ipv8", 32, 1, 10.0, U16),
    field("Ppv8", 33, 2, 10.0, U32),
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
    field("Epv3_Today", 67, 2, 10.0, U32),
    field("Epv3_Total", 69, 2, 10.0, U32),
    field("Epv4_Today", 71, 2, 10.0, U32),
    field("Epv4_Total", 73, 2, 10.0, U32),
    field("Epv5_Today", 75, 2, 10.0, U32),
    field("Epv5_Total", 77, 2, 10.0, U32),
    field("Epv6_Today", 79, 2, 10.0, U32),
    field("Epv6_Total", 81, 2, 10.0, U32),
    field("Epv7_Today", 83, 2, 10.0, U32),
    field("Epv7_Total", 85, 2, 10.0, U32),
    field("Epv8_Today", 87, 2, 10.0, U32),
    field("Epv8_Total", 89, 2, 10.0, U32),
    field("Epv_Total", 91, 2, 10.0, U32),
    field("TempInverter", 93, 1, 10.0, U16),
    field("TempIPM", 94, 1, 10.0, U16),
    field("TempBoost", 95, 1, 10.0, U16),
    field("VbusP", 98, 1, 10.0, U16),
    field("VbusN", 99, 1, 10.0, U16),
    field("RealOPPercent", 101, 1, 1.0, U16),
    field("DeratingMode", 104, 1, 1.0, U16),
    field("FaultCode", 105, 1, 1.0, U16),
    field("WarnCode", 110, 1, 1.0, U16),
];

/// Input 125-249: PID module and string monitor, strings 1-16.
const STRINGS: &[FieldDef] = &[
    field("PID_Vpv1", 0, 1, 10.0, U16),
    field("PID_Ipv1", 1, 1, 10.0, I16),
    field("PID_Vpv2", 2, 1, 10.0, U16),
    field("PID_Ipv2", 3, 1, 10.0, I16),
    field("PID_Vpv8", 14, 1, 10.0, U16),
    field("PID_Ipv8", 15, 1, 10.0, I16),
    field("PID_Status", 16, 1, 1.0, U16),
    field("V_String1", 17, 1, 10.0, U16),
    field("I_String1", 18, 1, 10.0, I16),
    field("V_String2", 19, 1, 10.0, U16),
    field("I_String2", 20, 1, 10.0, I16),
    field("V_String16", 47, 1, 10.0, U16),
    field("I_String16", 48, 1, 10.0, I16),
    field("StringUnmatch_1_16", 49, 1, 1.0, U16),
    field("StringUnbalance_1_16", 50, 1, 1.0, U16),
    field("StringDisconnect_1_16", 51, 1, 1.0, U16),
    field("PID_FaultCode", 52, 1, 1.0, U16),
    field("Sac", 105, 2, 10.0, U32),
    field("Qac_Real", 107, 2, 10.0, I32),
    field("AFCI_Status", 113, 1, 1.0, U16),
];

/// Input 875-999: trackers 9-16 and strings 17-32 on the larger frames.
const STRINGS_EXT: &[FieldDef] = &[
    field("Vpv9", 0, 1, 10.0, U16),
    field("Ipv9", 1, 1, 10.0, U16),
    field("Ppv9", 2, 2, 10.0, U32),
    field("Vpv10", 4, 1, 10.0, U16),
    field("Ipv10", 5, 1, 10.0, U16),
    field("Ppv10", 6, 2, 10.0, U32),
    field("Vpv11", 8, 1, 10.0, U16),
    field("Ipv11", 9, 1, 10.0, U16),
    field("Ppv11", 10, 2, 10.0, U32),
    field("Vpv12", 12, 1, 10.0, U16),
    field("Ipv12", 13, 1, 10.0, U16),
    field("Ppv12", 14, 2, 10.0, U32),
    field("Vpv13", 16, 1, 10.0, U16),
    field("Ipv13", 17, 1, 10.0, U16),
    field("Ppv13", 18, 2, 10.0, U32),
    field("Vpv14", 20, 1, 10.0, U16),
    field("Ipv14", 21, 1, 10.0, U16),
    field("Ppv14", 22, 2, 10.0, U32),
    field("Vpv15", 24, 1, 10.0, U16),
    field("Ipv15", 25, 1, 10.0, U16),
    field("Ppv15", 26, 2, 10.0, U32),
    field("Vpv16", 28, 1, 10.0, U16),
    field("Ipv16", 29, 1, 10.0, U16),
    field("Ppv16", 30, 2, 10.0, U32),
    field("Epv9_Today", 32, 2, 10.0, U32),
    field("Epv9_Total", 34, 2, 10.0, U32),
    field("Epv10_Today", 36, 2, 10.0, U32),
    field("Epv10_Total", 38, 2, 10.0, U32),
    field("Epv11_Today", 40, 2, 10.0, U32),
    field("Epv11_Total", 42, 2, 10.0, U32),
    field("Epv12_Today", 44, 2, 10.0, U32),
    field("Epv12_Total", 46, 2, 10.0, U32),
    field("Epv13_Today", 48, 2, 10.0, U32),
    field("Epv13_Total", 50, 2, 10.0, U32),
    field("Epv14_Today", 52, 2, 10.0, U32),
    field("Epv14_Total", 54, 2, 10.0, U32),
    field("Epv15_Today", 56, 2, 10.0, U32),
    field("Epv15_Total", 58, 2, 10.0, U32),
    field("Epv16_Today", 60, 2, 10.0, U32),
    field("Epv16_Total", 62, 2, 10.0, U32),
    field("PID_Vpv9", 64, 1, 10.0, U16),
    field("PID_Ipv9", 65, 1, 10.0, I16),
    field("PID_Vpv16", 78, 1, 10.0, U16),
    field("PID_Ipv16", 79, 1, 10.0, I16),
    field("V_String17", 80, 1, 10.0, U16),
    field("I_String17", 81, 1, 10.0, I16),
    field("V_String32", 110, 1, 10.0, U16),
    field("I_String32", 111, 1, 10.0, I16),
    field("StringUnmatch_17_32", 112, 1, 1.0, U16),
    field("StringUnbalance_17_32", 113, 1, 1.0, U16),
    field("StringDisconnect_17_32", 114, 1, 1.0, U16),
    field("StringWarning_1_16", 116, 1, 1.0, U16),
    field("StringWarning_17_32", 117, 1, 1.0, U16),
];

/// Holding 0-124.
const BASE_SETTINGS: &[FieldDef] = &[
    field("OnOff", 0, 1, 1.0, U16),
    field("ActivePowerRate", 3, 1, 1.0, U16),
    field("ReactivePowerRate", 4, 1, 1.0, U16),
    field("PowerFactor", 5, 1, 10_000.0, U16),
    field("GridVoltHigh", 16, 1, 10.0, U16),
    field("GridVoltLow", 17, 1, 10.0, U16),
    field("GridFreqHigh", 18, 1, 100.0, U16),
    field("GridFreqLow", 19, 1, 100.0, U16),
    field("StartDelay", 30, 1, 1.0, U16),
    field("ModbusAddress", 88, 1, 1.0, U16),
];

/// Holding 125-249.
const EXT_SETTINGS: &[FieldDef] = &[
    field("VpvStart", 0, 1, 10.0, U16),
    field("IslandingProtection", 6, 1, 1.0, U16),
    field("ExportLimitEnable", 106, 1, 1.0, U16),
    field("ExportLimitRate", 107, 1, 10.0, U16),
];
