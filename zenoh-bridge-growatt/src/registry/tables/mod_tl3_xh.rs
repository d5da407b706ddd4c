//! MOD TL3-XH three-phase battery-ready hybrids, 3000-based maps.

use crate::model::ModelFamily;
use crate::registry::{BlockDef, DType::*, FieldDef, ModelPlan, RegisterClass, field};

pub static PLAN: ModelPlan = ModelPlan {
    family: ModelFamily::ModTl3Xh,
    telemetry: &[
        BlockDef {
            base: 3000,
            len: 125,
            class: RegisterClass::Input,
            fields: INVERTER,
        },
        BlockDef {
            base: 3125,
            len: 125,
            class: RegisterClass::Input,
            fields: BATTERY,
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
            base: 3000,
            len: 125,
            class: RegisterClass::Holding,
            fields: XH_SETTINGS,
        },
    ],
};

/// Input 3000-3124: inverter side, same layout as the TL-XH map.
const INVERTER: &[FieldDef] = &[
    field("InverterStatus", 0, 1, 1.0, U16),
    field("PpvInput", 1, 2, 10.0, U32),
    field("Vpv1", 3, 1, 10.0, U16),
    field("Ipv1", 4, 1, 10.0, U16),
    field("Ppv1", 5, 2, 10.0, U32),
    field("Vpv2", 7, 1, 10.0, U16),
    field("Ipv2", 8, 1, 10.0, U16),
    field("Ppv2", 9, 2, 10.0, U32),
    field("Psys", 19, 2, 10.0, U32),
    field("Qac", 21, 2, 10.0, I32),
    field("Pac", 23, 2, 10.0, U32),
    field("Fac", 25, 1, 100.0, U16),
    field("Vac1", 26, 1, 10.0, U16),
    field("Iac1", 27, 1, 10.0, U16),
    field("Pac1", 28, 2, 10.0, U32),
    field("Vac2", 30, 1, 10.0, U16),
    field("Iac2", 31, 1, 10.0, U16),
    field("Pac2", 32, 2, 10.0, U32),
    field("Vac3", 34, 1, 10.0, U16),
    field("Iac3", 35, 1, 10.0, U16),
    field("Pac3", 36, 2, 10.0, U32),
    field("Vac_RS", 38, 1, 10.0, U16),
    field("Vac_ST", 39, 1, 10.0, U16),
    field("Vac_TR", 40, 1, 10.0, U16),
    field("E_ToUser_Total", 41, 2, 10.0, U32),
    field("E_ToGrid_Total", 43, 2, 10.0, U32),
    field("E_Load_Total", 45, 2, 10.0, U32),
    field("WorkTimeTotal", 47, 2, 2.0, U32),
    field("Eac_Today", 49, 2, 10.0, U32),
    field("Eac_Total", 51, 2, 10.0, U32),
    field("Epv_Total", 53, 2, 10.0, U32),
    field("Epv1_Today", 55, 2, 10.0, U32),
    field("Epv1_Total", 57, 2, 10.0, U32),
    field("Epv2_Today", 59, 2, 10.0, U32),
    field("Epv2_Total", 61, 2, 10.0, U32),
    field("DeratingMode", 86, 1, 1.0, U16),
    field("ISO", 87, 1, 1.0, U16),
    field("Vbus", 92, 1, 10.0, U16),
    field("TempInverter", 93, 1, 10.0, U16),
    field("TempIPM", 94, 1, 10.0, U16),
    field("TempBoost", 95, 1, 10.0, U16),
    field("RealOPPercent", 101, 1, 1.0, U16),
    field("FaultCode", 105, 1, 1.0, U16),
    field("WarnCode", 106, 1, 1.0, U16),
    field("Esys_Today", 123, 2, 10.0, U32),
];

/// Input 3125-3249: battery section of the XH map.
const BATTERY: &[FieldDef] = &[
    field("Ebat_Discharge_Today", 0, 2, 10.0, U32),
    field("Ebat_Charge_Today", 4, 2, 10.0, U32),
    field("BDC_Mode", 41, 1, 1.0, U16),
    field("Vbat", 44, 1, 10.0, U16),
    field("Ibat", 45, 1, 10.0, I16),
    field("SOC", 46, 1, 1.0, U16),
    field("Pbat_Discharge", 53, 2, 10.0, U32),
    field("Pbat_Charge", 55, 2, 10.0, U32),
];

/// Holding 0-124: grid code and power limits.
const BASE_SETTINGS: &[FieldDef] = &[
    field("OnOff", 0, 1, 1.0, U16),
    field("GridStandard", 1, 1, 1.0, U16),
    field("ActivePowerRate", 3, 1, 1.0, U16),
    field("ReactivePowerRate", 4, 1, 1.0, U16),
    field("PowerFactor", 5, 1, 10_000.0, U16),
    field("VpvStart", 17, 1, 10.0, U16),
    field("GridVoltLow", 18, 1, 10.0, U16),
    field("GridVoltHigh", 19, 1, 10.0, U16),
    field("GridFreqLow", 20, 1, 100.0, U16),
    field("GridFreqHigh", 21, 1, 100.0, U16),
    field("ComAddress", 30, 1, 1.0, U16),
    field("AutoRestart", 64, 1, 1.0, U16),
];

/// Holding 3000-3124: identity, export limit and battery scheduling.
const XH_SETTINGS: &[FieldDef] = &[
    field("ExportLimitFailedPowerRate", 0, 1, 10.0, U16),
    field("SerialNumber", 1, 15, 1.0, Ascii),
    field("ModelNumber", 16, 5, 1.0, Ascii),
    field("FirmwareVersion", 21, 4, 1.0, Ascii),
    field("SysYear", 25, 1, 1.0, U16),
    field("SysMonth", 26, 1, 1.0, U16),
    field("SysDay", 27, 1, 1.0, U16),
    field("SysHour", 28, 1, 1.0, U16),
    field("SysMinute", 29, 1, 1.0, U16),
    field("SysSecond", 30, 1, 1.0, U16),
    field("Language", 31, 1, 1.0, U16),
    field("ExportLimitEnable", 38, 1, 1.0, U16),
    field("ExportLimitRate", 39, 1, 10.0, U16),
    field("ExportLimitFailSafe", 40, 1, 1.0, U16),
    field("BatPriority", 47, 1, 1.0, U16),
    field("BatChargePowerLimit", 49, 1, 1.0, U16),
    field("BatDischargePowerLimit", 50, 1, 1.0, U16),
    field("ACCharge1_StartHour", 55, 1, 1.0, U16),
    field("ACCharge1_StartMin", 56, 1, 1.0, U16),
    field("ACCharge1_EndHour", 57, 1, 1.0, U16),
    field("ACCharge1_EndMin", 58, 1, 1.0, U16),
    field("ACCharge1_Enable", 59, 1, 1.0, U16),
    field("ACCharge2_StartHour", 60, 1, 1.0, U16),
    field("ACCharge2_StartMin", 61, 1, 1.0, U16),
    field("ACCharge2_EndHour", 62, 1, 1.0, U16),
    field("ACCharge2_EndMin", 63, 1, 1.0, U16),
    field("ACCharge2_Enable", 64, 1, 1.0, U16),
    field("ACCharge3_StartHour", 65, 1, 1.0, U16),
    field("ACCharge3_StartMin", 66, 1, 1.0, U16),
    field("ACCharge3_EndHour", 67, 1, 1.0, U16),
    field("ACCharge3_EndMin", 68, 1, 1.0, U16),
    field("ACCharge3_Enable", 69, 1, 1.0, U16),
    field("ACChargeEnable", 70, 1, 1.0, U16),
    field("BatType", 80, 1, 1.0, U16),
];
