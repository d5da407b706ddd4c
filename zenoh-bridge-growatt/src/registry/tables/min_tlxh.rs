//! MIN TL-X / TL-XH single-phase hybrids, 3000-based maps.

use crate::model::ModelFamily;
use crate::registry::{BlockDef, DType::*, FieldDef, ModelPlan, RegisterClass, field};

pub static PLAN: ModelPlan = ModelPlan {
    family: ModelFamily::MinTlxh,
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
            fields: BDC1,
        },
        BlockDef {
            base: 3250,
            len: 125,
            class: RegisterClass::Input,
            fields: BDC2,
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
            fields: TLXH_SETTINGS,
        },
        BlockDef {
            base: 3125,
            len: 125,
            class: RegisterClass::Holding,
            fields: BATTERY_SETTINGS,
        },
    ],
};

/// Input 3000-3124: inverter side.
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
    // half-second units
    field("WorkTimeTotal", 47, 2, 2.0, U32),
    field("Eac_Today", 49, 2, 10.0, U32),
    field("Eac_Total", 51, 2, 10.0, U32),
    field("Epv_Total", 53, 2, 10.0, U32),
    field("Epv1_Today", 55, 2, 10.0, U32),
    field("Epv1_Total", 57, 2, 10.0, U32),
    field("Epv2_Today", 59, 2, 10.0, U32),
    field("Epv2_Total", 61, 2, 10.0, U32),
    field("Epv3_Today", 63, 2, 10.0, U32),
    field("Epv3_Total", 65, 2, 10.0, U32),
    field("Epv4_Today", 67, 2, 10.0, U32),
    field("Epv4_Total", 69, 2, 10.0, U32),
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

/// Input 3125-3249: first battery-DC converter and its BMS.
const BDC1: &[FieldDef] = &[
    field("BDC1_Status", 0, 1, 1.0, U16),
    field("BDC1_Mode", 1, 1, 1.0, U16),
    field("Vbat", 2, 1, 10.0, U16),
    field("Ibat", 3, 1, 10.0, I16),
    field("SOC", 4, 1, 1.0, U16),
    field("SOH", 5, 1, 1.0, U16),
    field("Pbat", 6, 2, 10.0, I32),
    field("Ebat_Charge_Today", 8, 2, 10.0, U32),
    field("Ebat_Discharge_Today", 10, 2, 10.0, U32),
    field("Ebat_Charge_Total", 12, 2, 10.0, U32),
    field("Ebat_Discharge_Total", 14, 2, 10.0, U32),
    field("BMS_Status", 18, 1, 1.0, U16),
    field("PriorityMode", 19, 1, 1.0, U16),
    field("Veps", 44, 1, 10.0, U16),
    field("Feps", 45, 1, 100.0, U16),
    field("Peps", 46, 2, 10.0, U32),
    field("BMS_FCC", 75, 1, 1.0, U16),
    field("BMS_RM", 76, 1, 1.0, U16),
    field("BMS_Vbat", 91, 1, 100.0, U16),
    field("BMS_Ibat", 92, 1, 100.0, I16),
    field("BMS_Temp", 93, 1, 10.0, U16),
];

/// Input 3250-3374: second battery-DC converter, present on parallel
/// battery installs. Reads as zeros when absent.
const BDC2: &[FieldDef] = &[
    field("Pex1", 0, 2, 10.0, U32),
    field("Eex1_Today", 4, 2, 10.0, U32),
    field("Eex1_Total", 8, 2, 10.0, U32),
    field("BatPackNum", 12, 1, 1.0, U16),
    field("BDC2_Pcharge", 30, 2, 10.0, U32),
    field("BDC2_Edischarge_Total", 32, 2, 10.0, U32),
    field("BDC2_Echarge_Total", 34, 2, 10.0, U32),
    field("Vbus2", 38, 1, 10.0, U16),
    field("BMS2_Status", 63, 1, 1.0, U16),
    field("BMS2_SOC", 65, 1, 1.0, U16),
    field("BMS2_Vbat", 66, 1, 100.0, U16),
    field("BMS2_Ibat", 67, 1, 100.0, I16),
    field("BMS2_SOH", 72, 1, 1.0, U16),
];

/// Holding 0-124: legacy base settings.
const BASE_SETTINGS: &[FieldDef] = &[
    field("OnOff", 0, 1, 1.0, U16),
    field("ActivePowerRate", 3, 1, 1.0, U16),
    field("PowerFactor", 5, 1, 10_000.0, U16),
    field("ModbusAddress", 88, 1, 1.0, U16),
];

/// Holding 3000-3124: TL-XH settings and identity.
const TLXH_SETTINGS: &[FieldDef] = &[
    field("SerialNumber", 1, 15, 1.0, Ascii),
    field("FirmwareVersion", 21, 4, 1.0, Ascii),
    field("SysYear", 25, 1, 1.0, U16),
    field("SysMonth", 26, 1, 1.0, U16),
    field("SysDay", 27, 1, 1.0, U16),
    field("SysHour", 28, 1, 1.0, U16),
    field("SysMinute", 29, 1, 1.0, U16),
    field("SysSecond", 30, 1, 1.0, U16),
    field("ExportLimitEnable", 38, 1, 1.0, U16),
    field("ExportLimitRate", 39, 1, 10.0, U16),
    field("MaxChargeRate", 47, 1, 1.0, U16),
    field("MaxDischargeRate", 48, 1, 1.0, U16),
    field("ACChargeEnable", 49, 1, 1.0, U16),
    field("PriorityMode", 80, 1, 1.0, U16),
];

/// Holding 3125-3249: battery settings.
const BATTERY_SETTINGS: &[FieldDef] = &[
    field("BatteryType", 0, 1, 1.0, U16),
    field("ForcedDischargeEnable", 4, 1, 1.0, U16),
];
