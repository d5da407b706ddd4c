//! SPH / MIX storage hybrids: 0-based inverter block plus the 1000-based
//! storage block.

use crate::model::ModelFamily;
use crate::registry::{BlockDef, DType::*, FieldDef, ModelPlan, RegisterClass, field};

pub static PLAN: ModelPlan = ModelPlan {
    family: ModelFamily::StorageSph,
    telemetry: &[
        BlockDef {
            base: 0,
            len: 125,
            class: RegisterClass::Input,
            fields: INVERTER,
        },
        BlockDef {
            base: 1000,
            len: 125,
            class: RegisterClass::Input,
            fields: STORAGE,
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
            base: 1000,
            len: 125,
            class: RegisterClass::Holding,
            fields: STORAGE_SETTINGS,
        },
    ],
};

/// Input 0-124: inverter side.
const INVERTER: &[FieldDef] = &[
    field("InverterStatus", 0, 1, 1.0, U16),
    field("PpvInput", 1, 2, 10.0, U32),
    field("Vpv1", 3, 1, 10.0, U16),
    field("Ipv1", 4, 1, 10.0, U16),
    field("Ppv1", 5, 2, 10.0, U32),
    field("Vpv2", 7, 1, 10.0, U16),
    field("Ipv2", 8, 1, 10.0, U16),
    field("Ppv2", 9, 2, 10.0, U32),
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
    field("FaultCode", 105, 1, 1.0, U16),
];

/// Input 1000-1124: storage side, power flows and BMS.
const STORAGE: &[FieldDef] = &[
    field("SystemWorkMode", 0, 1, 1.0, U16),
    field("SysFaultWord0", 1, 1, 1.0, U16),
    field("SysFaultWord1", 2, 1, 1.0, U16),
    field("Pdischarge", 9, 2, 10.0, U32),
    field("Pcharge", 11, 2, 10.0, U32),
    field("Vbat", 13, 1, 10.0, U16),
    field("SOC", 14, 1, 1.0, U16),
    field("P_ToUser_R", 15, 2, 10.0, U32),
    field("P_ToUser_Total", 21, 2, 10.0, U32),
    field("P_ToGrid_R", 23, 2, 10.0, U32),
    field("P_ToGrid_Total", 29, 2, 10.0, U32),
    field("P_LocalLoad_R", 31, 2, 10.0, U32),
    field("P_LocalLoad_Total", 37, 2, 10.0, U32),
    field("TempBattery", 40, 1, 10.0, U16),
    field("E_ToUser_Today", 44, 2, 10.0, U32),
    field("E_ToUser_Total", 46, 2, 10.0, U32),
    field("E_ToGrid_Today", 48, 2, 10.0, U32),
    field("E_ToGrid_Total", 50, 2, 10.0, U32),
    field("E_Discharge_Today", 52, 2, 10.0, U32),
    field("E_Discharge_Total", 54, 2, 10.0, U32),
    field("E_Charge_Today", 56, 2, 10.0, U32),
    field("E_Charge_Total", 58, 2, 10.0, U32),
    field("E_LocalLoad_Today", 60, 2, 10.0, U32),
    field("E_LocalLoad_Total", 62, 2, 10.0, U32),
    field("EPS_Fac", 67, 1, 100.0, U16),
    field("EPS_Vac1", 68, 1, 10.0, U16),
    field("EPS_Iac1", 69, 1, 10.0, U16),
    field("EPS_Pac1", 70, 2, 10.0, U32),
    field("EPS_LoadPercent", 80, 1, 10.0, U16),
    field("BMS_Status", 83, 1, 1.0, U16),
    field("BMS_Error", 85, 1, 1.0, U16),
    field("BMS_SOC", 86, 1, 1.0, U16),
    field("BMS_Vbat", 87, 1, 100.0, U16),
    field("BMS_Ibat", 88, 1, 100.0, I16),
    field("BMS_Temp", 89, 1, 10.0, U16),
    field("BMS_SOH", 96, 1, 1.0, U16),
    field("BMS_MaxCellVolt", 108, 1, 1000.0, U16),
    field("BMS_MinCellVolt", 109, 1, 1000.0, U16),
];

/// Holding 0-124.
const BASE_SETTINGS: &[FieldDef] = &[
    field("OnOff", 0, 1, 1.0, U16),
    field("ActivePowerRate", 3, 1, 1.0, U16),
    field("ModbusAddress", 88, 1, 1.0, U16),
];

/// Holding 1000-1124: storage behavior.
const STORAGE_SETTINGS: &[FieldDef] = &[
    field("StorageMode", 0, 1, 1.0, U16),
    field("BatteryType", 1, 1, 1.0, U16),
    field("ChargePowerRate", 10, 1, 1.0, U16),
    field("DischargePowerRate", 11, 1, 1.0, U16),
    field("StopChargeSOC", 12, 1, 1.0, U16),
    field("StopDischargeSOC", 13, 1, 1.0, U16),
    field("ACChargeEnable", 14, 1, 1.0, U16),
    field("ACCharge_StartHour", 15, 1, 1.0, U16),
    field("ACCharge_StartMin", 16, 1, 1.0, U16),
    field("ACCharge_EndHour", 17, 1, 1.0, U16),
    field("ACCharge_EndMin", 18, 1, 1.0, U16),
    field("ACCharge_PeriodEnable", 19, 1, 1.0, U16),
    field("ExportLimitEnable", 47, 1, 1.0, U16),
    field("ExportLimitRate", 48, 1, 10.0, U16),
    field("EPS_Enable", 56, 1, 1.0, U16),
];
