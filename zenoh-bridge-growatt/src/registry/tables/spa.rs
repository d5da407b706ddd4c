//! SPA AC-coupled storage units. No PV side: telemetry lives in the
//! 1000-based storage block and a 2000-based AC block.

use crate::model::ModelFamily;
use crate::registry::{BlockDef, DType::*, FieldDef, ModelPlan, RegisterClass, field};

pub static PLAN: ModelPlan = ModelPlan {
    family: ModelFamily::StorageSpa,
    telemetry: &[
        BlockDef {
            base: 1000,
            len: 125,
            class: RegisterClass::Input,
            fields: STORAGE,
        },
        BlockDef {
            base: 1125,
            len: 125,
            class: RegisterClass::Input,
            fields: STORAGE_EXT,
        },
        BlockDef {
            base: 2000,
            len: 125,
            class: RegisterClass::Input,
            fields: AC,
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

/// Input 1000-1124.
const STORAGE: &[FieldDef] = &[
    field("SystemWorkMode", 0, 1, 1.0, U16),
    field("SysFaultWord0", 1, 1, 1.0, U16),
    field("SysFaultWord1", 2, 1, 1.0, U16),
    field("Pdischarge", 9, 2, 10.0, U32),
    field("Pcharge", 11, 2, 10.0, U32),
    field("Vbat", 13, 1, 10.0, U16),
    field("SOC", 14, 1, 1.0, U16),
    field("P_ToUser_Total", 21, 2, 10.0, U32),
    field("P_ToGrid_Total", 29, 2, 10.0, U32),
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
    field("BMS_Status", 83, 1, 1.0, U16),
    field("BMS_Error", 85, 1, 1.0, U16),
    field("BMS_SOC", 86, 1, 1.0, U16),
    field("BMS_Vbat", 87, 1, 100.0, U16),
    field("BMS_Ibat", 88, 1, 100.0, I16),
    field("BMS_Temp", 89, 1, 10.0, U16),
];

/// Input 1125-1249: parallel-system registers.
const STORAGE_EXT: &[FieldDef] = &[field("MinSOC_Parallel", 87, 1, 1.0, U16)];

/// Input 2000-2124: AC side.
const AC: &[FieldDef] = &[
    field("InverterStatus", 0, 1, 1.0, U16),
    field("Pac", 35, 2, 10.0, U32),
    field("Fac", 37, 1, 100.0, U16),
    field("Vac1", 38, 1, 10.0, U16),
    field("Iac1", 39, 1, 10.0, U16),
    field("Pac1", 40, 2, 10.0, U32),
    field("Eac_Today", 53, 2, 10.0, U32),
    field("Eac_Total", 55, 2, 10.0, U32),
    field("WorkTimeTotal", 57, 2, 2.0, U32),
    field("TempInverter", 93, 1, 10.0, U16),
    field("FaultCode", 105, 1, 1.0, U16),
];

/// Holding 0-124.
const BASE_SETTINGS: &[FieldDef] = &[
    field("OnOff", 0, 1, 1.0, U16),
    field("ActivePowerRate", 3, 1, 1.0, U16),
    field("ModbusAddress", 88, 1, 1.0, U16),
];

/// Holding 1000-1124.
const STORAGE_SETTINGS: &[FieldDef] = &[
    field("StorageMode", 0, 1, 1.0, U16),
    field("BatteryType", 1, 1, 1.0, U16),
    field("MaxChargeRate", 10, 1, 1.0, U16),
    field("MaxDischargeRate", 11, 1, 1.0, U16),
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
