//! Model registry: static register maps for every supported Growatt model.
//!
//! A [`ModelPlan`] describes how to poll one model: which register blocks
//! to fetch for telemetry (input registers) and settings (holding
//! registers), and how to decode the named fields inside each block. Plans
//! are pure data; the registry validates them once at startup so a typo in
//! a table fails fast instead of silently producing garbage records.

pub mod tables;

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::ModelFamily;

/// Maximum registers per read request, per the Modbus specification.
pub const MAX_BLOCK_REGISTERS: u16 = 125;

/// Modbus register class a block is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterClass {
    /// Input registers (function code 0x04): live telemetry.
    Input,
    /// Holding registers (function code 0x03): device settings.
    Holding,
}

impl RegisterClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterClass::Input => "input",
            RegisterClass::Holding => "holding",
        }
    }
}

/// How the raw words of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    U16,
    I16,
    U32,
    I32,
    F32,
    Ascii,
}

/// One named register field within a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    /// Offset relative to the block base address.
    pub offset: u16,
    /// Length in 16-bit registers.
    pub len: u16,
    /// Divisor applied after type conversion. The vendor maps express a
    /// 0.1-unit register as scale 10.
    pub scale: f64,
    pub dtype: DType,
}

impl FieldDef {
    /// Energy accumulators get a tighter word-swap threshold. The vendor
    /// maps name them consistently: `E..._Today` / `E..._Total`.
    pub fn is_energy_accumulator(&self) -> bool {
        self.name.starts_with('E')
            && (self.name.ends_with("_Today") || self.name.ends_with("_Total"))
    }
}

/// Shorthand constructor used by the static tables.
pub const fn field(
    name: &'static str,
    offset: u16,
    len: u16,
    scale: f64,
    dtype: DType,
) -> FieldDef {
    FieldDef {
        name,
        offset,
        len,
        scale,
        dtype,
    }
}

/// A contiguous register range fetched with a single bus request.
#[derive(Debug)]
pub struct BlockDef {
    pub base: u16,
    /// Number of registers to read, at most [`MAX_BLOCK_REGISTERS`].
    pub len: u16,
    pub class: RegisterClass,
    pub fields: &'static [FieldDef],
}

/// Everything needed to poll one device model.
#[derive(Debug)]
pub struct ModelPlan {
    pub family: ModelFamily,
    /// Input-register blocks polled every cycle.
    pub telemetry: &'static [BlockDef],
    /// Holding-register blocks polled on the slow settings schedule. May
    /// be empty (meters have no settings surface).
    pub settings: &'static [BlockDef],
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("model '{model}': duplicate field name '{name}' in {class} blocks")]
    DuplicateField {
        model: &'static str,
        name: &'static str,
        class: &'static str,
    },
    #[error(
        "model '{model}': field '{name}' (offset {offset}, len {len}) \
         spans past the end of block {base} (len {block_len})"
    )]
    FieldOutOfRange {
        model: &'static str,
        name: &'static str,
        offset: u16,
        len: u16,
        base: u16,
        block_len: u16,
    },
    #[error(
        "model '{model}': block {base} has {len} registers, above the \
         Modbus limit of {MAX_BLOCK_REGISTERS}"
    )]
    BlockTooLong {
        model: &'static str,
        base: u16,
        len: u16,
    },
    #[error("model '{model}': field '{name}' has zero length")]
    ZeroLengthField {
        model: &'static str,
        name: &'static str,
    },
}

/// Lookup table from model identifier to its validated plan.
pub struct Registry {
    plans: HashMap<&'static str, &'static ModelPlan>,
}

impl Registry {
    /// Build the registry from the built-in model catalogue, validating
    /// every plan. Returns an error if any table is internally
    /// inconsistent.
    pub fn with_builtin_models() -> Result<Self, RegistryError> {
        let mut registry = Self {
            plans: HashMap::new(),
        };
        for (model, plan) in tables::BUILTIN_MODELS {
            registry.register(model, plan)?;
        }
        Ok(registry)
    }

    fn register(
        &mut self,
        model: &'static str,
        plan: &'static ModelPlan,
    ) -> Result<(), RegistryError> {
        validate_blocks(model, plan.telemetry)?;
        validate_blocks(model, plan.settings)?;
        self.plans.insert(model, plan);
        Ok(())
    }

    /// Look up the plan for an exact model identifier. There is no fuzzy
    /// matching: a misconfigured model name must surface as a visible
    /// mismatch, not as a near-miss decode of the wrong map.
    pub fn plan(&self, model: &str) -> Option<&'static ModelPlan> {
        self.plans.get(model).copied()
    }

    /// Known model identifiers, sorted for stable log output.
    pub fn models(&self) -> Vec<&'static str> {
        let mut models: Vec<_> = self.plans.keys().copied().collect();
        models.sort_unstable();
        models
    }
}

fn validate_blocks(
    model: &'static str,
    blocks: &'static [BlockDef],
) -> Result<(), RegistryError> {
    let mut names = HashSet::new();
    for block in blocks {
        if block.len > MAX_BLOCK_REGISTERS {
            return Err(RegistryError::BlockTooLong {
                model,
                base: block.base,
                len: block.len,
            });
        }
        for f in block.fields {
            if f.len == 0 {
                return Err(RegistryError::ZeroLengthField {
                    model,
                    name: f.name,
                });
            }
            if f.offset + f.len > block.len {
                return Err(RegistryError::FieldOutOfRange {
                    model,
                    name: f.name,
                    offset: f.offset,
                    len: f.len,
                    base: block.base,
                    block_len: block.len,
                });
            }
            if !names.insert(f.name) {
                return Err(RegistryError::DuplicateField {
                    model,
                    name: f.name,
                    class: block.class.as_str(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_models_validate() {
        let registry = Registry::with_builtin_models().unwrap();
        assert!(registry.plan("min-tlxh").is_some());
        assert!(registry.plan("sph").is_some());
        assert!(registry.plan("sdm630").is_some());
        assert!(registry.plan("MIN-TLXH").is_none(), "lookup is exact");
        assert!(registry.plan("unknown-model").is_none());
    }

    #[test]
    fn test_model_aliases_share_plans() {
        let registry = Registry::with_builtin_models().unwrap();
        let mid = registry.plan("mid").unwrap();
        let mac = registry.plan("mac").unwrap();
        assert!(std::ptr::eq(mid, mac));
    }

    #[test]
    fn test_validation_rejects_out_of_range_field() {
        static BAD_FIELDS: &[FieldDef] = &[field("Pac", 124, 2, 10.0, DType::U32)];
        static BAD_PLAN: ModelPlan = ModelPlan {
            family: ModelFamily::Tl3x,
            telemetry: &[BlockDef {
                base: 0,
                len: 125,
                class: RegisterClass::Input,
                fields: BAD_FIELDS,
            }],
            settings: &[],
        };

        let mut registry = Registry {
            plans: HashMap::new(),
        };
        let err = registry.register("bad", &BAD_PLAN).unwrap_err();
        assert!(matches!(err, RegistryError::FieldOutOfRange { .. }));
    }

    #[test]
    fn test_validation_rejects_duplicate_names() {
        static DUP_FIELDS: &[FieldDef] = &[
            field("Vpv1", 3, 1, 10.0, DType::U16),
            field("Vpv1", 7, 1, 10.0, DType::U16),
        ];
        static DUP_PLAN: ModelPlan = ModelPlan {
            family: ModelFamily::Tl3x,
            telemetry: &[BlockDef {
                base: 0,
                len: 125,
                class: RegisterClass::Input,
                fields: DUP_FIELDS,
            }],
            settings: &[],
        };

        let mut registry = Registry {
            plans: HashMap::new(),
        };
        let err = registry.register("dup", &DUP_PLAN).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateField { .. }));
    }
}
