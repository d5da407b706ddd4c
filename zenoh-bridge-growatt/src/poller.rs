//! Device polling: run a model plan over the shared transport and merge
//! the block records.

use sunsight_common::Record;
use tracing::debug;

use crate::reader::{ReadFailure, read_block};
use crate::registry::{BlockDef, ModelPlan};
use crate::status::postprocess;
use crate::transport::RegisterTransport;

/// Error type for a device cycle that could not complete.
///
/// Communication failures on individual blocks never surface here; they
/// degrade to missing fields. This error means the transport itself
/// misbehaved and the scheduler should back the device off.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct PollError(pub String);

/// Polls one configured device according to its model plan.
pub struct DevicePoller<'a> {
    name: &'a str,
    unit_id: u8,
    plan: &'static ModelPlan,
}

impl<'a> DevicePoller<'a> {
    pub fn new(name: &'a str, unit_id: u8, plan: &'static ModelPlan) -> Self {
        Self {
            name,
            unit_id,
            plan,
        }
    }

    /// Poll the telemetry blocks. An empty record means the device was
    /// unreachable this cycle (offline at night, typically); a non-empty
    /// record has status text appended.
    pub async fn poll_telemetry<T: RegisterTransport>(
        &self,
        transport: &mut T,
    ) -> Result<Record, PollError> {
        let mut record = self.poll_blocks(transport, self.plan.telemetry).await?;
        if !record.is_empty() {
            postprocess(&mut record, self.plan.family);
        }
        Ok(record)
    }

    /// Poll the settings blocks. Raw values only, no derived text.
    pub async fn poll_settings<T: RegisterTransport>(
        &self,
        transport: &mut T,
    ) -> Result<Record, PollError> {
        self.poll_blocks(transport, self.plan.settings).await
    }

    async fn poll_blocks<T: RegisterTransport>(
        &self,
        transport: &mut T,
        blocks: &'static [BlockDef],
    ) -> Result<Record, PollError> {
        let mut merged = Record::new();

        for block in blocks {
            match read_block(transport, self.unit_id, block, self.plan.family).await {
                Ok(record) => merged.merge(record),
                Err(ReadFailure::Comm(reason)) => {
                    debug!(
                        device = self.name,
                        block = block.base,
                        class = block.class.as_str(),
                        %reason,
                        "Block skipped this cycle"
                    );
                }
                Err(ReadFailure::Unexpected(reason)) => {
                    return Err(PollError(format!(
                        "device '{}' {} block {}: {}",
                        self.name,
                        block.class.as_str(),
                        block.base,
                        reason
                    )));
                }
            }
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelFamily;
    use crate::registry::{DType, FieldDef, RegisterClass, field};
    use crate::transport::TransportError;
    use sunsight_common::FieldValue;
    use std::collections::HashMap;

    /// Scripted transport: canned words per block base, or a scripted
    /// failure.
    struct ScriptedTransport {
        responses: HashMap<u16, Result<Vec<u16>, TransportError>>,
        calls: usize,
    }

    impl ScriptedTransport {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                calls: 0,
            }
        }

        fn with(mut self, base: u16, response: Result<Vec<u16>, TransportError>) -> Self {
            self.responses.insert(base, response);
            self
        }
    }

    impl RegisterTransport for ScriptedTransport {
        async fn read_registers(
            &mut self,
            _class: RegisterClass,
            address: u16,
            _count: u16,
            _unit: u8,
        ) -> Result<Vec<u16>, TransportError> {
            self.calls += 1;
            match self.responses.get(&address) {
                Some(Ok(words)) => Ok(words.clone()),
                Some(Err(TransportError::Timeout)) => Err(TransportError::Timeout),
                Some(Err(TransportError::Io(m))) => Err(TransportError::Io(m.clone())),
                Some(Err(e)) => Err(TransportError::Exception(e.to_string())),
                None => Err(TransportError::Timeout),
            }
        }
    }

    static BLOCK_A_FIELDS: &[FieldDef] = &[
        field("InverterStatus", 0, 1, 1.0, DType::U16),
        field("Vpv1", 1, 1, 10.0, DType::U16),
    ];
    static BLOCK_B_FIELDS: &[FieldDef] = &[field("SOC", 0, 1, 1.0, DType::U16)];

    static PLAN: ModelPlan = ModelPlan {
        family: ModelFamily::MinTlxh,
        telemetry: &[
            BlockDef {
                base: 3000,
                len: 2,
                class: RegisterClass::Input,
                fields: BLOCK_A_FIELDS,
            },
            BlockDef {
                base: 3125,
                len: 1,
                class: RegisterClass::Input,
                fields: BLOCK_B_FIELDS,
            },
        ],
        settings: &[],
    };

    #[tokio::test]
    async fn test_blocks_merge_into_one_record() {
        let mut transport = ScriptedTransport::new()
            .with(3000, Ok(vec![1, 2505]))
            .with(3125, Ok(vec![72]));

        let poller = DevicePoller::new("garage", 1, &PLAN);
        let record = poller.poll_telemetry(&mut transport).await.unwrap();

        assert_eq!(record.as_f64("Vpv1"), Some(250.5));
        assert_eq!(record.get("SOC"), Some(&FieldValue::Int(72)));
        // postprocess ran on the merged record
        assert_eq!(
            record.get("StatusVal"),
            Some(&FieldValue::Text("Normal".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_block_does_not_poison_the_rest() {
        let mut transport = ScriptedTransport::new()
            .with(3000, Err(TransportError::Timeout))
            .with(3125, Ok(vec![72]));

        let poller = DevicePoller::new("garage", 1, &PLAN);
        let record = poller.poll_telemetry(&mut transport).await.unwrap();

        assert!(!record.contains("Vpv1"));
        assert_eq!(record.get("SOC"), Some(&FieldValue::Int(72)));
        assert_eq!(transport.calls, 2, "both blocks were attempted");
    }

    #[tokio::test]
    async fn test_all_blocks_failed_yields_empty_record() {
        let mut transport = ScriptedTransport::new();

        let poller = DevicePoller::new("garage", 1, &PLAN);
        let record = poller.poll_telemetry(&mut transport).await.unwrap();

        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn test_io_error_aborts_the_cycle() {
        let mut transport = ScriptedTransport::new()
            .with(3000, Err(TransportError::Io("port gone".to_string())))
            .with(3125, Ok(vec![72]));

        let poller = DevicePoller::new("garage", 1, &PLAN);
        let err = poller.poll_telemetry(&mut transport).await.unwrap_err();

        assert!(err.0.contains("port gone"));
        assert_eq!(transport.calls, 1, "cycle stopped at the failing block");
    }
}
