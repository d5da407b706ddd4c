//! Block reads: one bus request, one partial record.

use sunsight_common::Record;

use crate::decode::decode;
use crate::model::ModelFamily;
use crate::registry::BlockDef;
use crate::transport::{RegisterTransport, TransportError};

/// How a block read failed.
#[derive(Debug, thiserror::Error)]
pub enum ReadFailure {
    /// Routine bus trouble: timeout, exception response, empty payload.
    /// The block is skipped for this cycle; the rest of the plan still
    /// runs.
    #[error("communication failure: {0}")]
    Comm(String),
    /// Transport-level breakage. Aborts the device's cycle and triggers
    /// backoff.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl From<TransportError> for ReadFailure {
    fn from(e: TransportError) -> Self {
        if e.is_comm() {
            ReadFailure::Comm(e.to_string())
        } else {
            ReadFailure::Unexpected(e.to_string())
        }
    }
}

/// Read one block and decode its fields into a record.
///
/// Fields whose span falls outside the returned word count are skipped
/// silently: older firmware answers short reads for blocks it only
/// partially implements, and the fields it does cover are still good.
pub async fn read_block<T: RegisterTransport>(
    transport: &mut T,
    unit: u8,
    block: &BlockDef,
    family: ModelFamily,
) -> Result<Record, ReadFailure> {
    let words = transport
        .read_registers(block.class, block.base, block.len, unit)
        .await?;

    if words.is_empty() {
        return Err(ReadFailure::Comm(format!(
            "empty response for {} block {}",
            block.class.as_str(),
            block.base
        )));
    }

    let mut record = Record::new();
    for field in block.fields {
        let start = field.offset as usize;
        let end = start + field.len as usize;
        if end > words.len() {
            continue;
        }
        record.insert(
            field.name,
            decode(&words[start..end], field, family.swap_threshold_for(field)),
        );
    }

    Ok(record)
}
