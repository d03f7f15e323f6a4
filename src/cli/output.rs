//! Terminal rendering of device listings

use anyhow::Result;

use crate::devices::DeviceRecord;

/// `name | manufacturer | type | id`, with an absent manufacturer left empty
pub fn format_line(record: &DeviceRecord) -> String {
    format!(
        "{} | {} | {} | {}",
        record.name,
        record.manufacturer.as_deref().unwrap_or(""),
        record.device_type,
        record.id
    )
}

pub fn to_json(records: &[DeviceRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
