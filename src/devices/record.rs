//! Normalized device records

use std::fmt;

use serde::Serialize;

use crate::error::ListFailure;
use crate::service::RawDevice;

/// Devices in the order the service returned them
pub type DeviceCollection = Vec<DeviceRecord>;

/// One registered device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub name: String,
    /// Absent when the service does not know it; never an empty placeholder
    pub manufacturer: Option<String>,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub id: String,
}

/// Device category. Unknown categories are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum DeviceType {
    Phone,
    Tablet,
    Ios,
    DesktopApp,
    Other(String),
}

impl DeviceType {
    pub fn as_str(&self) -> &str {
        match self {
            DeviceType::Phone => "PHONE",
            DeviceType::Tablet => "TABLET",
            DeviceType::Ios => "IOS",
            DeviceType::DesktopApp => "DESKTOP_APP",
            DeviceType::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for DeviceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PHONE" => DeviceType::Phone,
            "TABLET" => DeviceType::Tablet,
            "IOS" => DeviceType::Ios,
            "DESKTOP_APP" => DeviceType::DesktopApp,
            _ => DeviceType::Other(s),
        }
    }
}

impl From<DeviceType> for String {
    fn from(t: DeviceType) -> Self {
        match t {
            DeviceType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DeviceRecord {
    /// Build a record from a raw service item.
    ///
    /// `name`, `type` and `id` must be present as strings. A missing or
    /// null `manufacturer` becomes `None`.
    pub fn from_raw(raw: &RawDevice) -> Result<Self, ListFailure> {
        Ok(Self {
            name: required(raw, "name")?,
            manufacturer: optional(raw, "manufacturer")?,
            device_type: DeviceType::from(required(raw, "type")?),
            id: required(raw, "id")?,
        })
    }
}

/// Normalize every item or fail as a whole
pub fn normalize(items: &[RawDevice]) -> Result<DeviceCollection, ListFailure> {
    items.iter().map(DeviceRecord::from_raw).collect()
}

fn required(raw: &RawDevice, field: &str) -> Result<String, ListFailure> {
    optional(raw, field)?.ok_or_else(|| {
        ListFailure::MalformedResponse(format!("device item is missing `{}`", field))
    })
}

fn optional(raw: &RawDevice, field: &str) -> Result<Option<String>, ListFailure> {
    match raw.get(field) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ListFailure::MalformedResponse(format!(
            "device field `{}` is not a string: {}",
            field, other
        ))),
    }
}
