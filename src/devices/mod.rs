//! Registered device listing

pub mod lister;
pub mod record;

pub use lister::DeviceLister;
pub use record::{DeviceCollection, DeviceRecord, DeviceType};
