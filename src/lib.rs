//! devicelist - List the devices registered under an account on a remote device service

pub mod cli;
pub mod config;
pub mod devices;
pub mod error;
pub mod service;
pub mod session;
