//! Network helpers.
//!
//! Local interface enumeration and address selection for the startup banner.

pub mod interfaces;

pub use interfaces::{first_address, system_interfaces, Family, Iface};
