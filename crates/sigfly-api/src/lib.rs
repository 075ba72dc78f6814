// sigfly-api: Async Rust client for the Sigfox backend REST API (v2)

pub mod auth;
pub mod client;
pub mod error;
pub mod limiter;
pub mod models;

mod device_types;
mod devices;
mod groups;
mod messages;

pub use auth::Credentials;
pub use client::{DEFAULT_BASE_URL, SigfoxClient, SigfoxClientBuilder};
pub use devices::DEVICE_ID_PREFIX;
pub use error::Error;
pub use limiter::RequestLimiter;
pub use models::{
    Device, DeviceType, DeviceTypeRef, DeviceTypeRequest, Envelope, Group, Message, MessageQuery,
    NewDevice, Paging,
};
