//! Code shared between the admin clients that talk to the Glacier API

#![warn(unused_crate_dependencies)]

pub mod account;
pub mod const_config;
pub mod cosmetics;
pub mod errors;
pub mod id;
mod macros;
pub mod player;
pub mod req_args;
pub mod session;
pub mod stats;
pub mod updates;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
