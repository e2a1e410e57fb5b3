//! Stores functionality that should be shared between different admin
//! clients (the egui panel today, anything else tomorrow).
//! NB: The assumption is made that the async runtime has already been
//! started before any request-issuing functions from this library are
//! called

#![warn(unused_crate_dependencies)]

mod client;
mod session_store;

pub use client::{AuthStatus, Client, UiCallBack};
pub use session_store::{InMemorySessionStore, SessionStore};

#[cfg(not(target_arch = "wasm32"))]
pub use session_store::FileSessionStore;

#[cfg(target_arch = "wasm32")]
pub use session_store::WebSessionStore;
