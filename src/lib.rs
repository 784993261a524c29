//! SMS messenger client.
//!
//! Sends SMS through a TextLink-style HTTP gateway, ingests inbound
//! messages from gateway webhooks and keeps per-number conversation history
//! in local storage.

pub mod config;
pub mod gateway;
pub mod outbound;
pub mod phone;
pub mod storage;
pub mod store;
pub mod theme;
pub mod types;
pub mod webhook;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
