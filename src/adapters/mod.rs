//! Adapters - concrete implementations of the ports.

pub mod calendar;
pub mod http;
pub mod sheets;
pub mod storage;
