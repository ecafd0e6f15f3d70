//! Estate Concierge - WhatsApp Property Search Bot
//!
//! This crate implements a guided property-search conversation funnel
//! (type -> budget -> location -> selection -> visit booking) behind a
//! messaging webhook.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
