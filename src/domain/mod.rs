//! Domain layer - conversation funnel, property catalog, currency parsing.

pub mod catalog;
pub mod conversation;
pub mod currency;
pub mod foundation;
