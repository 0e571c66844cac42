//! Proxy selection tests

pub mod proxy;
