#![allow(dead_code)]

pub mod forwarder_mock;
pub mod store_mock;
