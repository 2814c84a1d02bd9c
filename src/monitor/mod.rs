//! Monitoring lifecycle: one worker task owns the classifier and consumes a
//! single sample channel, so ingestion observes a strict total order matching
//! arrival order. Confirmed events are handed off to the alert sink through a
//! dedicated dispatch task, one delivery at a time, without ever blocking
//! ingestion.

pub mod controller;
pub mod worker;

pub use controller::{MonitorController, SampleFeed};
