//! In-memory poll counter: build a [`PollCounter`] from a question and a
//! fixed list of options, cast votes by 1-based option number and take
//! snapshots of the tallies.

pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod voting;

pub use error::PollError;
pub use models::{OptionScore, PollDefinition, PollResult};
pub use voting::PollCounter;
