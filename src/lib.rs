// Castaway: messages in bottles, screened by a pattern-based moderation engine.
//
// This is the library root. Each module corresponds to a major subsystem:
// moderation screens text, db stores bottles and tags, pipeline composes
// the two into the creation workflow.

pub mod config;
pub mod db;
pub mod moderation;
pub mod output;
pub mod pipeline;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
