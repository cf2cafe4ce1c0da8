// Pipelines: multi-step workflows composed from the moderation gateway and
// the database layer.

pub mod create;
