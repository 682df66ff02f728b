//! The `ingest` subcommand: fetch one channel end-to-end and stage it.

mod pipeline;

pub(crate) use pipeline::run_ingest;
