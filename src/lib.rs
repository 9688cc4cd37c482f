//! makedoc - generate Info command tables from C sources.
//!
//! makedoc reads C source files, finds every function declared with the
//! `DECLARE_INFO_COMMAND` marker and writes three generated files that must
//! agree with each other: a declarations header, a documentation array and a
//! key name array. It can instead dump an Emacs tag table of the same
//! declarations.
//!
//! # Architecture
//!
//! - `scan`: byte-level marker search and declaration extraction
//! - `names`: user-visible command names
//! - `keys`: numeric command keys
//! - `tags`: per-file tag blocks and the tag table dump
//! - `emit`: generated C text for the three artifacts
//! - `generate`: the driver tying scanning to emission
//! - `config`: YAML configuration and output layout
//! - `report`: run summaries (pretty, JSON)

pub mod cli;
pub mod config;
pub mod emit;
pub mod generate;
pub mod keys;
pub mod names;
pub mod report;
pub mod scan;
pub mod tags;

pub use config::{Config, Layout};
pub use emit::{Artifacts, Emitter};
pub use generate::{GenerateError, GenerateReport, Generator};
pub use names::visible_name;
pub use scan::{Declaration, Scanner, SourceBuffer};
pub use tags::{TagBlock, TagEntry, TagTable};
