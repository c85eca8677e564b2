//! Podium Engine: tournament prize lists for chess events.
//!
//! This crate turns a prize configuration and the final standings of one or
//! more tournaments into a palmarès: which player receives which prize.
//!
//! - [`config`] parses the configuration (line DSL or YAML rule book)
//! - [`engine`] evaluates conditions, assigns prizes and drives batch runs
//! - [`extraction`] reads standings from results pages
//! - [`render`] writes the text and JSON palmarès
//! - [`api`] serves runs over HTTP

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod extraction;
pub mod models;
pub mod render;
