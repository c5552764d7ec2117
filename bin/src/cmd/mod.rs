//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod convert;
pub(crate) mod fetch;
pub(crate) mod merge;
