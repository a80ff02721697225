//! CLI subcommand modules.
//!
//! This module contains the implementations for all fundus CLI subcommands.

pub(crate) mod columns;
pub(crate) mod features;
pub(crate) mod fit_predict;
