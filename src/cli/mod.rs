//! CLI infrastructure for infinitoe
//!
//! This module provides the command-line interface for playing against the
//! engine, analyzing positions, and running oracle-vs-oracle batches.

pub mod commands;
pub mod output;
