//! tuning-db - MySQL tuning calculator
//!
//! Derives MySQL server parameters from a short hardware description
//! (memory, CPUs, database type and version) and renders them as JSON or as
//! a `[mysqld]` option file fragment, over HTTP or from the command line.

pub mod api;
pub mod cli;
pub mod config;
pub mod hardware;
pub mod logging;
pub mod metrics;
pub mod persist;
pub mod tuning;
