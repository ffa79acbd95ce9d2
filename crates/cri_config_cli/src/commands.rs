//! Command modules for the cri-config CLI.
//!
//! - `config_cmd`: validating, showing and printing default configuration

pub mod config_cmd;
