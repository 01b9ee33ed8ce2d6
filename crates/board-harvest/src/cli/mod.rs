// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI subcommand implementations for the board-harvest binary.

pub mod channel_cmd;
pub mod jobs_cmd;
pub mod match_cmd;

/// Initialize stderr logging. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
