//! Crate configuration.
//!
//! Read once from the environment; values only seed caller defaults, the
//! geometry entry points keep taking everything explicitly.

use std::sync::OnceLock;

/// Samples per flattened curve or arc when the caller has no opinion.
pub const DEFAULT_ITERATIONS: u32 = 16;

#[derive(Debug, Clone, Copy)]
pub struct CoreConfig {
    pub tess_iterations: u32,
    pub log_level: log::LevelFilter,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self { tess_iterations: DEFAULT_ITERATIONS, log_level: log::LevelFilter::Info }
    }
}

static CONFIG: OnceLock<CoreConfig> = OnceLock::new();

pub fn core_config() -> &'static CoreConfig {
    CONFIG.get_or_init(read_config)
}

/// Configured flattening quality: `VGCORE_ITERATIONS`, or the built-in
/// default.
pub fn default_iterations() -> u32 {
    core_config().tess_iterations
}

fn read_config() -> CoreConfig {
    let mut cfg = CoreConfig::default();

    if let Ok(value) = std::env::var("VGCORE_ITERATIONS") {
        if let Ok(n) = value.trim().parse::<u32>() {
            if n > 0 {
                cfg.tess_iterations = n;
            }
        }
    }

    if let Ok(value) = std::env::var("VGCORE_LOG") {
        let level = value.trim();
        if level.eq_ignore_ascii_case("off") {
            cfg.log_level = log::LevelFilter::Off;
        } else if level.eq_ignore_ascii_case("error") {
            cfg.log_level = log::LevelFilter::Error;
        } else if level.eq_ignore_ascii_case("warn") {
            cfg.log_level = log::LevelFilter::Warn;
        } else if level.eq_ignore_ascii_case("debug") {
            cfg.log_level = log::LevelFilter::Debug;
        } else if level.eq_ignore_ascii_case("trace") {
            cfg.log_level = log::LevelFilter::Trace;
        } else if level.eq_ignore_ascii_case("info") {
            cfg.log_level = log::LevelFilter::Info;
        }
    }

    cfg
}
