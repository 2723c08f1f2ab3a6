//! Logger setup.

use env_logger::Builder;
use log::LevelFilter;

const DEFAULT_FILTER: &str = "glitchgrid=info";

/// Chatty GPU crates held at warn unless `RUST_LOG` says otherwise
const GPU_MODULES: [&str; 4] = ["naga", "wgpu", "wgpu_core", "wgpu_hal"];

/// Install the global logger. `RUST_LOG` replaces the default filter entirely.
pub fn init_logger() {
    let rust_log = std::env::var("RUST_LOG").ok();
    let _ = builder(rust_log.as_deref()).try_init();
}

fn builder(rust_log: Option<&str>) -> Builder {
    let mut builder = Builder::new();
    match rust_log {
        Some(filters) => {
            builder.parse_filters(filters);
        }
        None => {
            builder.parse_filters(DEFAULT_FILTER);
            for module in GPU_MODULES {
                builder.filter_module(module, LevelFilter::Warn);
            }
        }
    }
    builder.format_timestamp_millis();
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn enabled(logger: &env_logger::Logger, target: &str, level: Level) -> bool {
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn test_default_filter() {
        let logger = builder(None).build();
        assert!(enabled(&logger, "glitchgrid::orchestrator", Level::Info));
        assert!(!enabled(&logger, "glitchgrid::orchestrator", Level::Debug));
        assert!(enabled(&logger, "wgpu_core", Level::Warn));
        assert!(!enabled(&logger, "wgpu_core", Level::Info));
    }

    #[test]
    fn test_rust_log_can_raise_gpu_modules() {
        let logger = builder(Some("glitchgrid=debug,wgpu=debug")).build();
        assert!(enabled(&logger, "wgpu", Level::Debug));
        assert!(enabled(&logger, "glitchgrid::beat", Level::Debug));
    }
}
