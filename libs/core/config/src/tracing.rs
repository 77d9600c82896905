use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset in production.
const PRODUCTION_FILTER: &str = "info,tower_http=info,mongodb=warn";

/// Default filter when `RUST_LOG` is unset in development.
const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,mongodb=info";

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in `main()` before any fallible operations. Safe to call
/// multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Build the filter, honouring `RUST_LOG` when it is set.
fn build_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new(PRODUCTION_FILTER)
        } else {
            EnvFilter::new(DEVELOPMENT_FILTER)
        }
    })
}

/// Initialize tracing with environment-aware output and span capture.
///
/// - **Production** (`APP_ENV=production`): flattened JSON lines for log
///   aggregation, module targets hidden.
/// - **Development** (default): pretty multi-line output.
///
/// Both variants attach `tracing_error::ErrorLayer` so `color-eyre` reports
/// carry span traces. Calling this more than once is harmless; later calls
/// are ignored (common in tests).
pub fn init_tracing(environment: &Environment) {
    let filter = build_filter(environment);

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_multiple_calls() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_build_filter_respects_rust_log() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            let filter = build_filter(&Environment::Development);
            assert_eq!(filter.to_string(), "warn");
        });
    }

    #[test]
    fn test_build_filter_defaults_per_environment() {
        temp_env::with_var_unset("RUST_LOG", || {
            assert!(build_filter(&Environment::Production)
                .to_string()
                .starts_with("info"));
            assert!(build_filter(&Environment::Development)
                .to_string()
                .starts_with("debug"));
        });
    }
}
