use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use kds_core::config::loading::merge_configs;
use kds_core::config::{BackendConfig, DashboardConfig};
use kds_core::{CompletionRoute, ConfigError, KdsConfig};

pub fn build_cli() -> Command {
    Command::new("kds")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Kitchen display for the canteen order queue")
        .long_about("KDS polls the backend order queue, shows pending orders as cards, and lets kitchen staff mark an order ready. Settings come from ~/.kds/config.toml and ./.kds/config.toml; flags override both.")
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Backend base URL (default: http://localhost:8000)")
        )
        .arg(
            Arg::new("route")
                .long("route")
                .help("Completion endpoint the backend exposes")
                .value_parser(["complete", "update-status"])
        )
        .arg(
            Arg::new("poll-interval")
                .long("poll-interval")
                .value_name("SECS")
                .help("Seconds between queue polls (default: 3)")
                .value_parser(value_parser!(u64).range(1..))
        )
        .arg(
            Arg::new("tick-ms")
                .long("tick-ms")
                .value_name("MS")
                .help("Milliseconds between clock redraws (default: 1000)")
                .value_parser(value_parser!(u64).range(1..))
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write JSON logs here (default: ~/.kds/logs/kds.log)")
                .value_parser(value_parser!(PathBuf))
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
        )
}

/// Layer CLI flags over the loaded configuration and re-validate.
pub fn apply_overrides(config: KdsConfig, matches: &ArgMatches) -> Result<KdsConfig, ConfigError> {
    let completion_route = matches
        .get_one::<String>("route")
        .map(|s| s.parse::<CompletionRoute>())
        .transpose()
        .map_err(|message| ConfigError::InvalidConfiguration { message })?;

    let cli_config = KdsConfig {
        backend: BackendConfig {
            base_url: matches.get_one::<String>("base-url").cloned(),
            completion_route,
            request_timeout_ms: None,
        },
        dashboard: DashboardConfig {
            poll_interval_secs: matches.get_one::<u64>("poll-interval").copied(),
            clock_tick_ms: matches.get_one::<u64>("tick-ms").copied(),
        },
    };

    let merged = merge_configs(config, cli_config);
    merged.validate()?;
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let matches = build_cli().try_get_matches_from(["kds"]).unwrap();
        let config = apply_overrides(KdsConfig::default(), &matches).unwrap();
        assert_eq!(config, KdsConfig::default());
        assert!(!matches.get_flag("verbose"));
    }

    #[test]
    fn test_flags_override_config() {
        let mut base = KdsConfig::default();
        base.backend.base_url = Some("http://from-file:8000".to_string());
        base.dashboard.poll_interval_secs = Some(10);

        let matches = build_cli()
            .try_get_matches_from([
                "kds",
                "--base-url",
                "http://kitchen:9000",
                "--route",
                "complete",
                "--tick-ms",
                "500",
                "-v",
            ])
            .unwrap();
        let config = apply_overrides(base, &matches).unwrap();

        assert_eq!(config.backend.base_url(), "http://kitchen:9000");
        assert_eq!(config.backend.completion_route(), CompletionRoute::Complete);
        assert_eq!(config.dashboard.poll_interval(), Duration::from_secs(10)); // From file
        assert_eq!(config.dashboard.clock_tick(), Duration::from_millis(500));
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let matches = build_cli()
            .try_get_matches_from(["kds", "--base-url", "kitchen:9000"])
            .unwrap();
        let result = apply_overrides(KdsConfig::default(), &matches);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_zero_poll_interval_rejected_by_parser() {
        let result = build_cli().try_get_matches_from(["kds", "--poll-interval", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_route_rejected_by_parser() {
        let result = build_cli().try_get_matches_from(["kds", "--route", "finish"]);
        assert!(result.is_err());
    }
}
