//! Tests for configuration

#[cfg(test)]
mod tests {
    use super::super::config::*;
    use std::io::Write;

    #[test]
    fn test_api_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.min_confidence, Some(70));
        assert!(config.sport.is_none());
    }

    #[test]
    fn test_board_config_default() {
        let config = BoardConfig::default();
        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.health_interval_secs, 60);
        assert!(config.fallback_enabled);
        assert_eq!(config.fallback_count, 20);
    }

    #[test]
    fn test_lineup_config_default() {
        let config = LineupConfig::default();
        assert_eq!(config.max_picks, 6);
        assert_eq!(config.min_picks, 2);
    }

    #[test]
    fn test_payout_config_default() {
        let config = PayoutConfig::default();
        assert_eq!(config.compute_delay_ms, 1500);
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.port, 8787);
    }

    #[test]
    fn test_diagnostics_config_default() {
        let config = DiagnosticsConfig::default();
        assert_eq!(config.max_reports, 50);
        assert!(config.report_endpoint.is_none());
    }

    #[test]
    fn test_api_config_deserialize() {
        let toml_str = r#"
base_url = "https://api.example.com"
request_timeout_secs = 10
sport = "NBA"
min_confidence = 80
"#;
        let config: ApiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.sport, Some("NBA".to_string()));
        assert_eq!(config.min_confidence, Some(80));
    }

    #[test]
    fn test_board_config_partial_deserialize() {
        let toml_str = r#"
refresh_interval_secs = 300
"#;
        let config: BoardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.refresh_interval_secs, 300);
        // Untouched fields keep their defaults
        assert_eq!(config.health_interval_secs, 60);
        assert!(config.fallback_enabled);
    }

    #[test]
    fn test_lineup_config_deserialize() {
        let toml_str = r#"
max_picks = 5
min_picks = 3
"#;
        let config: LineupConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.max_picks, 5);
        assert_eq!(config.min_picks, 3);
    }

    #[test]
    fn test_diagnostics_config_with_endpoint() {
        let toml_str = r#"
max_reports = 100
report_endpoint = "https://api.example.com/api/errors/report"
"#;
        let config: DiagnosticsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.max_reports, 100);
        assert_eq!(
            config.report_endpoint,
            Some("https://api.example.com/api/errors/report".to_string())
        );
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.lineup.max_picks, 6);
        assert_eq!(config.payout.compute_delay_ms, 1500);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = Config::load("/nonexistent/propboard.toml").unwrap();
        assert_eq!(config.server.port, 8787);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://backend.internal"

[server]
port = 9000

[lineup]
max_picks = 4
"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.api.base_url, "https://backend.internal");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.lineup.max_picks, 4);
        // Sections absent from the file still default
        assert_eq!(config.board.refresh_interval_secs, 30);
    }
}
