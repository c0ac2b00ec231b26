use super::*;

#[test]
fn unset_values_use_defaults() {
    assert_eq!(HostConfig::from_values(None, None), Ok(HostConfig::default()));
    assert_eq!(HostConfig::from_values(Some("  "), Some("")), Ok(HostConfig::default()));
}

#[test]
fn api_url_is_trimmed() {
    let config = HostConfig::from_values(Some(" https://logs.example.com/api/v1/ "), None).unwrap();
    assert_eq!(config.api_url, "https://logs.example.com/api/v1");
}

#[test]
fn api_url_requires_http_scheme() {
    assert_eq!(
        HostConfig::from_values(Some("ftp://logs.example.com"), None),
        Err(ConfigError::InvalidApiUrl { value: "ftp://logs.example.com".to_owned() })
    );
}

#[test]
fn port_must_parse() {
    assert_eq!(HostConfig::from_values(None, Some("8080")).map(|c| c.port), Ok(8080));
    assert_eq!(
        HostConfig::from_values(None, Some("eighty")),
        Err(ConfigError::InvalidPort { value: "eighty".to_owned() })
    );
    assert!(HostConfig::from_values(None, Some("70000")).is_err());
}

#[test]
fn from_env_reads_variables() {
    unsafe {
        std::env::set_var("LOGBOOK_API_URL", "http://analyzer.internal:9000/api/v1/");
        std::env::set_var("PORT", "4100");
    }
    let config = HostConfig::from_env();
    unsafe {
        std::env::remove_var("LOGBOOK_API_URL");
        std::env::remove_var("PORT");
    }
    assert_eq!(
        config,
        Ok(HostConfig { api_url: "http://analyzer.internal:9000/api/v1".to_owned(), port: 4100 })
    );
}
