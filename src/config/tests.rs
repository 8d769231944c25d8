use super::*;

fn with_url() -> RawSettings {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("https://api.gratiswag.test/api/v1".to_string());
    raw
}

#[test]
fn defaults_apply_when_only_the_url_is_set() {
    let settings = Settings::from_raw(with_url()).expect("valid settings");
    assert_eq!(settings.api.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(settings.api.timeout, Duration::from_secs(DEFAULT_API_TIMEOUT_SECS));
    assert_eq!(settings.uploads.max_image_bytes.get(), DEFAULT_MAX_IMAGE_BYTES);
    assert_eq!(settings.session.file, PathBuf::from(DEFAULT_SESSION_FILE));
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert_eq!(settings.logging.format, LogFormat::Compact);
}

#[test]
fn missing_base_url_names_the_key() {
    let err = Settings::from_raw(RawSettings::default()).expect_err("url required");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));
}

#[test]
fn non_http_scheme_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://example.com".to_string());
    let err = Settings::from_raw(raw).expect_err("scheme");
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = with_url();
    raw.api.page_size = Some(25);
    raw.logging.level = Some("info".to_string());

    let overrides = ConfigOverrides {
        api_url: Some("http://localhost:4000".to_string()),
        page_size: Some(50),
        log_level: Some("debug".to_string()),
        log_json: Some(true),
        ..Default::default()
    };
    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "http://localhost:4000/");
    assert_eq!(settings.api.page_size, 50);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.logging.format, LogFormat::Json);
}

#[test]
fn page_size_is_bounded() {
    for bad in [0, u64::from(MAX_PAGE_SIZE) + 1] {
        let mut raw = with_url();
        raw.api.page_size = Some(bad);
        let err = Settings::from_raw(raw).expect_err("out of range");
        assert!(matches!(err, LoadError::Invalid { key: "api.page_size", .. }));
    }
}

#[test]
fn zero_limits_are_rejected() {
    let mut raw = with_url();
    raw.uploads.max_image_bytes = Some(0);
    assert!(Settings::from_raw(raw).is_err());

    let mut raw = with_url();
    raw.api.timeout_seconds = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = with_url();
    raw.logging.level = Some("chatty".to_string());
    let err = Settings::from_raw(raw).expect_err("level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}
