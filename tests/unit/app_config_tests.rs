use std::str::FromStr;

use docproof::app_config::{CheckProvider, Config, Language, LogLevel};

#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.provider, CheckProvider::OpenAI);
    assert_eq!(config.model, "gpt-3.5-turbo");
    assert_eq!(config.language, Language::Chinese);
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.retry_delay, 1.0);
    assert_eq!(config.session_refresh_interval, 3);
    assert!(config.additional_checks.is_empty());
    assert_eq!(config.timeout_secs, 60);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_parse_withPartialJson_shouldFillDefaults() {
    let json = r#"{ "provider": "gemini", "model": "gemini-pro" }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.provider, CheckProvider::Gemini);
    assert_eq!(config.model, "gemini-pro");
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.session_refresh_interval, 3);
}

#[test]
fn test_config_parse_withAdditionalChecks_shouldPreserveOrder() {
    let json = r#"{
        "additional_checks": ["check tone", "check logic", "check terminology"]
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(
        config.additional_checks,
        vec!["check tone", "check logic", "check terminology"]
    );
}

#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let valid = Config::default();
    assert!(valid.validate().is_ok());

    let zero_interval = Config {
        session_refresh_interval: 0,
        ..Config::default()
    };
    assert!(zero_interval.validate().is_err());

    let negative_delay = Config {
        retry_delay: -1.0,
        ..Config::default()
    };
    assert!(negative_delay.validate().is_err());

    let empty_model = Config {
        model: "  ".to_string(),
        ..Config::default()
    };
    assert!(empty_model.validate().is_err());
}

#[test]
fn test_config_roundTrip_shouldSurviveSaveAndLoad() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.provider = CheckProvider::Gemini;
    config.model = "gemini-pro".to_string();
    config.additional_checks = vec!["check tone".to_string()];
    config.save_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_fromFile_withMissingFile_shouldFail() {
    assert!(Config::from_file("/nonexistent/conf.json").is_err());
}

#[test]
fn test_checkProvider_fromStr_shouldParseKnownProviders() {
    assert_eq!(
        CheckProvider::from_str("openai").unwrap(),
        CheckProvider::OpenAI
    );
    assert_eq!(
        CheckProvider::from_str("Gemini").unwrap(),
        CheckProvider::Gemini
    );
    assert!(CheckProvider::from_str("ollama").is_err());
}

#[test]
fn test_checkProvider_apiKeyEnvVar_shouldMatchProvider() {
    assert_eq!(CheckProvider::OpenAI.api_key_env_var(), "OPENAI_API_KEY");
    assert_eq!(CheckProvider::Gemini.api_key_env_var(), "GEMINI_API_KEY");
}

#[test]
fn test_language_fromStr_shouldAcceptAliases() {
    assert_eq!(Language::from_str("chinese").unwrap(), Language::Chinese);
    assert_eq!(Language::from_str("中文").unwrap(), Language::Chinese);
    assert_eq!(Language::from_str("en").unwrap(), Language::English);
    assert!(Language::from_str("klingon").is_err());
}
