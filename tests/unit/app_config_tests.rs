/*!
 * Tests for configuration loading, saving, and validation
 */

use bicorpus::app_config::{ChatProviderKind, Config, LogLevel};
use tempfile::TempDir;

#[test]
fn test_fromFileOrDefault_withMissingFile_shouldCreateDefaultConfig() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::from_file_or_default(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.provider, ChatProviderKind::OpenAI);
    assert_eq!(config.model, "gpt-4o-mini");
}

#[test]
fn test_saveAndLoad_shouldRoundTrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.provider = ChatProviderKind::LMStudio;
    config.endpoint = "http://localhost:1234".to_string();
    config.model = "qwen2.5-7b-instruct".to_string();
    config.classify.sentence_min_chars = 20;
    config.log_level = LogLevel::Debug;
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.provider, ChatProviderKind::LMStudio);
    assert_eq!(loaded.model, "qwen2.5-7b-instruct");
    assert_eq!(loaded.classify.sentence_min_chars, 20);
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

#[test]
fn test_fromFile_withPartialConfig_shouldFillDefaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{"provider": "lmstudio", "endpoint": "http://localhost:1234"}"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.provider, ChatProviderKind::LMStudio);
    assert_eq!(config.max_tokens, 4096);
    assert_eq!(config.retry_count, 3);
}

#[test]
fn test_fromFile_withInvalidEndpoint_shouldFailValidation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, r#"{"api_key": "k", "endpoint": "::::"}"#).unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_fromFile_withMalformedJson_shouldFail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}
