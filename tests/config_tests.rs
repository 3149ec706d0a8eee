use dejavu::cli::OutputFormat;
use dejavu::config::Config;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
algorithm = "sha256"
buffer_size = 4096
continue_on_error = true
output = "json"
"#;
    fs::write(&config_path, toml_content).unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.algorithm, "sha256");
    assert_eq!(config.buffer_size, 4096);
    assert!(config.continue_on_error);
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "algorithm = \"blake3\"\n").unwrap();

    let config = Config::load(Some(&config_path)).unwrap();

    assert_eq!(config.algorithm, "blake3");
    assert_eq!(config.buffer_size, Config::default().buffer_size);
    assert!(!config.continue_on_error);
}

#[test]
fn test_config_load_from_env() {
    // A test-only prefix keeps this independent of DEJAVU_* in the environment
    std::env::set_var("DEJAVU_CFGTEST_ALGORITHM", "sha512");
    std::env::set_var("DEJAVU_CFGTEST_CONTINUE_ON_ERROR", "true");

    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("DEJAVU_CFGTEST_"));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.algorithm, "sha512");
    assert!(config.continue_on_error);

    std::env::remove_var("DEJAVU_CFGTEST_ALGORITHM");
    std::env::remove_var("DEJAVU_CFGTEST_CONTINUE_ON_ERROR");
}

#[test]
fn test_config_invalid_toml_is_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "algorithm = [unclosed").unwrap();

    assert!(Config::load(Some(&config_path)).is_err());
}

#[test]
fn test_config_wrong_type_is_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "buffer_size = \"large\"\n").unwrap();

    assert!(Config::load(Some(&config_path)).is_err());
}
