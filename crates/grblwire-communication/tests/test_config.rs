use grblwire_communication::GrblConfig;
use grblwire_core::Error;
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grbl.toml");
    let config = GrblConfig {
        ack_timeout_ms: 500,
        status_poll_interval_ms: 250,
        ..GrblConfig::default()
    };

    config.save_to_file(&path).unwrap();
    let loaded = GrblConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grbl.json");
    let config = GrblConfig {
        line_buffer_capacity: 256,
        ..GrblConfig::default()
    };

    config.save_to_file(&path).unwrap();
    assert_eq!(GrblConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grbl.toml");
    std::fs::write(&path, "line_buffer_capacity = 0\n").unwrap();

    let err = GrblConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("line_buffer_capacity"));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grbl.yaml");
    std::fs::write(&path, "").unwrap();

    assert!(GrblConfig::load_from_file(&path).is_err());
    assert!(GrblConfig::default().save_to_file(&path).is_err());
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grbl.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = GrblConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid JSON config"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(GrblConfig::load_from_file(&dir.path().join("absent.toml")).is_err());
}
