use std::time::Duration;

use gurudev::config::Config;
use temp_dir::TempDir;

#[test]
fn test_load_layers_file_and_environment() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("gurudev.toml");

    std::fs::write(
        &path,
        r#"
[server]
host = "0.0.0.0"
port = 8080

[database]
url = "sqlite:from-file.db"
max_connections = 2

[email]
enabled = false

[enquiry]
submit_timeout_secs = 3
"#,
    )?;

    // SAFETY: the only test in this binary touching the environment.
    unsafe {
        std::env::set_var("GURUDEV__SERVER__PORT", "9090");
        std::env::remove_var("DATABASE_URL");
    }

    let config = Config::load(Some(path.to_str().unwrap().to_owned()))?;

    unsafe {
        std::env::remove_var("GURUDEV__SERVER__PORT");
    }

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.database.url, "sqlite:from-file.db");
    assert_eq!(config.database.max_connections, 2);
    assert!(!config.email.enabled);
    assert_eq!(config.email.smtp_port, 1025);
    assert_eq!(config.enquiry.submit_timeout(), Duration::from_secs(3));
    assert_eq!(config.enquiry.toast_duration_ms, 4000);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_shipped_default_config_is_valid() -> anyhow::Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
    let config: Config = config::Config::builder()
        .add_source(config::File::with_name(path))
        .build()?
        .try_deserialize()?;

    assert!(config.validate().is_ok());
    assert!(config.email.enabled);
    assert_eq!(config.email.contact_address, "contact@gurudev.localhost");
    assert_eq!(config.enquiry.submit_timeout(), Duration::from_secs(10));
    assert_eq!(config.enquiry.toast_duration_ms, 4000);

    Ok(())
}
