//! Integration test for attribute definitions loaded from configuration

use camino::Utf8PathBuf;
use chrono::Utc;
use claim_resolver::AttributeValue;
use claim_resolver::config::Config;
use claim_resolver::user::StaticUserDetails;
use std::io::Write;

fn ada() -> StaticUserDetails {
    StaticUserDetails {
        username: "ada".to_string(),
        groups: vec!["admins".to_string()],
        display_name: "Ada Lovelace".to_string(),
        emails: vec!["ada@example.com".to_string()],
        given_name: "Ada".to_string(),
        family_name: "Lovelace".to_string(),
        ..StaticUserDetails::default()
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_end_to_end_from_toml() {
    let toml = r#"
[authentication_backend.file]

[definitions.full_name]
expression = "given_name + ' ' + family_name"

[definitions.is_admin]
expression = "'admins' in groups"
"#;

    let config: Config = toml::from_str(toml).expect("Could not parse config");
    let resolver = config.resolver().expect("Could not build resolver");

    assert_eq!(
        resolver.resolve("full_name", &ada(), Utc::now()),
        Some(AttributeValue::String("Ada Lovelace".to_string()))
    );
    assert_eq!(
        resolver.resolve("is_admin", &ada(), Utc::now()),
        Some(AttributeValue::Boolean(true))
    );
    assert_eq!(
        resolver.resolve("email", &ada(), Utc::now()),
        Some(AttributeValue::String("ada@example.com".to_string()))
    );
    assert_eq!(resolver.resolve("nonexistent_attr", &ada(), Utc::now()), None);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_ldap_backend_restricts_the_environment() {
    let toml = r#"
[authentication_backend.ldap.attributes]
given_name = "givenName"

[definitions.full_name]
expression = "given_name + ' ' + family_name"
"#;

    let config: Config = toml::from_str(toml).expect("Could not parse config");

    // family_name has no LDAP mapping, so the expression must not compile
    let err = config.resolver().unwrap_err();
    assert!(err.to_string().contains("full_name"));
}

#[test]
fn test_config_without_definitions_yields_passthrough() {
    let toml = "
[authentication_backend.file]
";

    let config: Config = toml::from_str(toml).expect("Could not parse config");
    let resolver = config.resolver().expect("Could not build resolver");

    assert!(resolver.is_ready());
    assert_eq!(resolver.resolve("anything_custom", &ada(), Utc::now()), None);
    assert_eq!(
        resolver.resolve("username", &ada(), Utc::now()),
        Some(AttributeValue::String("ada".to_string()))
    );
}

#[test]
fn test_config_without_backend_fails() {
    let toml = r#"
[definitions.x]
expression = "1"
"#;

    let config: Config = toml::from_str(toml).expect("Could not parse config");
    let err = config.resolver().unwrap_err();
    assert!(err.to_string().contains("no identity backend"));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_load_dispatches_on_extension() {
    let dir = tempfile::tempdir().expect("Could not create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("non-UTF-8 temp dir");

    let toml_path = root.join("attributes.toml");
    let mut file = std::fs::File::create(&toml_path).unwrap();
    writeln!(file, "[authentication_backend.file]").unwrap();
    writeln!(file, "[definitions.x]").unwrap();
    writeln!(file, "expression = \"username\"").unwrap();
    drop(file);

    let yaml_path = root.join("attributes.yml");
    std::fs::write(
        &yaml_path,
        "authentication_backend:\n  file: {}\ndefinitions:\n  x:\n    expression: username\n",
    )
    .unwrap();

    let json_path = root.join("attributes.json");
    std::fs::write(
        &json_path,
        r#"{"authentication_backend": {"file": {}}, "definitions": {"x": {"expression": "username"}}}"#,
    )
    .unwrap();

    for path in [&toml_path, &yaml_path, &json_path] {
        let config = Config::load(path).expect("Could not load config");
        assert_eq!(config.definitions.len(), 1);
        assert_eq!(config.definitions["x"].expression, "username");
    }

    let other_path = root.join("attributes.ini");
    std::fs::write(&other_path, "").unwrap();
    let err = Config::load(&other_path).unwrap_err();
    assert!(err.to_string().contains("unsupported"));
}
