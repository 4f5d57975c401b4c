// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

#[rstest]
#[case("pantry=/path/to/pantry", "pantry", "/path/to/pantry")]
#[case("@scope/pantry=./pantry", "@scope/pantry", "./pantry")]
#[case("javaScript=^index\\.m?js$", "javaScript", "^index\\.m?js$")]
#[case("name=a=b", "name", "a=b")]
fn test_parse_key_value(#[case] arg: &str, #[case] key: &str, #[case] value: &str) {
    assert_eq!(
        parse_key_value(arg),
        Ok((key.to_string(), value.to_string()))
    );
}

#[rstest]
#[case("no-separator")]
#[case("=value")]
#[case("key=")]
fn test_parse_key_value_invalid(#[case] arg: &str) {
    assert!(parse_key_value(arg).is_err());
}

#[rstest]
fn test_flags_override_config_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("roux.yaml");
    std::fs::write(
        &path,
        r#"
pantries:
  from-file: pantries/from-file
pantrySearchPaths:
  - node_modules
"#,
    )
    .unwrap();

    let flags = ConfigFlags {
        config: Some(path),
        search_paths: vec![PathBuf::from("/opt/node_modules")],
        pantries: vec![("from-flag".to_string(), "/opt/pantry".to_string())],
    };
    let config = flags.resolution_config().expect("Should build config");

    assert_eq!(config.pantry_search_paths, vec![PathBuf::from("/opt/node_modules")]);
    assert_eq!(config.pantries.names(), vec!["from-file", "from-flag"]);
    match config.pantries.get("from-file") {
        Some(roux::CacheEntry::Path(path)) => {
            assert_eq!(path, tmp.path().join("pantries/from-file"))
        }
        other => panic!("Expected Path entry, got: {:?}", other),
    }
}

#[rstest]
fn test_config_file_search_paths_kept_without_flags() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("roux.json");
    std::fs::write(&path, r#"{"pantrySearchPaths": ["vendor"]}"#).unwrap();

    let flags = ConfigFlags {
        config: Some(path),
        ..Default::default()
    };
    let config = flags.resolution_config().unwrap();

    assert_eq!(config.pantry_search_paths, vec![tmp.path().join("vendor")]);
    assert!(config.pantries.is_empty());
}

#[rstest]
fn test_missing_config_file() {
    let tmp = TempDir::new().unwrap();
    let flags = ConfigFlags {
        config: Some(tmp.path().join("missing.yaml")),
        ..Default::default()
    };

    assert!(flags.resolution_config().is_err());
}
