use std::fs;

use tempfile::tempdir;

use notesmith::load_config::load_config;

#[test]
fn loads_full_config() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(
        &path,
        "checkout_dir: ../checkout\n\
         repo_url: https://example.com/notes.git\n\
         include_file: site.include\n\
         target_dir: ../generated\n",
    )
    .unwrap();

    let config = load_config(&path).expect("config should load");
    assert_eq!(config.checkout_dir.to_str(), Some("../checkout"));
    assert_eq!(config.repo_url.as_deref(), Some("https://example.com/notes.git"));
    assert_eq!(config.include_file.to_str(), Some("site.include"));
    assert_eq!(config.target_dir.to_str(), Some("../generated"));
}

#[test]
fn repo_url_is_optional() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(
        &path,
        "checkout_dir: ../checkout\n\
         include_file: site.include\n\
         target_dir: ../generated\n",
    )
    .unwrap();

    let config = load_config(&path).expect("config should load");
    assert!(config.repo_url.is_none());
}

#[test]
fn missing_file_is_an_error() {
    let tmp = tempdir().unwrap();
    assert!(load_config(tmp.path().join("absent.yaml")).is_err());
}

#[test]
fn malformed_yaml_is_an_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "checkout_dir: [not, a, path\n").unwrap();
    assert!(load_config(&path).is_err());
}
