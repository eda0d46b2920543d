use std::collections::HashMap;
use std::path::PathBuf;

use ticket_notes::config::{CONFIG_ENV, Config, DEFAULT_PORT, DIR_ENV, PORT_ENV};

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::load_from(env(&[])).unwrap();

    assert_eq!(cfg.server.port, DEFAULT_PORT);
    assert_eq!(cfg.server.port, 18427);
    assert_eq!(cfg.server.max_request_bytes, 1024 * 1024);
    assert_eq!(cfg.server.read_chunk_bytes, 64 * 1024);
    assert_eq!(cfg.notes.dir, None);
}

#[test]
fn test_config_env_overrides() {
    let cfg = Config::load_from(env(&[(PORT_ENV, "9000"), (DIR_ENV, "/tmp/notes")])).unwrap();

    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.notes.dir, Some(PathBuf::from("/tmp/notes")));
}

#[test]
fn test_config_invalid_port_is_ignored() {
    let cfg = Config::load_from(env(&[(PORT_ENV, "not-a-port")])).unwrap();

    assert_eq!(cfg.server.port, DEFAULT_PORT);
}

#[test]
fn test_config_from_yaml_partial() {
    let cfg = Config::from_yaml("server:\n  port: 20000\n").unwrap();

    assert_eq!(cfg.server.port, 20000);
    assert_eq!(cfg.server.max_request_bytes, 1024 * 1024);
    assert_eq!(cfg.notes.dir, None);
}

#[test]
fn test_config_file_then_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.yaml");
    std::fs::write(
        &path,
        "server:\n  port: 20001\n  max_request_bytes: 4096\nnotes:\n  dir: /srv/notes\n",
    )
    .unwrap();

    let cfg = Config::load_from(env(&[
        (CONFIG_ENV, path.to_str().unwrap()),
        (PORT_ENV, "20002"),
    ]))
    .unwrap();

    assert_eq!(cfg.server.port, 20002);
    assert_eq!(cfg.server.max_request_bytes, 4096);
    assert_eq!(cfg.notes.dir, Some(PathBuf::from("/srv/notes")));

    let options = cfg.server_options();
    assert_eq!(options.port, 20002);
    assert_eq!(options.max_request_bytes, 4096);
}

#[test]
fn test_config_missing_file_is_an_error() {
    let result = Config::load_from(env(&[(CONFIG_ENV, "/definitely/not/here.yaml")]));

    assert!(result.is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::load_from(env(&[])).unwrap();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1, cfg2);
}
