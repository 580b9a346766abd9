use layerbind::{MockEnv, retrieve_config_directory_from};

#[test]
fn test_configdir_lookup_chain() {
    let env = MockEnv::from_pairs([("CONFIGDIR", "/from/env")]);
    let args = ["-port", "80", "--configdir", "/from/flag"];

    let dir = retrieve_config_directory_from(&env, &args, "CONFIGDIR", "configdir", "/config");
    assert_eq!(dir.as_str(), "/from/env");

    let dir = retrieve_config_directory_from(
        &MockEnv::new(),
        &args,
        "CONFIGDIR",
        "configdir",
        "/config",
    );
    assert_eq!(dir.as_str(), "/from/flag");

    let dir = retrieve_config_directory_from(
        &MockEnv::new(),
        &["-port", "80"],
        "CONFIGDIR",
        "configdir",
        "/config",
    );
    assert_eq!(dir.as_str(), "/config");
}

#[test]
fn test_configdir_flag_after_positional_is_not_seen() {
    let dir = retrieve_config_directory_from(
        &MockEnv::new(),
        &["run", "-configdir", "/from/flag"],
        "CONFIGDIR",
        "configdir",
        "/config",
    );
    assert_eq!(dir.as_str(), "/config");
}
