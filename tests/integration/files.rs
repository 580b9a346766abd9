use layerbind::{Bind, BindError, Fields, MockEnv, SourceKind};

use crate::common::{ConfigFiles, bind, init_tracing};

#[derive(Debug, Default)]
struct Credentials {
    username: String,
    password: String,
    max_retries: i64,
    locked: bool,
    real_param: String,
}

impl Bind for Credentials {
    fn describe<'a>(&'a mut self, fields: &mut Fields<'a>) {
        fields.text("username", &mut self.username);
        fields.text("password", &mut self.password);
        fields.integer("maxretries", &mut self.max_retries);
        fields.boolean("locked", &mut self.locked);
        fields.text("realparam", &mut self.real_param).file("param");
    }
}

fn assert_credentials(c: &Credentials) {
    assert_eq!(c.username, "admin");
    assert_eq!(c.password, "mypassword");
    assert_eq!(c.max_retries, 5);
    assert!(c.locked);
    assert_eq!(c.real_param, "abc");
}

#[test]
fn test_files_simple() {
    init_tracing();
    let files = ConfigFiles::new([
        ("username", "admin"),
        ("password", "mypassword"),
        ("maxretries", "5"),
        ("locked", "true"),
        ("param", "abc"),
    ]);

    let mut c = Credentials::default();
    let report = bind(&mut c, &[], MockEnv::new(), Some(files.path())).unwrap();
    assert_credentials(&c);

    let origin = report.provenance("realparam").unwrap();
    assert!(origin.is_file());
    assert_eq!(report.get("realparam").unwrap().file_key.as_deref(), Some("param"));
}

#[test]
fn test_files_nested_directories() {
    let files = ConfigFiles::new([
        ("username", "admin"),
        ("0/password", "mypassword"),
        ("1/maxretries", "5"),
        ("1/2/locked", "true"),
        ("3/param", "abc"),
    ]);

    let mut c = Credentials::default();
    bind(&mut c, &[], MockEnv::new(), Some(files.path())).unwrap();
    assert_credentials(&c);
}

#[test]
fn test_first_file_in_traversal_order_wins() {
    let files = ConfigFiles::new([("a/username", "first"), ("b/username", "second")]);

    let mut c = Credentials::default();
    bind(&mut c, &[], MockEnv::new(), Some(files.path())).unwrap();
    assert_eq!(c.username, "first");
}

#[test]
fn test_file_beats_env_beats_flag() {
    let files = ConfigFiles::new([("username", "from-file")]);
    let env = MockEnv::from_pairs([("USERNAME", "from-env"), ("PASSWORD", "from-env")]);
    let args = [
        "-username",
        "from-flag",
        "-password",
        "from-flag",
        "-maxretries",
        "3",
    ];

    let mut c = Credentials::default();
    let report = bind(&mut c, &args, env, Some(files.path())).unwrap();
    assert_eq!(c.username, "from-file");
    assert_eq!(c.password, "from-env");
    assert_eq!(c.max_retries, 3);

    assert_eq!(report.provenance("username").unwrap().kind(), SourceKind::File);
    assert_eq!(report.provenance("password").unwrap().kind(), SourceKind::Env);
    assert_eq!(report.provenance("maxretries").unwrap().kind(), SourceKind::Flag);
}

#[test]
fn test_missing_directory_falls_through() {
    let files = ConfigFiles::empty();
    let missing = files.path().join("does-not-exist");
    let env = MockEnv::from_pairs([("USERNAME", "from-env")]);

    let mut c = Credentials::default();
    bind(&mut c, &[], env, Some(missing.as_path())).unwrap();
    assert_eq!(c.username, "from-env");
}

#[test]
fn test_without_directory_files_are_not_consulted() {
    let mut c = Credentials::default();
    let report = bind(&mut c, &["-username", "admin"], MockEnv::new(), None).unwrap();
    assert_eq!(c.username, "admin");
    assert_eq!(report.get("username").unwrap().file_key, None);
}

#[test]
fn test_file_contents_are_verbatim() {
    let files = ConfigFiles::new([("username", "admin\n"), ("maxretries", "5\n")]);

    let mut c = Credentials::default();
    let (err, stderr) = bind(&mut c, &[], MockEnv::new(), Some(files.path())).unwrap_err();
    assert_eq!(c.username, "admin\n");
    assert!(stderr.is_empty());

    let BindError::Coercion {
        source, key, value, ..
    } = err
    else {
        panic!("expected a coercion error");
    };
    assert_eq!(source, SourceKind::File);
    assert_eq!(key, "maxretries");
    assert_eq!(value, "5\n");
}

#[test]
fn test_trim_file_values() {
    let files = ConfigFiles::new([("username", "admin\n"), ("maxretries", " 5\n")]);

    let mut c = Credentials::default();
    layerbind::builder(&mut c)
        .args(Vec::<String>::new())
        .env(MockEnv::new())
        .dir(files.path_buf())
        .trim_file_values()
        .output(std::io::sink())
        .build()
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(c.username, "admin");
    assert_eq!(c.max_retries, 5);
}

#[test]
fn test_invalid_utf8_contents_are_bound_lossily() {
    let files = ConfigFiles::empty();
    files.write("password", b"a\xffb");

    let mut c = Credentials::default();
    let report = bind(&mut c, &[], MockEnv::new(), Some(files.path())).unwrap();
    assert_eq!(c.password, "a\u{fffd}b");
    assert!(report.provenance("password").unwrap().is_file());
}

#[test]
fn test_unreadable_directory() {
    let files = ConfigFiles::new([("username", "admin")]);
    // A path below a regular file cannot be a directory.
    let dir = files.path().join("username/nested");

    let mut c = Credentials::default();
    let (err, stderr) = bind(&mut c, &[], MockEnv::new(), Some(dir.as_path())).unwrap_err();
    let BindError::SourceRead { path, .. } = &err else {
        panic!("expected a read error, got {err}");
    };
    assert_eq!(path, &dir);
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(err.exit_code(), 1);
    assert!(stderr.is_empty());
    assert_eq!(c.username, "");
}

#[test]
fn test_bind_with_dir_uses_retrieved_directory() {
    let files = ConfigFiles::new([("username", "admin")]);
    let env = MockEnv::from_pairs([("CONFIGDIR", files.path().as_str())]);
    let dir = layerbind::retrieve_config_directory_from(
        &env,
        &["-configdir", "/elsewhere"],
        "CONFIGDIR",
        "configdir",
        "/config",
    );
    assert_eq!(dir.as_path(), files.path());

    let mut c = Credentials::default();
    bind(&mut c, &[], MockEnv::new(), Some(dir.as_path())).unwrap();
    assert_eq!(c.username, "admin");
}
