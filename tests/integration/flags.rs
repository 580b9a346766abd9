use layerbind::{Bind, BindError, Fields, MockEnv};

use crate::common::bind;

#[derive(Debug, Default)]
struct Config {
    name: String,
    port: i64,
    debug: bool,
}

impl Bind for Config {
    fn describe<'a>(&'a mut self, fields: &mut Fields<'a>) {
        fields.text("name", &mut self.name);
        fields.integer("port", &mut self.port);
        fields.boolean("debug", &mut self.debug);
    }
}

#[test]
fn test_double_dash_and_inline_values() {
    let mut c = Config::default();
    bind(
        &mut c,
        &["--name=abc", "--port", "80", "-debug=false"],
        MockEnv::new(),
        None,
    )
    .unwrap();
    assert_eq!(c.name, "abc");
    assert_eq!(c.port, 80);
    assert!(!c.debug);
}

#[test]
fn test_last_occurrence_wins() {
    let mut c = Config::default();
    bind(&mut c, &["-port", "1", "-port", "2"], MockEnv::new(), None).unwrap();
    assert_eq!(c.port, 2);
}

#[test]
fn test_unknown_flags_are_ignored() {
    let mut c = Config::default();
    bind(
        &mut c,
        &["-other", "value", "-name", "abc", "--extra=1"],
        MockEnv::new(),
        None,
    )
    .unwrap();
    assert_eq!(c.name, "abc");
}

#[test]
fn test_parsing_stops_at_first_positional() {
    let mut c = Config::default();
    bind(&mut c, &["-debug", "file.txt", "-port", "80"], MockEnv::new(), None).unwrap();
    assert!(c.debug);
    assert_eq!(c.port, 0);

    let mut c = Config::default();
    bind(&mut c, &["--", "-port", "80"], MockEnv::new(), None).unwrap();
    assert_eq!(c.port, 0);
}

#[test]
fn test_missing_argument_reports_usage() {
    let mut c = Config::default();
    let (err, stderr) = bind(&mut c, &["-name"], MockEnv::new(), None).unwrap_err();
    assert!(matches!(err, BindError::FlagParse { .. }));
    assert_eq!(err.exit_code(), 2);
    assert_stderr_snapshot!(stderr, @r"
    flag needs an argument: -name
    USAGE:
        test [OPTIONS]

    OPTIONS:
        -name <string>
                [env: NAME]
        -port <int>
                [env: PORT]
        -debug
                [env: DEBUG]
    ");
}

#[test]
fn test_bad_flag_syntax() {
    let mut c = Config::default();
    let (err, stderr) = bind(&mut c, &["---port"], MockEnv::new(), None).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"bad flag syntax: ---port");
    assert!(stderr.starts_with("bad flag syntax: ---port\nUSAGE:"));
}

#[test]
fn test_duplicate_flag_is_invalid() {
    #[derive(Default)]
    struct Clash {
        first: String,
        second: String,
    }

    impl Bind for Clash {
        fn describe<'a>(&'a mut self, fields: &mut Fields<'a>) {
            fields.text("first", &mut self.first).flag("same");
            fields.text("second", &mut self.second).flag("same");
        }
    }

    let mut c = Clash::default();
    let (err, stderr) = bind(&mut c, &[], MockEnv::new(), None).unwrap_err();
    assert!(matches!(err, BindError::InvalidArgument { .. }));
    insta::assert_snapshot!(err.to_string(), @"invalid argument: flag redefined: same");
    assert!(stderr.is_empty());
}

#[test]
fn test_empty_field_name_is_invalid() {
    #[derive(Default)]
    struct Nameless {
        value: String,
    }

    impl Bind for Nameless {
        fn describe<'a>(&'a mut self, fields: &mut Fields<'a>) {
            fields.text("", &mut self.value);
        }
    }

    let mut n = Nameless::default();
    let (err, _) = bind(&mut n, &[], MockEnv::new(), None).unwrap_err();
    assert!(matches!(err, BindError::InvalidArgument { .. }));
    assert_eq!(err.exit_code(), 1);
}
