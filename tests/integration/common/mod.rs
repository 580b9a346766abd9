use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use layerbind::{Bind, BindError, BindReport, MockEnv, builder};
use tempfile::TempDir;

/// Do snapshot testing for text written to the error stream (strips ANSI codes)
macro_rules! assert_stderr_snapshot {
    ($stderr:expr, @$snapshot:literal) => {
        insta::assert_snapshot!(strip_ansi_escapes::strip_str(&$stderr), @$snapshot)
    };
}

/// Install a test subscriber so `RUST_LOG=layerbind=trace` shows binder logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Result of one bind invocation, with everything written to the error stream.
pub struct Outcome {
    pub result: Result<BindReport, BindError>,
    pub stderr: String,
}

impl Outcome {
    pub fn unwrap(self) -> BindReport {
        match self.result {
            Ok(report) => {
                assert!(
                    self.stderr.is_empty(),
                    "unexpected output to stderr: {}",
                    self.stderr
                );
                report
            }
            Err(e) => panic!("expected success, got error: {e}\nstderr: {}", self.stderr),
        }
    }

    pub fn unwrap_err(self) -> (BindError, String) {
        match self.result {
            Ok(report) => panic!("expected an error, got:\n{report}"),
            Err(e) => (e, self.stderr),
        }
    }
}

/// Bind `record` with explicit args, environment and optional config directory.
pub fn bind<T: Bind>(
    record: &mut T,
    args: &[&str],
    env: MockEnv,
    dir: Option<&Utf8Path>,
) -> Outcome {
    let mut stderr = Vec::new();
    let mut b = builder(record)
        .args(args.iter().copied())
        .env(env)
        .program_name("test")
        .color(false)
        .output(&mut stderr);
    if let Some(dir) = dir {
        b = b.dir(dir);
    }
    let result = b.build().and_then(|binder| binder.run());
    Outcome {
        result,
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

/// A temporary config directory. Each entry is `(relative path, contents)`.
pub struct ConfigFiles {
    dir: TempDir,
}

impl ConfigFiles {
    pub fn new<'f>(files: impl IntoIterator<Item = (&'f str, &'f str)>) -> Self {
        let dir = tempfile::Builder::new()
            .prefix("layerbind-test")
            .tempdir()
            .unwrap();
        let this = Self { dir };
        for (rel, contents) in files {
            this.write(rel, contents.as_bytes());
        }
        this
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn write(&self, rel: &str, contents: &[u8]) {
        let path = self.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn path(&self) -> &Utf8Path {
        Utf8Path::from_path(self.dir.path()).unwrap()
    }

    pub fn path_buf(&self) -> Utf8PathBuf {
        self.path().to_owned()
    }
}
