//! Color detection for usage text.

use supports_color::Stream;

/// Set by `insta` while reviewing snapshots, which must not depend on the terminal.
const SNAPSHOT_VARS: &[&str] = &["INSTA_UPDATE", "INSTA_WORKSPACE", "INSTA_SNAPSHOT_UPDATE"];

/// Whether usage text written to stderr should carry ANSI colors.
///
/// `supports-color` takes care of `NO_COLOR`, `FORCE_COLOR` and terminal detection.
pub(crate) fn stderr_wants_color() -> bool {
    if SNAPSHOT_VARS.iter().any(|v| std::env::var_os(v).is_some()) {
        return false;
    }
    supports_color::on_cached(Stream::Stderr).is_some_and(|level| level.has_basic)
}
