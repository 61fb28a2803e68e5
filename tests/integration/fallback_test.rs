//! Fallback credential integration tests.
//!
//! Sessions created without a full user/password pair read the Debian
//! maintenance file through the executor.

use mysql_session::session::{read_command, SessionState, DEBIAN_CREDENTIALS_PATH};
use mysql_session::{CommandOutput, ConnectionParams, FixedPlatform, MockExecutor, Session};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_debian_credentials_are_used_for_queries() {
    let mock = Arc::new(MockExecutor::with_outputs([
        CommandOutput::success("user = debian-sys-maint\npassword = abc123\n"),
        CommandOutput::success("8.0.36\n"),
    ]));
    let session = Session::new(
        ConnectionParams::default(),
        mock.clone(),
        &FixedPlatform::unix(),
    );

    assert_eq!(session.state(), SessionState::Ready);
    let result = session.query("select version();").unwrap();
    assert!(result.succeeded);
    assert_eq!(result.raw_output, "8.0.36");

    let calls = mock.calls();
    assert_eq!(calls[0].command, read_command(DEBIAN_CREDENTIALS_PATH));
    assert_eq!(
        calls[1].command,
        "mysql -udebian-sys-maint -pabc123 -h localhost -s -e \"select version();\""
    );
}

#[test]
fn test_missing_file_disables_session() {
    let mock = Arc::new(MockExecutor::with_outputs([CommandOutput::new("", "", 1)]));
    let session = Session::new(
        ConnectionParams::default(),
        mock.clone(),
        &FixedPlatform::unix(),
    );

    assert!(session.is_disabled());
    let err = session.query("select 1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Can't run MySQL SQL checks without authentication"
    );
    assert_eq!(mock.call_count(), 1);
}

#[test]
fn test_file_without_password_disables_session() {
    let mock = Arc::new(MockExecutor::with_outputs([CommandOutput::success(
        "[client]\nhost = localhost\nuser = debian-sys-maint\n",
    )]));
    let session = Session::new(
        ConnectionParams::default(),
        mock.clone(),
        &FixedPlatform::unix(),
    );

    assert!(session.is_disabled());
    assert_eq!(session.params().user, None);
}

#[test]
fn test_windows_session_without_credentials_is_disabled() {
    let mock = Arc::new(MockExecutor::new());
    let session = Session::new(
        ConnectionParams::default(),
        mock.clone(),
        &FixedPlatform::windows(),
    );

    assert!(session.is_disabled());
    assert!(session.query("select 1").unwrap_err().is_missing_authentication());
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_resolved_params_are_stable_across_queries() {
    let mock = Arc::new(MockExecutor::with_outputs([CommandOutput::success(
        "user = maint\npassword = pw\n",
    )]));
    let session = Session::new(
        ConnectionParams::new("127.0.0.1"),
        mock.clone(),
        &FixedPlatform::unix(),
    );

    session.query("select 1").unwrap();
    session.query("select 2").unwrap();

    let calls = mock.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[1].command.starts_with("mysql -umaint -ppw -h 127.0.0.1"));
    assert!(calls[2].command.starts_with("mysql -umaint -ppw -h 127.0.0.1"));
}
