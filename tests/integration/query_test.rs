//! Query execution integration tests.
//!
//! Tests command construction and result classification end to end through
//! the public API.

use mysql_session::{
    CommandOutput, ConnectionParams, EscapeMode, FixedPlatform, MockExecutor, Session,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn root_session(mock: &Arc<MockExecutor>) -> Session {
    Session::builder()
        .user("root")
        .password("secret")
        .host("localhost")
        .build(mock.clone(), &FixedPlatform::unix())
}

#[test]
fn test_show_databases_success() {
    let mock = Arc::new(MockExecutor::with_outputs([CommandOutput::new(
        "information_schema\n",
        "",
        0,
    )]));
    let session = root_session(&mock);

    let result = session.query("show databases;").unwrap();

    assert!(result.succeeded);
    assert_eq!(result.raw_output, "information_schema");
    assert_eq!(result.lines(), vec!["information_schema"]);
}

#[test]
fn test_access_denied_failure() {
    let mock = Arc::new(MockExecutor::with_outputs([CommandOutput::new(
        "",
        "ERROR 1045: Access denied",
        1,
    )]));
    let session = root_session(&mock);

    let result = session.query("show databases;").unwrap();

    assert!(!result.succeeded);
    assert_eq!(result.raw_output, "\nERROR 1045: Access denied");
    assert_eq!(result.to_string(), "MySQL query with errors: show databases;");
}

#[test]
fn test_connect_failure_with_exit_zero() {
    let mock = Arc::new(MockExecutor::with_outputs([CommandOutput::new(
        "",
        "ERROR 2002 (HY000): Can't connect to local MySQL server through socket '/var/run/mysqld/mysqld.sock' (2)\n",
        0,
    )]));
    let session = root_session(&mock);

    let result = session.query("select 1").unwrap();
    assert!(!result.succeeded);
}

#[test]
fn test_remote_connect_message_relies_on_exit_code() {
    // "Can't connect to MySQL server" has no word before "MySQL server".
    let message = "ERROR 2003 (HY000): Can't connect to MySQL server on '10.0.0.1:3306' (110)\n";
    let mock = Arc::new(MockExecutor::with_outputs([
        CommandOutput::new("", message, 0),
        CommandOutput::new("", message, 1),
    ]));
    let session = root_session(&mock);

    assert!(session.query("select 1").unwrap().succeeded);
    assert!(!session.query("select 1").unwrap().succeeded);
}

#[test]
fn test_each_query_is_one_executor_call() {
    let mock = Arc::new(MockExecutor::with_outputs([
        CommandOutput::success("1\n"),
        CommandOutput::new("", "ERROR 1146: Table 'x' doesn't exist", 1),
        CommandOutput::success("3\n"),
    ]));
    let session = root_session(&mock);

    let first = session.query("select 1").unwrap();
    let second = session.query("select * from x").unwrap();
    let third = session.query("select 3").unwrap();

    assert!(first.succeeded);
    assert!(!second.succeeded);
    assert!(third.succeeded);
    assert_eq!(third.raw_output, "3");
    assert_eq!(mock.call_count(), 3);
}

#[test]
fn test_special_characters_are_escaped_once() {
    let mock = Arc::new(MockExecutor::new());
    let session = root_session(&mock);

    session
        .query(r#"select "x\y" as `$col`"#)
        .unwrap();

    assert_eq!(
        mock.calls()[0].command,
        r#"mysql -uroot -psecret -h localhost -s -e "select \"x\\y\" as `\$col`""#
    );
}

#[test]
fn test_socket_connection_never_uses_host() {
    let mock = Arc::new(MockExecutor::new());
    let params = ConnectionParams {
        user: Some("root".to_string()),
        password: Some("secret".to_string()),
        socket: Some("/var/run/mysqld/mysqld.sock".to_string()),
        port: Some(3306),
        ..Default::default()
    };
    let session = Session::new(params, mock.clone(), &FixedPlatform::unix());

    session.query_in("select 1", "mysql").unwrap();

    assert_eq!(
        mock.calls()[0].command,
        "mysql -uroot -psecret -S /var/run/mysqld/mysqld.sock --port 3306 mysql -s -e \"select 1\""
    );
}

#[test]
fn test_logged_command_hides_password() {
    let mock = Arc::new(MockExecutor::new());
    let session = Session::builder()
        .user("admin")
        .password("pa ss$word")
        .socket("/tmp/mysql.sock")
        .build(mock.clone(), &FixedPlatform::unix());

    session.query("select 1").unwrap();

    let call = &mock.calls()[0];
    assert!(call.command.contains("-ppa\\ ss\\$word"));
    assert_eq!(
        call.logged,
        "mysql -uadmin -pREDACTED -S /tmp/mysql.sock -s -e \"select 1\""
    );
}

#[test]
fn test_logged_command_hides_fallback_password() {
    let mock = Arc::new(MockExecutor::with_outputs([CommandOutput::success(
        "[client]\nhost     = localhost\nuser     = debian-sys-maint\npassword = Xy7pQ2\nsocket   = /var/run/mysqld/mysqld.sock\n",
    )]));
    let session = Session::new(ConnectionParams::default(), mock.clone(), &FixedPlatform::unix());

    session.query("select 1").unwrap();

    let call = &mock.calls()[1];
    assert!(call.command.contains("-pXy7pQ2"));
    assert_eq!(
        call.logged,
        "mysql -udebian-sys-maint -pREDACTED -h localhost -s -e \"select 1\""
    );
    assert!(!session.redacted_command_line("select 1", "").contains("Xy7pQ2"));
}

#[test]
fn test_strict_mode_through_builder() {
    let mock = Arc::new(MockExecutor::new());
    let session = Session::builder()
        .user("root")
        .password("secret")
        .escape_mode(EscapeMode::Strict)
        .build(mock.clone(), &FixedPlatform::unix());

    session.query("select 1; select `whoami`").unwrap();

    let command = &mock.calls()[0].command;
    assert!(command.ends_with("-s -e select\\ 1\\;\\ select\\ \\`whoami\\`"));
}
