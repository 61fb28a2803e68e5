//! Live server tests.
//!
//! These run the real `mysql` client through the shell and need a server.

use mysql_session::{HostPlatform, Session, ShellExecutor};
use std::sync::Arc;

/// Helper to create a session from MYSQL_TEST_* variables.
fn get_test_session() -> Option<Session> {
    let user = std::env::var("MYSQL_TEST_USER").ok()?;
    let password = std::env::var("MYSQL_TEST_PASSWORD").ok()?;
    let host = std::env::var("MYSQL_TEST_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    Some(
        Session::builder()
            .user(user)
            .password(password)
            .host(host)
            .build(Arc::new(ShellExecutor::new()), &HostPlatform),
    )
}

#[test]
fn test_live_select() {
    let Some(session) = get_test_session() else {
        eprintln!("Skipping test: MYSQL_TEST_USER or MYSQL_TEST_PASSWORD not set");
        return;
    };

    let result = session.query("select 1 + 1;").unwrap();
    assert!(result.succeeded, "query failed: {}", result.raw_output);
    assert_eq!(result.raw_output, "2");
}

#[test]
fn test_live_show_databases() {
    let Some(session) = get_test_session() else {
        eprintln!("Skipping test: MYSQL_TEST_USER or MYSQL_TEST_PASSWORD not set");
        return;
    };

    let result = session.query("show databases;").unwrap();
    assert!(result.succeeded, "query failed: {}", result.raw_output);
    assert!(result.lines().contains(&"information_schema"));
}

#[test]
fn test_live_syntax_error() {
    let Some(session) = get_test_session() else {
        eprintln!("Skipping test: MYSQL_TEST_USER or MYSQL_TEST_PASSWORD not set");
        return;
    };

    let result = session.query("selec 1;").unwrap();
    assert!(!result.succeeded);
    assert!(result.raw_output.contains("ERROR"));
}

#[test]
fn test_live_unknown_database() {
    let Some(session) = get_test_session() else {
        eprintln!("Skipping test: MYSQL_TEST_USER or MYSQL_TEST_PASSWORD not set");
        return;
    };

    let result = session
        .query_in("select 1;", "database_that_does_not_exist_42")
        .unwrap();
    assert!(!result.succeeded);
}
