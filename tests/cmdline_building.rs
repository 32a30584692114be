// tests/cmdline_building.rs

use runmux::cmdline::CommandLineBuilder;
use runmux::errors::RunmuxError;
use runmux::params::{NameValueParam, ParameterSet};

#[test]
fn tokens_are_appended_in_order() {
    let cmdline = CommandLineBuilder::new()
        .executable("keytool")
        .flag("-genkey")
        .flag("-v")
        .flag_with_value("-alias", "release")
        .build()
        .unwrap();

    assert_eq!(cmdline.executable(), "keytool");
    assert_eq!(cmdline.args(), ["-genkey", "-v", "-alias", "release"]);
}

#[test]
fn value_with_whitespace_stays_one_token() {
    let cmdline = CommandLineBuilder::new()
        .executable("keytool")
        .flag_with_value("-alias", "release key 2026")
        .build()
        .unwrap();

    assert_eq!(cmdline.args(), ["-alias", "release key 2026"]);
}

#[test]
fn empty_value_still_contributes_a_token() {
    let cmdline = CommandLineBuilder::new()
        .executable("tool")
        .flag_with_value("-keypass", "")
        .build()
        .unwrap();

    assert_eq!(cmdline.args(), ["-keypass", ""]);
}

#[test]
fn structured_parameters_render_as_one_token() {
    let params = ParameterSet::new(vec![
        NameValueParam::new("CN", "Jane Doe"),
        NameValueParam::new("O", "Example, Inc"),
    ]);

    let cmdline = CommandLineBuilder::new()
        .executable("keytool")
        .flag("-genkey")
        .structured("-dname", &params)
        .build()
        .unwrap();

    assert_eq!(
        cmdline.args(),
        ["-genkey", "-dname", "CN=Jane Doe ,O=Example\\, Inc"]
    );
}

#[test]
fn missing_executable_is_reported_by_field_name() {
    let err = CommandLineBuilder::new().flag("-v").build().unwrap_err();
    assert!(matches!(err, RunmuxError::MissingField("executable")));
}

#[test]
fn blank_executable_is_rejected() {
    let err = CommandLineBuilder::new()
        .executable("   ")
        .build()
        .unwrap_err();
    assert!(matches!(err, RunmuxError::MissingField("executable")));
}

#[test]
fn display_quotes_tokens_with_whitespace_for_readability() {
    let cmdline = CommandLineBuilder::new()
        .executable("keytool")
        .flag_with_value("-alias", "release key")
        .build()
        .unwrap();

    assert_eq!(cmdline.to_string(), "keytool -alias \"release key\"");
}
