// tests/exec_process.rs
//
// End-to-end executor tests against real child processes. `sh` is only the
// test subject here; runmux itself never routes arguments through a shell.

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::time::Duration;

use runmux::cmdline::{CommandLine, CommandLineBuilder};
use runmux::errors::RunmuxError;
use runmux::exec::{ProcessExecutor, StreamMultiplexer};
use runmux::types::{Severity, StreamChannel};
use runmux_test_utils::builders::InvocationBuilder;
use runmux_test_utils::sinks::MemorySink;

type TestResult = Result<(), Box<dyn Error>>;

fn sh(script: &str) -> CommandLine {
    CommandLineBuilder::new()
        .executable("sh")
        .flag_with_value("-c", script)
        .build()
        .expect("valid command line")
}

fn mux_with(
    out_sink: &MemorySink,
    err_sink: &MemorySink,
) -> StreamMultiplexer {
    StreamMultiplexer::new(
        out_sink.clone(),
        err_sink.clone(),
        Severity::Info,
        Severity::Warn,
    )
}

#[tokio::test]
async fn every_line_reaches_the_sink_before_completion() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();

        let cmdline = sh(r#"printf "one\ntwo\nthree\n"; printf "err1\nerr2\n" >&2"#);
        let outcome = ProcessExecutor::new(true)
            .execute(&cmdline, mux_with(&out_sink, &err_sink))
            .await?;

        assert_eq!(outcome.exit_code, 0);
        assert!(!outcome.failed);

        assert_eq!(
            out_sink.lines(),
            vec![
                (Severity::Info, "one".to_string()),
                (Severity::Info, "two".to_string()),
                (Severity::Info, "three".to_string()),
            ]
        );
        assert_eq!(
            err_sink.lines(),
            vec![
                (Severity::Warn, "err1".to_string()),
                (Severity::Warn, "err2".to_string()),
            ]
        );

        Ok(())
    })
    .await
}

#[tokio::test]
async fn nonzero_exit_fails_when_policy_enabled() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();

        let err = ProcessExecutor::new(true)
            .execute(&sh("exit 1"), mux_with(&out_sink, &err_sink))
            .await
            .unwrap_err();

        assert!(matches!(err, RunmuxError::NonZeroExit(1)));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn nonzero_exit_is_returned_when_policy_disabled() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();

        let outcome = ProcessExecutor::new(false)
            .execute(&sh("exit 1"), mux_with(&out_sink, &err_sink))
            .await?;

        assert_eq!(outcome.exit_code, 1);
        assert!(!outcome.failed);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn trailing_partial_line_from_a_real_process_is_kept() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();

        ProcessExecutor::new(true)
            .execute(&sh(r#"printf "no newline""#), mux_with(&out_sink, &err_sink))
            .await?;

        assert_eq!(
            out_sink.lines(),
            vec![(Severity::Info, "no newline".to_string())]
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_executable_fails_launch_with_zero_sink_writes() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();

        let cmdline = CommandLineBuilder::new()
            .executable("definitely-not-a-real-binary-anywhere")
            .flag("-v")
            .build()?;

        let err = ProcessExecutor::new(true)
            .execute(&cmdline, mux_with(&out_sink, &err_sink))
            .await
            .unwrap_err();

        match err {
            RunmuxError::Launch { executable, .. } => {
                assert_eq!(executable, "definitely-not-a-real-binary-anywhere");
            }
            other => panic!("expected Launch, got {other:?}"),
        }

        assert_eq!(out_sink.line_count(), 0);
        assert_eq!(err_sink.line_count(), 0);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn whitespace_in_a_value_stays_one_token() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();

        // `$1` prints the first positional argument as the child received it;
        // a shell-concatenated command line would have split it in two.
        let cmdline = CommandLineBuilder::new()
            .executable("sh")
            .flag_with_value("-c", r#"printf "%s\n" "$1""#)
            .arg("sh")
            .arg("two words")
            .build()?;

        ProcessExecutor::new(true)
            .execute(&cmdline, mux_with(&out_sink, &err_sink))
            .await?;

        assert_eq!(
            out_sink.lines(),
            vec![(Severity::Info, "two words".to_string())]
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn timed_out_process_is_killed_and_partial_output_kept() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();

        // The redirect keeps the pipe write ends out of `sleep`'s hands, so
        // killing the shell is enough for both pumps to reach EOF.
        let script = "echo started; sleep 10 >/dev/null 2>&1; echo done";
        let err = ProcessExecutor::new(true)
            .with_timeout(Duration::from_millis(500))
            .execute(&sh(script), mux_with(&out_sink, &err_sink))
            .await
            .unwrap_err();

        assert!(matches!(err, RunmuxError::Timeout(d) if d == Duration::from_millis(500)));

        let lines = out_sink.lines();
        assert_eq!(lines, vec![(Severity::Info, "started".to_string())]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn invocation_config_drives_the_executor_end_to_end() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let cfg = InvocationBuilder::new("sh")
            .flag_with_value("-c", "echo from-config; exit 3")
            .fail_on_error(false)
            .stdout_level(Severity::Debug)
            .build();

        let cmdline = cfg.command_line()?;
        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();
        let mux = StreamMultiplexer::new(
            out_sink.clone(),
            err_sink.clone(),
            cfg.stdout_level,
            cfg.stderr_level,
        );

        let outcome = ProcessExecutor::new(cfg.fail_on_error)
            .execute(&cmdline, mux)
            .await?;

        assert_eq!(outcome.exit_code, 3);
        assert_eq!(
            out_sink.lines(),
            vec![(Severity::Debug, "from-config".to_string())]
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn both_streams_are_drained_concurrently() -> TestResult {
    crate::common::with_timeout(async {
        init_tracing();

        let out_sink = MemorySink::new();
        let err_sink = MemorySink::new();

        // ~200KB per stream, well past a single OS pipe buffer; sequential
        // draining would deadlock here long before the 5s test timeout.
        let script = r#"
pad=$(printf '%0100d' 0)
i=0
while [ $i -lt 2000 ]; do
    echo "out $i $pad"
    echo "err $i $pad" >&2
    i=$((i+1))
done
"#;
        let outcome = ProcessExecutor::new(true)
            .execute(&sh(script), mux_with(&out_sink, &err_sink))
            .await?;

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(out_sink.line_count(), 2000);
        assert_eq!(err_sink.line_count(), 2000);

        // Within one channel, ordering is preserved.
        let out_lines = out_sink.lines();
        assert!(out_lines[0].1.starts_with("out 0 "));
        assert!(out_lines[1999].1.starts_with("out 1999 "));

        Ok(())
    })
    .await
}

#[test]
fn channel_display_names_match_the_streams() {
    assert_eq!(StreamChannel::Stdout.to_string(), "stdout");
    assert_eq!(StreamChannel::Stderr.to_string(), "stderr");
}
