//! External process execution
//!
//! Runs a program to completion with an explicit environment and turns a
//! non-zero exit into a [`ToolFailure`].

use tokio::process::Command;

use crate::core::environment::SanitizedEnv;
use crate::error::{Step, ToolFailure};

/// Render a command line for display
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` with `args`, waiting for it to exit
///
/// The child starts from a cleared environment populated from `env` only.
pub async fn run(
    program: &str,
    args: &[String],
    env: &SanitizedEnv,
    step: Step,
) -> Result<(), ToolFailure> {
    let command_line = render_command(program, args);
    tracing::info!("Running: {command_line}");

    let output = Command::new(program)
        .args(args)
        .env_clear()
        .envs(env.vars())
        .output()
        .await
        .map_err(|e| ToolFailure::new(step, &command_line, format!("failed to start: {e}")))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    tracing::debug!("{program} stdout:\n{stdout}");

    if output.status.success() {
        return Ok(());
    }

    Err(ToolFailure::new(
        step,
        command_line,
        diagnostics(&stderr, &stdout, &output.status.to_string()),
    ))
}

/// Full tool output for a failed run, stderr first
fn diagnostics(stderr: &str, stdout: &str, status: &str) -> String {
    let mut text = String::new();
    for (label, stream) in [("stderr", stderr), ("stdout", stdout)] {
        let stream = stream.trim_end();
        if !stream.is_empty() {
            text.push_str(&format!("--- {label} ---\n{stream}\n"));
        }
    }
    text.push_str(status);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command() {
        let args = vec!["--build".to_string(), "/b".to_string()];
        assert_eq!(render_command("cmake", &args), "cmake --build /b");
        assert_eq!(render_command("git", &[]), "git");
    }

    #[test]
    fn test_diagnostics_keep_both_streams() {
        let text = diagnostics("err 1\nerr 2\n", "out 1\n", "exit status: 2");
        assert_eq!(
            text,
            "--- stderr ---\nerr 1\nerr 2\n--- stdout ---\nout 1\nexit status: 2"
        );
        assert_eq!(diagnostics("", "  \n", "exit status: 1"), "exit status: 1");
    }

    #[tokio::test]
    async fn test_missing_program_is_tool_failure() {
        let env = SanitizedEnv::from_vars(std::env::vars_os());
        let err = run("depstrap-no-such-program", &[], &env, Step::Configure)
            .await
            .unwrap_err();
        assert_eq!(err.step, Step::Configure);
        assert!(err.diagnostics.contains("failed to start"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_captures_stderr() {
        let env = SanitizedEnv::from_vars(std::env::vars_os());
        let args = vec!["-c".to_string(), "echo broken >&2; exit 3".to_string()];
        let err = run("sh", &args, &env, Step::Build).await.unwrap_err();
        assert_eq!(err.step, Step::Build);
        assert!(err.diagnostics.contains("broken"));
        assert!(err.command.starts_with("sh -c"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_first_error_survives_long_output() {
        let env = SanitizedEnv::from_vars(std::env::vars_os());
        let script = "echo 'FIRST: fatal error: absl/base/config.h: No such file' >&2; \
                      i=0; while [ $i -lt 60 ]; do echo \"note: context $i\" >&2; i=$((i+1)); done; \
                      echo 'make[2]: *** [CMakeFiles/grpc.dir/all] Error 1'; exit 2";
        let args = vec!["-c".to_string(), script.to_string()];
        let err = run("sh", &args, &env, Step::Build).await.unwrap_err();

        assert!(err.diagnostics.contains("FIRST: fatal error"));
        assert!(err.diagnostics.contains("note: context 59"));
        assert!(err.diagnostics.contains("make[2]: *** [CMakeFiles/grpc.dir/all] Error 1"));
        assert!(err.diagnostics.lines().count() > 60);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_sees_only_sanitized_env() {
        let env = SanitizedEnv::from_vars([
            ("PATH", std::env::var("PATH").unwrap_or_default()),
            ("CPATH", "/stale/include".to_string()),
        ]);
        let args = vec!["-c".to_string(), "test -z \"$CPATH\"".to_string()];
        run("sh", &args, &env, Step::Configure).await.unwrap();
    }
}
