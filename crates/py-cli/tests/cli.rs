//! End-to-end tests of the `py` binary over stdin/stdout.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn py() -> Command {
    let mut cmd = Command::cargo_bin("py").unwrap();
    cmd.env_remove("PY_LOG");
    cmd
}

fn write_settings(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

mod conversion {
    use super::*;

    #[test]
    fn test_default_lower() {
        py().write_stdin("张三\n").assert().success().stdout("zs\n");
    }

    #[test]
    fn test_upper_short_flag() {
        py().arg("-u").write_stdin("张三\n").assert().success().stdout("ZS\n");
    }

    #[test]
    fn test_upper_false_stays_lower() {
        py().arg("--upper=false")
            .write_stdin("张三\n")
            .assert()
            .success()
            .stdout("zs\n");
    }

    #[test]
    fn test_lower_false_alone_stays_lower() {
        py().arg("--lower=false")
            .write_stdin("张三\n")
            .assert()
            .success()
            .stdout("zs\n");
    }

    #[test]
    fn test_keep_non_han() {
        py().write_stdin("张3三\n").assert().success().stdout("z3s\n");
        py().arg("--keep-non-han=false")
            .write_stdin("张3三\n")
            .assert()
            .success()
            .stdout("zs\n");
    }

    #[test]
    fn test_multiple_lines_and_empty_line() {
        py().write_stdin("张三\n\n李四\r\nAlice 王五")
            .assert()
            .success()
            .stdout("zs\n\nls\nAlice ww\n");
    }

    #[test]
    fn test_empty_input() {
        py().write_stdin("").assert().success().stdout("");
    }

    #[test]
    fn test_stray_arguments_ignored() {
        py().args(["-u", "foo"])
            .write_stdin("张三\n")
            .assert()
            .success()
            .stdout("ZS\n");
    }

    #[test]
    fn test_parallel_same_output() {
        let input: String = (0..500).map(|i| format!("{i} 张三李四\n")).collect();
        let expected: String = (0..500).map(|i| format!("{i} zsls\n")).collect();
        py().args(["-j", "4"])
            .write_stdin(input)
            .assert()
            .success()
            .stdout(expected);
    }
}

mod failures {
    use std::process::Stdio;

    use super::*;

    #[test]
    fn test_line_too_long() {
        py().args(["--max-line-bytes", "8"])
            .write_stdin("张三\n0123456789abcdef\n李四\n")
            .assert()
            .failure()
            .code(1)
            .stdout("zs\n")
            .stderr(predicate::str::contains("too long"));
    }

    #[test]
    fn test_bad_flag_value() {
        py().arg("--upper=maybe")
            .write_stdin("张三\n")
            .assert()
            .failure()
            .code(2)
            .stdout("");
    }

    #[test]
    fn test_missing_settings_file() {
        py().args(["--config", "/nonexistent/py.toml"])
            .write_stdin("张三\n")
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("failed to read"));
    }

    /// Spawn `py` on piped stdin and stderr with the given stdout.
    fn spawn_py(stdout: Stdio) -> std::process::Child {
        std::process::Command::new(env!("CARGO_BIN_EXE_py"))
            .env_remove("PY_LOG")
            .stdin(Stdio::piped())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
    }

    #[test]
    fn test_stdout_closed_early_is_quiet_success() {
        let mut child = spawn_py(Stdio::piped());
        // Downstream reader goes away before any output is consumed.
        drop(child.stdout.take());
        let mut stdin = child.stdin.take().unwrap();
        let input = "张三\n".repeat(200_000);
        // The child may exit before it has read everything.
        let _ = stdin.write_all(input.as_bytes());
        drop(stdin);
        let output = child.wait_with_output().unwrap();
        assert_eq!(output.status.code(), Some(0));
        assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_device_exits_zero_with_warning() {
        let full = std::fs::OpenOptions::new().write(true).open("/dev/full").unwrap();
        let mut child = spawn_py(Stdio::from(full));
        let mut stdin = child.stdin.take().unwrap();
        let _ = stdin.write_all("张三\n".as_bytes());
        drop(stdin);
        let output = child.wait_with_output().unwrap();
        assert_eq!(output.status.code(), Some(0));
        assert!(String::from_utf8_lossy(&output.stderr).contains("failed to write output"));
    }

    #[test]
    fn test_zero_jobs() {
        py().args(["-j", "0"])
            .write_stdin("张三\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--jobs"));
    }
}

mod settings {
    use super::*;

    #[test]
    fn test_reading_override() {
        let file = write_settings("[readings]\n\"单\" = [\"shan\"]\n");
        py().args(["-u", "--config", file.path().to_str().unwrap()])
            .write_stdin("单田芳\n")
            .assert()
            .success()
            .stdout("STF\n");
    }

    #[test]
    fn test_export_is_valid() {
        let output = py().args(["settings", "export"]).output().unwrap();
        assert!(output.status.success());
        let file = write_settings(std::str::from_utf8(&output.stdout).unwrap());
        py().args(["settings", "validate", file.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("OK: input.max_line_bytes=1048576"));
    }

    #[test]
    fn test_validate_rejects_bad_reading() {
        let file = write_settings("[readings]\nx = [\"a\"]\n");
        py().args(["settings", "validate", file.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("readings.x"));
    }
}
