//! Integration tests for CLI wiring.
//!
//! These tests validate that the CLI is a thin adapter over existing APIs
//! with proper error handling and exit codes. None of them reach the network.

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use std::path::{Path, PathBuf};
    use std::process::{Command, Output};
    use tempfile::TempDir;

    const EXPORT: &str = "San Jose restaurants\n\
        scraped 2024-11-16\n\
        r0 - 9 - early - 2 - u0 - before any business\n\
        1 - Joe's Cafe - 4.5 - 120 - - \n\
        r1 - 1 - amy - 5 - u1 - first\n\
        r2 - 1 - bob - 3 - u2 - second\n";

    /// Path to the review-loader binary built for this test run.
    fn binary() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_review-loader"))
    }

    /// Run the binary inside `dir` with a clean configuration environment.
    fn run(dir: &Path, args: &[&str]) -> Output {
        Command::new(binary())
            .args(args)
            .current_dir(dir)
            .env_remove("FILE_PATH")
            .env_remove("SUPABASE_URL")
            .env_remove("SUPABASE_ANON")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute review-loader binary")
    }

    fn workspace_with_export(content: &str) -> (TempDir, PathBuf) {
        let workspace = TempDir::new().expect("Failed to create temp workspace");
        let export_path = workspace.path().join("export.txt");
        std::fs::write(&export_path, content).expect("Failed to write export");
        (workspace, export_path)
    }

    #[test]
    fn test_parse_reports_counts() {
        let (workspace, export_path) = workspace_with_export(EXPORT);

        let output = run(
            workspace.path(),
            &["--json", "parse", "--file", export_path.to_str().unwrap()],
        );

        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let payload: Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["businesses"], 1);
        assert_eq!(payload["data"]["reviews_parsed"], 3);
        assert_eq!(payload["data"]["reviews_attached"], 2);
        assert_eq!(payload["data"]["orphaned_reviews"], 1);
        assert_eq!(payload["data"]["source"]["bytes"], EXPORT.len());
    }

    #[test]
    fn test_parse_header_only_fails() {
        let (workspace, export_path) = workspace_with_export("header\nheader\n");

        let output = run(
            workspace.path(),
            &["--json", "parse", "--file", export_path.to_str().unwrap()],
        );

        assert_eq!(output.status.code(), Some(1));
        let payload: Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error"]["kind"], "NoRecords");
    }

    #[test]
    fn test_upload_without_credentials_fails_before_work() {
        // The export is invalid: a config failure proves it was never read.
        let (workspace, export_path) = workspace_with_export("h\nh\n1 - X - abc - 10\n");

        let output = run(
            workspace.path(),
            &["upload", "--file", export_path.to_str().unwrap()],
        );

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("SUPABASE_URL is not set"), "stderr: {}", stderr);
    }

    #[test]
    fn test_upload_reads_dotenv_file() {
        let (workspace, export_path) = workspace_with_export("h\nh\n1 - X - abc - 10\n");
        std::fs::write(
            workspace.path().join(".env"),
            format!(
                "FILE_PATH={}\nSUPABASE_URL=http://127.0.0.1:9\nSUPABASE_ANON=anon\n",
                export_path.display()
            ),
        )
        .expect("Failed to write .env");

        let output = run(workspace.path(), &["--json", "upload"]);

        // Configuration resolved from .env, so the run gets as far as parsing.
        assert_eq!(output.status.code(), Some(1));
        let payload: Value =
            serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
        assert_eq!(payload["error"]["kind"], "InvalidNumber");
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        let workspace = TempDir::new().expect("Failed to create temp workspace");
        let output = run(workspace.path(), &[]);
        assert!(!output.status.success());
    }
}
