use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use once_cell::sync::Lazy;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time;

use crate::config::constants::STATIC_CHECK_NOT_APPLICABLE;
use crate::enums::language::Language;

/// Which stream carries the tool's diagnostics. Compiler-family tools report
/// on stderr, linter-family tools on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStream {
    Stdout,
    Stderr,
}

/// How to invoke one external tool: `<program> <args...> <path>`.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub report_stream: ReportStream,
    /// Reported when the tool succeeds with no output; an empty report would
    /// be ambiguous with "did not run".
    pub empty_message: &'static str,
}

const LINTER_CLEAN: &str = "[Linter] No issues found.";
const CLANG_CLEAN: &str = "[Clang] No syntax errors found.";

static TOOL_TABLE: Lazy<HashMap<Language, ToolDescriptor>> = Lazy::new(|| {
    HashMap::from([
        (
            Language::Python,
            ToolDescriptor {
                program: "pylint",
                args: &["--score=n"],
                report_stream: ReportStream::Stdout,
                empty_message: LINTER_CLEAN,
            },
        ),
        (
            Language::Swift,
            ToolDescriptor {
                program: "swiftlint",
                args: &["lint", "--path"],
                report_stream: ReportStream::Stdout,
                empty_message: LINTER_CLEAN,
            },
        ),
        (
            Language::C,
            ToolDescriptor {
                program: "clang",
                args: &["-fsyntax-only"],
                report_stream: ReportStream::Stderr,
                empty_message: CLANG_CLEAN,
            },
        ),
        (
            Language::Cpp,
            ToolDescriptor {
                program: "clang",
                args: &["-fsyntax-only"],
                report_stream: ReportStream::Stderr,
                empty_message: CLANG_CLEAN,
            },
        ),
    ])
});

pub fn descriptor_for(language: Language) -> Option<&'static ToolDescriptor> {
    TOOL_TABLE.get(&language)
}

/// Runs the per-language external tool against a file on disk. Every outcome
/// (report, empty, timeout, tool missing, execution error) is returned as
/// report text; nothing here is fatal to the batch.
pub struct StaticAnalyzer {
    timeout: Duration,
}

impl StaticAnalyzer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn analyze(&self, path: &Path, language: Language) -> String {
        match descriptor_for(language) {
            Some(descriptor) => self.run_tool(descriptor, path).await,
            None => format!(
                "{} (no static analyzer configured for this language)",
                STATIC_CHECK_NOT_APPLICABLE
            ),
        }
    }

    pub async fn run_tool(&self, descriptor: &ToolDescriptor, path: &Path) -> String {
        let mut command = Command::new(descriptor.program);
        command
            .args(descriptor.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return format!(
                    "[Error] Static analysis tool '{}' is not installed or not on PATH.",
                    descriptor.program
                );
            }
            Err(e) => {
                return format!("Unexpected error while running the static check: {}", e);
            }
        };

        let mut stdout_pipe = child.stdout.take();
        let mut stderr_pipe = child.stderr.take();
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        // Drain both pipes while waiting so a chatty tool cannot deadlock on
        // a full pipe buffer.
        let waited = time::timeout(self.timeout, async {
            let stdout_read = async {
                if let Some(pipe) = stdout_pipe.as_mut() {
                    let _ = pipe.read_to_end(&mut stdout_buf).await;
                }
            };
            let stderr_read = async {
                if let Some(pipe) = stderr_pipe.as_mut() {
                    let _ = pipe.read_to_end(&mut stderr_buf).await;
                }
            };
            let (status, _, _) = tokio::join!(child.wait(), stdout_read, stderr_read);
            status
        })
        .await;

        match waited {
            Ok(Ok(_status)) => {
                let report = match descriptor.report_stream {
                    ReportStream::Stdout => String::from_utf8_lossy(&stdout_buf),
                    ReportStream::Stderr => String::from_utf8_lossy(&stderr_buf),
                };
                let report = report.trim();
                if report.is_empty() {
                    descriptor.empty_message.to_string()
                } else {
                    report.to_string()
                }
            }
            Ok(Err(e)) => format!("Unexpected error while running the static check: {}", e),
            Err(_elapsed) => {
                // Kill and fully reap the child before reporting; no orphans.
                if let Err(e) = child.kill().await {
                    log::warn!("Failed to reap timed-out '{}': {}", descriptor.program, e);
                }
                format!(
                    "Static check timed out (exceeded {} seconds).",
                    self.timeout.as_secs()
                )
            }
        }
    }
}
