use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// mspdebug prints this when the rf2500 re-enumerates mid-run; the flash
/// is then retried immediately without bothering the operator.
pub const USB_DEVICE_MISSING_MARKER: &str = "usbutil: unable to find a device matching 0451:f432";

/// Output of one external tool invocation.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub status_code: i32,
    pub text: String,
}

impl CmdOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("failed to run {cmd}: {message}")]
    CommandFailed { cmd: String, message: String },
}

/// The three external collaborators the flashing loop drives. The loop only
/// looks at exit status and captured text, so tests can script this.
pub trait Toolchain {
    /// Binary search-and-replace: `<patcher> -o <output> -e <expr> <input>`.
    /// `text` carries combined stdout+stderr.
    fn patch(&self, input: &Path, output: &Path, expr: &str) -> Result<CmdOutput, ToolError>;

    /// Float helper: prints the 8-hex-digit IEEE-754 encoding of `value`.
    /// `text` carries stdout only.
    fn float_to_word(&self, value: &str) -> Result<CmdOutput, ToolError>;

    /// `<programmer> <driver> "prog <image>"`, combined output captured.
    fn program(&self, image: &Path) -> Result<CmdOutput, ToolError>;

    /// `<programmer> <driver> "verify <image>"`, combined output captured.
    fn verify(&self, image: &Path) -> Result<CmdOutput, ToolError>;
}

/// Real toolchain: bbe, the float helper and mspdebug as subprocesses.
#[derive(Debug, Clone)]
pub struct ExternalTools {
    pub patcher: PathBuf,
    pub float_helper: PathBuf,
    pub programmer: PathBuf,
    pub driver: String,
}

impl Default for ExternalTools {
    fn default() -> Self {
        Self {
            patcher: PathBuf::from("bbe"),
            float_helper: PathBuf::from("./fc"),
            programmer: PathBuf::from("mspdebug"),
            driver: "rf2500".to_string(),
        }
    }
}

impl ExternalTools {
    fn mspdebug(&self, action: &str, image: &Path) -> Result<CmdOutput, ToolError> {
        let script = format!("{action} {}", image.display());
        run_capture(&self.programmer, &[self.driver.as_str(), script.as_str()])
    }
}

impl Toolchain for ExternalTools {
    fn patch(&self, input: &Path, output: &Path, expr: &str) -> Result<CmdOutput, ToolError> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        run_capture(&self.patcher, &["-o", &output, "-e", expr, &input])
    }

    fn float_to_word(&self, value: &str) -> Result<CmdOutput, ToolError> {
        let mut cmd = Command::new(&self.float_helper);
        cmd.arg(value)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let out = cmd.output().map_err(|e| ToolError::CommandFailed {
            cmd: format!("{} {value}", self.float_helper.display()),
            message: e.to_string(),
        })?;

        Ok(CmdOutput {
            status_code: out.status.code().unwrap_or(-1),
            text: String::from_utf8_lossy(&out.stdout).to_string(),
        })
    }

    fn program(&self, image: &Path) -> Result<CmdOutput, ToolError> {
        self.mspdebug("prog", image)
    }

    fn verify(&self, image: &Path) -> Result<CmdOutput, ToolError> {
        self.mspdebug("verify", image)
    }
}

fn run_capture(program: &Path, args: &[&str]) -> Result<CmdOutput, ToolError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let out = cmd.output().map_err(|e| ToolError::CommandFailed {
        cmd: format!("{} {}", program.display(), args.join(" ")),
        message: e.to_string(),
    })?;

    let mut text = String::new();
    text.push_str(&String::from_utf8_lossy(&out.stdout));
    text.push_str(&String::from_utf8_lossy(&out.stderr));

    let status_code = out.status.code().unwrap_or(-1);
    tracing::debug!(program = %program.display(), status_code, "external tool finished");

    Ok(CmdOutput { status_code, text })
}
