use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "notification_orchestrator_lambda";
const LAMBDA_BINARY: &str = "notification_orchestrator";
const FUNCTION_NAME: &str = "care-giver-notification-orchestrator";
const BOOTSTRAP_ENTRY: &str = "bootstrap";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the notification orchestrator workspace",
    long_about = "Runs CI checks and packages the scheduled notification\n\
                  orchestrator Lambda for deployment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build and package the Lambda `bootstrap` zip for Terraform inputs
    ServerlessPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory the zip is written to
        #[arg(long, env = "LAMBDA_DIST_DIR", default_value = "infra/dist")]
        dist_dir: String,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Workspace tests
    Test,
    /// Lint + test
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_lambda(target: &str, profile: BuildProfile, dist_dir: &Path) {
    if let Err(message) = check_rust_target(target) {
        eprintln!("error: {message}");
        exit(1);
    }

    step("Build notification orchestrator lambda");

    let mut cargo_args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--target",
        target,
        "--bin",
        LAMBDA_BINARY,
    ];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Package Terraform lambda zip artifact");
    let binary_path = Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(LAMBDA_BINARY);
    let zip_path = dist_dir.join(format!("{FUNCTION_NAME}.zip"));

    if let Err(message) = write_lambda_zip(&binary_path, dist_dir, &zip_path) {
        eprintln!("error: {message}");
        exit(1);
    }
    eprintln!("\nPackaged artifact:\n- {}", zip_path.display());
}

/// Fails when rustup reports the target missing; a missing rustup only warns.
fn check_rust_target(target: &str) -> Result<(), String> {
    let output = match Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        Ok(output) => output,
        Err(error) => {
            eprintln!("warning: rustup unavailable ({error}); skipping target check for `{target}`");
            return Ok(());
        }
    };

    if !output.status.success() {
        return Err(format!(
            "`rustup target list --installed` failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    let installed = String::from_utf8_lossy(&output.stdout);
    if installed.lines().any(|line| line.trim() == target) {
        Ok(())
    } else {
        Err(format!(
            "rust target `{target}` is not installed; run `rustup target add {target}`"
        ))
    }
}

fn write_lambda_zip(binary_path: &Path, dist_dir: &Path, zip_path: &Path) -> Result<(), String> {
    let binary = fs::read(binary_path).map_err(|error| {
        format!("failed to read lambda binary '{}': {error}", binary_path.display())
    })?;
    fs::create_dir_all(dist_dir)
        .map_err(|error| format!("failed to create '{}': {error}", dist_dir.display()))?;
    let file = fs::File::create(zip_path)
        .map_err(|error| format!("failed to create '{}': {error}", zip_path.display()))?;

    write_bootstrap_zip(file, &binary)
        .map(|_| ())
        .map_err(|error| format!("failed to write '{}': {error}", zip_path.display()))
}

/// The provided.al2 runtime executes the archive's `bootstrap` entry.
fn write_bootstrap_zip<W: Write + Seek>(writer: W, binary: &[u8]) -> ZipResult<W> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file(BOOTSTRAP_ENTRY, options)?;
    zip.write_all(binary)?;
    zip.finish()
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_lint() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test notification_orchestrator_core");
    run_cargo(&["test", "-p", "notification_orchestrator_core"]);

    step("Test notification_orchestrator_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);

    step("Test xtask");
    run_cargo(&["test", "-p", "xtask"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { job } => {
            match job {
                CiJob::Lint => ci_lint(),
                CiJob::Test => ci_test(),
                CiJob::Check => {
                    ci_lint();
                    ci_test();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage {
            target,
            profile,
            dist_dir,
        } => {
            package_lambda(&target, profile, Path::new(&dist_dir));
        }
    }
}
