use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Lambda binaries shipped by the word-count pipeline.
const LAMBDA_BINARIES: [&str; 4] = [
    "presign_lambda",
    "word_counter_lambda",
    "word_count_writer_lambda",
    "top_words_lambda",
];

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the word-count pipeline workspace",
    long_about = "A unified CLI for CI checks and Lambda packaging in the\n\
                  word-count pipeline workspace."
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
    /// Build and package every Lambda binary as a `bootstrap` zip
    ServerlessPackage {
        /// Compilation target triple for Lambda binaries
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for binaries
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving the zip artifacts
        #[arg(long, env = "LAMBDA_DIST_DIR", default_value = "dist/lambda")]
        dist_dir: String,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Lint,
    /// Unit and integration tests
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

fn package_serverless_lambdas(target: &str, profile: BuildProfile, dist_dir: &Path) {
    ensure_rust_target_installed(target);

    step("Build lambda binaries");

    let mut cargo_args = vec!["build", "-p", "wordcount_lambda", "--target", target];
    for bin in LAMBDA_BINARIES {
        cargo_args.extend(["--bin", bin]);
    }
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Package lambda zip artifacts");
    let target_dir = Path::new("target").join(target).join(profile.dir_name());
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");

    let mut packaged = Vec::with_capacity(LAMBDA_BINARIES.len());
    for bin in LAMBDA_BINARIES {
        let zip_path = dist_dir.join(format!("{bin}.zip"));
        package_lambda_zip(&built_binary(&target_dir, bin, target), &zip_path);
        packaged.push(zip_path);
    }

    eprintln!("\nPackaged artifacts:");
    for path in packaged {
        eprintln!("- {}", path.display());
    }
}

/// Fails early when the cross target is missing; skips the check when rustup
/// itself is unavailable.
fn ensure_rust_target_installed(target: &str) {
    let installed = match Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        Ok(output) if output.status.success() => output.stdout,
        Ok(output) => panic!(
            "rustup could not list installed targets: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ),
        Err(error) => {
            eprintln!("warning: rustup unavailable ({error}); skipping target check");
            return;
        }
    };

    let installed = String::from_utf8_lossy(&installed);
    if !installed.lines().any(|line| line.trim() == target) {
        panic!("target `{target}` is not installed; run `rustup target add {target}` first");
    }
}

fn built_binary(target_dir: &Path, bin: &str, target: &str) -> PathBuf {
    let file_name = if target.contains("windows") {
        format!("{bin}.exe")
    } else {
        bin.to_string()
    };
    target_dir.join(file_name)
}

/// Writes `binary_path` as the single executable `bootstrap` entry the
/// `provided.al2023` runtime expects.
fn package_lambda_zip(binary_path: &Path, zip_path: &Path) {
    let binary = fs::read(binary_path)
        .unwrap_or_else(|error| panic!("cannot read {}: {error}", binary_path.display()));
    let file = fs::File::create(zip_path)
        .unwrap_or_else(|error| panic!("cannot create {}: {error}", zip_path.display()));

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .and_then(|()| zip.write_all(&binary).map_err(Into::into))
        .and_then(|()| zip.finish().map(drop))
        .unwrap_or_else(|error| panic!("cannot write {}: {error}", zip_path.display()));
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_lint() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);
}

fn ci_test() {
    step("Test wordcount_core");
    run_cargo(&["test", "-p", "wordcount_core"]);

    step("Test wordcount_lambda");
    run_cargo(&["test", "-p", "wordcount_lambda"]);
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
            package_serverless_lambdas(&target, profile, Path::new(&dist_dir));
        }
    }
}
