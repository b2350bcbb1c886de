use crate::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Where a cargo command runs: a workspace member by name or a standalone project directory
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Package(&'a str),
    Dir(&'a Path),
}

impl Target<'_> {
    fn apply(self, command: &mut Command) {
        match self {
            Target::Package(name) => {
                command.args(["--package", name]);
            }
            Target::Dir(dir) => {
                command.current_dir(dir);
            }
        }
    }
}

/// Runs `cargo <subcommand>` against `target` with extra `args`, failing on a non-zero exit
///
/// # Errors
///
/// Returns an error if cargo cannot be spawned or reports failure
pub fn run_cargo(subcommand: &str, target: Target<'_>, args: &[&str]) -> Result<()> {
    let mut command = Command::new("cargo");
    command.arg(subcommand);
    target.apply(&mut command);
    command.args(args);

    let status = command
        .status()
        .with_context(|| format!("Failed to execute cargo {subcommand} for {target:?}"))?;

    if !status.success() {
        anyhow::bail!("cargo {subcommand} failed for {target:?}");
    }

    Ok(())
}

/// Runs `cargo clippy` with the lint levels every crate in the project is held to
///
/// # Errors
///
/// Returns an error if cargo cannot be spawned or clippy reports findings
pub fn run_cargo_clippy(target: Target<'_>, args: &[&str]) -> Result<()> {
    let mut all_args = args.to_vec();
    all_args.extend_from_slice(&["--", "-D", "clippy::all", "-D", "clippy::pedantic"]);

    run_cargo("clippy", target, &all_args)
}

/// Runs `cargo fmt` in `dir`, either checking or rewriting files
///
/// # Errors
///
/// Returns an error if rustfmt reports unformatted code in check mode or fails
pub fn run_cargo_fmt(dir: &Path, fix: bool) -> Result<()> {
    let args: &[&str] = if fix { &["--all"] } else { &["--all", "--check"] };

    run_cargo("fmt", Target::Dir(dir), args)
}

/// Removes the build directory of the project in `dir`. Failures are ignored
pub fn run_cargo_clean(dir: &Path) {
    let _ = Command::new("cargo").arg("clean").current_dir(dir).output();
}
