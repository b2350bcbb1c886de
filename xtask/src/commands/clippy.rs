use crate::Result;
use crate::utils::{self, FeatureSet, Target};

/// Runs clippy with `clippy::all` and `clippy::pedantic` denied on the core crate in
/// every feature set, then on the other workspace crates and the demos.
///
/// Test and bench targets are linted as well, except without `std` where they cannot
/// be built.
///
/// # Errors
///
/// Returns an error if clippy cannot be run or reports any finding
pub fn run_clippy() -> Result<()> {
    utils::print_header("Running Clippy with strict linting on all code...");

    for features in FeatureSet::ALL {
        let name = format!("{} ({features})", utils::CORE_CRATE);
        let mut args = features.cargo_args().to_vec();

        if features.covers_adapters() {
            args.push("--all-targets");
        }

        utils::print_step("Clippy", &name);
        if let Err(e) = utils::run_cargo_clippy(Target::Package(utils::CORE_CRATE), &args) {
            utils::print_error(&format!("✗ Clippy found issues in {name}"));
            return Err(e);
        }
        utils::print_step_success(&name);
    }

    for name in utils::get_workspace_crates()? {
        if name == utils::CORE_CRATE {
            continue;
        }

        utils::print_step("Clippy", &name);
        utils::run_cargo_clippy(Target::Package(&name), &["--all-targets", "--all-features"])?;
        utils::print_step_success(&name);
    }

    for demo in utils::get_demos()?.into_iter().filter(utils::Demo::supported) {
        utils::print_step("Clippy", &format!("Demo: {}", demo.name));
        utils::run_cargo_clippy(Target::Dir(&demo.dir), &[])?;
        utils::print_step_success(&demo.name);
    }

    utils::print_success("✓ All Clippy checks passed!");
    Ok(())
}
