use crate::Result;
use crate::utils::{self, FeatureSet, Target};

/// Runs the test suites of the workspace crates.
///
/// The core crate is tested with default features, with `log` and with everything
/// enabled, so logging call sites and the time helpers are compiled into the tests.
///
/// # Errors
///
/// Returns an error if any test run fails
pub fn run_tests() -> Result<()> {
    utils::print_header("Running tests for workspace crates...");

    for features in FeatureSet::ALL.into_iter().filter(|f| f.covers_adapters()) {
        let name = format!("{} ({features})", utils::CORE_CRATE);

        utils::print_step("Testing", &name);
        utils::run_cargo("test", Target::Package(utils::CORE_CRATE), features.cargo_args())?;
        utils::print_step_success(&name);
    }

    for name in utils::get_workspace_crates()? {
        if name != utils::CORE_CRATE {
            utils::print_step("Testing", &name);
            utils::run_cargo("test", Target::Package(&name), &["--all-features"])?;
            utils::print_step_success(&name);
        }
    }

    utils::print_success("✓ All tests passed!");
    Ok(())
}
