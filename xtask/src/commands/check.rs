use crate::Result;
use crate::utils::{self, FeatureSet, Target};

/// Type-checks the core crate in every feature set, the remaining workspace crates and
/// the demos.
///
/// # Errors
///
/// Returns an error if discovery fails or any crate does not check
pub fn check_all() -> Result<()> {
    utils::print_header("Checking workspace crates and demos...");

    for features in FeatureSet::ALL {
        let name = format!("{} ({features})", utils::CORE_CRATE);

        utils::print_step("Checking", &name);
        utils::run_cargo("check", Target::Package(utils::CORE_CRATE), features.cargo_args())?;
        utils::print_step_success(&name);
    }

    for name in utils::get_workspace_crates()? {
        if name != utils::CORE_CRATE {
            utils::print_step("Checking", &name);
            utils::run_cargo("check", Target::Package(&name), &["--all-features"])?;
            utils::print_step_success(&name);
        }
    }

    for demo in utils::get_demos()?.into_iter().filter(utils::Demo::supported) {
        utils::print_step("Checking", &format!("Demo: {}", demo.name));
        utils::run_cargo("check", Target::Dir(&demo.dir), &[])?;
        utils::print_step_success(&demo.name);
    }

    utils::print_success("✓ All checks passed!");
    Ok(())
}
