use crate::Result;
use crate::utils::{self, FeatureSet, Target};

/// Builds the workspace crates with `features` applied to the core crate.
///
/// The transport adapters need `std`, so they are skipped for [`FeatureSet::NoDefault`].
///
/// # Errors
///
/// Returns an error if workspace members cannot be discovered or any build fails
pub fn build_workspace(features: FeatureSet) -> Result<()> {
    utils::print_header(&format!("Building workspace crates ({features})..."));

    utils::print_step("Building", &format!("{} ({features})", utils::CORE_CRATE));
    utils::run_cargo("build", Target::Package(utils::CORE_CRATE), features.cargo_args())?;
    utils::print_step_success(utils::CORE_CRATE);

    if features.covers_adapters() {
        for name in utils::get_workspace_crates()? {
            if name == utils::CORE_CRATE {
                continue;
            }

            utils::print_step("Building", &name);
            utils::run_cargo("build", Target::Package(&name), &[])?;
            utils::print_step_success(&name);
        }
    }

    utils::print_success("✓ Workspace crates built successfully!");
    Ok(())
}

/// Builds every demo supported on the host.
///
/// # Errors
///
/// Returns an error if demo discovery or any demo build fails
pub fn build_demos() -> Result<()> {
    utils::print_header("Building demos...");

    let demos = utils::get_demos()?;

    if demos.is_empty() {
        utils::print_warning("⚠ No demos found");
        return Ok(());
    }

    for demo in demos {
        if !demo.supported() {
            utils::print_warning(&format!("  ⚠ Skipping {}: Unix only", demo.name));
            continue;
        }

        utils::print_step("Building", &demo.name);
        if let Err(e) = utils::run_cargo("build", Target::Dir(&demo.dir), &[]) {
            utils::print_step_error(&demo.name);
            return Err(e);
        }
        utils::print_step_success(&demo.name);
    }

    utils::print_success("✓ All demos built successfully!");
    Ok(())
}

/// Builds the workspace in every feature set, then the demos.
///
/// # Errors
///
/// Returns an error if any of the builds fail
pub fn build_all() -> Result<()> {
    for features in FeatureSet::ALL {
        build_workspace(features)?;
    }

    build_demos()
}
