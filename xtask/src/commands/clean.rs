use crate::Result;
use crate::utils;
use std::path::Path;

/// Removes build artifacts of the workspace and every demo.
///
/// Demos are standalone projects with their own target directories, so each one is
/// cleaned separately. Individual clean failures are ignored.
///
/// # Errors
///
/// Returns an error if the demos cannot be discovered
pub fn clean_all() -> Result<()> {
    utils::print_header("Cleaning all build artifacts...");

    utils::run_cargo_clean(Path::new("."));

    for demo in utils::get_demos()? {
        utils::print_step("Cleaning", &demo.name);
        utils::run_cargo_clean(&demo.dir);
    }

    utils::print_success("✓ All build artifacts cleaned!");
    Ok(())
}
