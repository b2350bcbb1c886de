use crate::Result;
use crate::utils;
use std::path::Path;

/// Checks formatting of the workspace and all demos without touching files.
///
/// # Errors
///
/// Returns an error if any project has unformatted code
pub fn check_formatting() -> Result<()> {
    utils::print_header("Checking code formatting for workspace and demos...");
    format_all(false)?;
    utils::print_success("✓ All formatting checks passed!");
    Ok(())
}

/// Formats the workspace and all demos in place.
///
/// # Errors
///
/// Returns an error if rustfmt fails on any project
pub fn fix_formatting() -> Result<()> {
    utils::print_header("Fixing code formatting for workspace and demos...");
    format_all(true)?;
    utils::print_success("✓ All formatting issues fixed!");
    Ok(())
}

fn format_all(fix: bool) -> Result<()> {
    let action = if fix { "Fixing format" } else { "Checking format" };

    utils::print_step(action, "Workspace");
    utils::run_cargo_fmt(Path::new("."), fix)?;
    utils::print_step_success("Workspace");

    for demo in utils::get_demos()? {
        utils::print_step(action, &format!("Demo: {}", demo.name));
        utils::run_cargo_fmt(&demo.dir, fix)?;
        utils::print_step_success(&demo.name);
    }

    Ok(())
}
