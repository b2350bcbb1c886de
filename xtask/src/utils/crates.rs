use crate::Result;
use std::fs;

/// Name of the core client crate
pub const CORE_CRATE: &str = "msntp";

/// Feature combinations of the core crate that are built, tested and linted
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FeatureSet {
    /// Wire codec only, `no_std`
    NoDefault,
    /// `std` client
    Default,
    /// `std` client with library logging
    Log,
    /// Everything, including the chrono based helpers
    All,
}

impl FeatureSet {
    pub const ALL: [FeatureSet; 4] = [
        FeatureSet::NoDefault,
        FeatureSet::Default,
        FeatureSet::Log,
        FeatureSet::All,
    ];

    #[must_use]
    pub fn cargo_args(self) -> &'static [&'static str] {
        match self {
            FeatureSet::NoDefault => &["--no-default-features"],
            FeatureSet::Default => &[],
            FeatureSet::Log => &["--features", "log"],
            FeatureSet::All => &["--all-features"],
        }
    }

    /// Whether other workspace members can be built alongside. They need `std`
    #[must_use]
    pub fn covers_adapters(self) -> bool {
        self != FeatureSet::NoDefault
    }
}

impl std::fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeatureSet::NoDefault => "no default features",
            FeatureSet::Default => "default features",
            FeatureSet::Log => "log",
            FeatureSet::All => "all features",
        };

        f.write_str(name)
    }
}

/// Lists the library crates of the workspace, sorted, excluding `xtask` itself.
///
/// Members are read from `workspace.members` in the root `Cargo.toml`; glob patterns are
/// expanded.
///
/// # Errors
///
/// Returns an error if the manifest is missing, cannot be parsed or has no member list
pub fn get_workspace_crates() -> Result<Vec<String>> {
    let content = fs::read_to_string("Cargo.toml")?;
    let manifest: toml::Value = toml::from_str(&content)?;

    let members = manifest
        .get("workspace")
        .and_then(|ws| ws.get("members"))
        .and_then(|m| m.as_array())
        .ok_or_else(|| anyhow::anyhow!("Failed to parse workspace members from Cargo.toml"))?;

    let mut crates = Vec::new();
    for member in members.iter().filter_map(toml::Value::as_str) {
        if member.contains('*') {
            for entry in glob::glob(member)?.flatten() {
                if let Some(name) = entry.file_name().and_then(|n| n.to_str()) {
                    crates.push(name.to_string());
                }
            }
        } else {
            crates.push(member.to_string());
        }
    }

    crates.retain(|name| name != "xtask");
    crates.sort();
    Ok(crates)
}
