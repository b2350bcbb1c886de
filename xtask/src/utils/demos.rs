use crate::Result;
use std::fs;
use std::path::PathBuf;

const DEMOS_DIR: &str = "demos";

/// Demos that only build on Unix, as they set the system clock with `date`
const UNIX_ONLY: &[&str] = &["timesync"];

/// A standalone demo project with its own `Cargo.toml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demo {
    pub name: String,
    pub dir: PathBuf,
}

impl Demo {
    #[must_use]
    pub fn unix_only(&self) -> bool {
        UNIX_ONLY.contains(&self.name.as_str())
    }

    /// Whether the demo can be built on the host
    #[must_use]
    pub fn supported(&self) -> bool {
        cfg!(unix) || !self.unix_only()
    }
}

/// Discovers demo projects: subdirectories of `demos/` containing a `Cargo.toml`.
///
/// # Errors
///
/// Returns an error if an entry of the `demos` directory cannot be read. A missing
/// `demos` directory yields no demos
pub fn get_demos() -> Result<Vec<Demo>> {
    let mut demos = Vec::new();

    let Ok(entries) = fs::read_dir(DEMOS_DIR) else {
        return Ok(demos);
    };

    for entry in entries {
        let dir = entry?.path();
        if dir.join("Cargo.toml").is_file()
            && let Some(name) = dir.file_name().and_then(|n| n.to_str())
        {
            demos.push(Demo {
                name: name.to_string(),
                dir: dir.clone(),
            });
        }
    }

    demos.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(demos)
}
