//! Handlers for the `init`, `validate`, and `package` commands.
//!
//! Each handler prints its own result and returns whether the command
//! succeeded. Unexpected failures (e.g. serializing the JSON report) are
//! returned as errors.

use std::path::Path;

use tracing::warn;

use skillkit_skills::{Error, init_skill, package_skill, validate_skill};

pub fn handle_init(skill_name: &str, output_root: &Path) -> anyhow::Result<bool> {
    let output_root = std::path::absolute(output_root)?;
    match init_skill(skill_name.trim(), &output_root) {
        Ok(created) => {
            println!("Created skill skeleton: {}", created.display());
            println!(
                "Next: edit SKILL.md, then run `skillkit validate` and `skillkit package`"
            );
            Ok(true)
        },
        Err(e) => {
            println!("Error: {e}");
            Ok(false)
        },
    }
}

pub fn handle_validate(skill_dir: &Path, json: bool) -> anyhow::Result<bool> {
    let skill_dir = std::path::absolute(skill_dir)?;
    let report = validate_skill(&skill_dir);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.valid {
        println!("Validation passed");
    } else {
        println!("Validation failed:");
        for diagnostic in &report.diagnostics {
            println!("- {diagnostic}");
        }
    }
    Ok(report.valid)
}

pub fn handle_package(skill_dir: &Path, output_dir: Option<&Path>) -> anyhow::Result<bool> {
    match package_skill(skill_dir, output_dir) {
        Ok(archive) => {
            println!("Packaged skill: {}", archive.display());
            Ok(true)
        },
        Err(e @ (Error::ValidationFailed { .. } | Error::NotFound { .. })) => {
            println!("{e}");
            Ok(false)
        },
        Err(e) => {
            warn!(skill_dir = %skill_dir.display(), error = %e, "packaging failed");
            println!("Error: {e}");
            Ok(false)
        },
    }
}
