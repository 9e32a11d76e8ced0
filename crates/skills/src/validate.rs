//! Structural validation of a skill directory.
//!
//! Every rule runs and reports into one ordered list so a single pass shows
//! the author everything that needs fixing. Only three conditions stop the
//! run early: a missing directory, a missing `SKILL.md`, and a manifest whose
//! header block cannot be located.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    frontmatter::{parse_frontmatter, split_frontmatter},
    references::extract_references,
    rules::{
        self, ALLOWED_DIRS, DOC_EXTENSIONS, IGNORED_ROOT_FILES, MANIFEST_FILE,
        MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MIN_DESCRIPTION_LEN, REQUIRED_KEYS, REQUIRED_SECTIONS,
        SCRIPT_EXTENSIONS,
    },
    types::{Diagnostic, Frontmatter, ValidationReport},
};

/// A root-level directory entry, read once and sorted by name.
struct RootEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Validate the skill directory at `skill_dir`.
pub fn validate_skill(skill_dir: &Path) -> ValidationReport {
    let report = ValidationReport::from_diagnostics(collect_diagnostics(skill_dir));
    debug!(
        skill_dir = %skill_dir.display(),
        valid = report.valid,
        diagnostics = report.diagnostics.len(),
        "validated skill directory"
    );
    report
}

fn collect_diagnostics(skill_dir: &Path) -> Vec<Diagnostic> {
    if !skill_dir.is_dir() {
        return vec![Diagnostic::new(format!(
            "Skill directory does not exist: {}",
            skill_dir.display()
        ))];
    }

    let manifest_path = skill_dir.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        return vec![Diagnostic::new(format!("{MANIFEST_FILE} not found"))];
    }

    let mut diagnostics = Vec::new();

    if skill_dir.join("README.md").exists() {
        diagnostics.push(Diagnostic::new(
            "README.md should not exist in a skill folder",
        ));
    }

    let entries = match read_root_entries(skill_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(skill_dir = %skill_dir.display(), error = %e, "failed to list skill directory");
            diagnostics.push(Diagnostic::new(format!(
                "Failed to list skill directory {}: {e}",
                skill_dir.display()
            )));
            Vec::new()
        },
    };
    check_directories(&entries, &mut diagnostics);
    check_misplaced_files(&entries, &mut diagnostics);

    let content = match fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) => return vec![Diagnostic::new(format!("Failed to read {MANIFEST_FILE}: {e}"))],
    };
    let (header, body) = match split_frontmatter(&content) {
        Ok(parts) => parts,
        Err(e) => {
            debug!(path = %manifest_path.display(), "manifest header block not found");
            return vec![Diagnostic::new(e.to_string())];
        },
    };
    let frontmatter = parse_frontmatter(header);

    check_required_keys(&frontmatter, &mut diagnostics);
    check_unexpected_keys(&frontmatter, &mut diagnostics);
    if let Some(name) = frontmatter.get("name") {
        check_name(name, &folder_name(skill_dir), &mut diagnostics);
    }
    if let Some(description) = frontmatter.get("description") {
        check_description(description, &mut diagnostics);
    }

    check_sections(body, &mut diagnostics);
    check_references(skill_dir, body, &mut diagnostics);

    diagnostics
}

fn read_root_entries(skill_dir: &Path) -> std::io::Result<Vec<RootEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(skill_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        entries.push(RootEntry {
            is_dir: path.is_dir(),
            name,
            path,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Folder name used for the `name` match, resolved so `.` and trailing
/// separators still yield the real directory name.
fn folder_name(skill_dir: &Path) -> String {
    let resolved = fs::canonicalize(skill_dir).unwrap_or_else(|_| skill_dir.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn check_directories(entries: &[RootEntry], diagnostics: &mut Vec<Diagnostic>) {
    for entry in entries.iter().filter(|e| e.is_dir) {
        if ALLOWED_DIRS.contains(&entry.name.as_str()) {
            continue;
        }
        let message = match rules::suggest_directory(&entry.name) {
            Some(suggestion) => format!(
                "Non-allowed directory '{}/' in skill root - rename to {suggestion}/",
                entry.name
            ),
            None => format!(
                "Non-allowed directory '{}/' in skill root - only references/, scripts/, and assets/ are permitted",
                entry.name
            ),
        };
        diagnostics.push(Diagnostic::new(message));
    }
}

fn check_misplaced_files(entries: &[RootEntry], diagnostics: &mut Vec<Diagnostic>) {
    for entry in entries.iter().filter(|e| !e.is_dir) {
        if IGNORED_ROOT_FILES.contains(&entry.name.as_str()) {
            continue;
        }
        let Some(extension) = entry.path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let target = if DOC_EXTENSIONS.contains(&extension) {
            "references"
        } else if SCRIPT_EXTENSIONS.contains(&extension) {
            "scripts"
        } else {
            continue;
        };
        diagnostics.push(Diagnostic::new(format!(
            "Misplaced file '{}' in skill root - move to {target}/",
            entry.name
        )));
    }
}

fn check_required_keys(frontmatter: &Frontmatter, diagnostics: &mut Vec<Diagnostic>) {
    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !frontmatter.contains_key(key))
        .collect();
    if !missing.is_empty() {
        diagnostics.push(Diagnostic::new(format!(
            "Missing required frontmatter field(s): {}",
            missing.join(", ")
        )));
    }
}

fn check_unexpected_keys(frontmatter: &Frontmatter, diagnostics: &mut Vec<Diagnostic>) {
    let mut unexpected: Vec<&str> = frontmatter
        .keys()
        .filter(|key| !rules::is_allowed_key(key))
        .collect();
    if unexpected.is_empty() {
        return;
    }
    unexpected.sort_unstable();
    diagnostics.push(Diagnostic::new(format!(
        "Unexpected frontmatter key(s): {}. Allowed keys: {}",
        unexpected.join(", "),
        rules::allowed_keys_listing()
    )));
}

fn check_name(name: &str, folder: &str, diagnostics: &mut Vec<Diagnostic>) {
    if !rules::is_kebab_case(name) {
        diagnostics.push(Diagnostic::new(
            "name must be kebab-case with lowercase letters, numbers, and single hyphens",
        ));
    }
    if rules::contains_reserved_word(name) {
        diagnostics.push(Diagnostic::new(
            "name cannot contain reserved words 'claude' or 'anthropic'",
        ));
    }
    if !rules::name_within_limit(name) {
        diagnostics.push(Diagnostic::new(format!(
            "name must be {MAX_NAME_LEN} characters or fewer"
        )));
    }
    if name != folder {
        diagnostics.push(Diagnostic::new(format!(
            "name must match folder name: expected '{folder}', got '{name}'"
        )));
    }
}

fn check_description(description: &str, diagnostics: &mut Vec<Diagnostic>) {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        diagnostics.push(Diagnostic::new(format!(
            "description must be {MAX_DESCRIPTION_LEN} characters or fewer"
        )));
    }
    if description.contains(['<', '>']) {
        diagnostics.push(Diagnostic::new("description cannot contain '<' or '>'"));
    }
    if len < MIN_DESCRIPTION_LEN {
        diagnostics.push(Diagnostic::new(
            "description is too short to be useful; include what it does and trigger phrases",
        ));
    }
}

fn check_sections(body: &str, diagnostics: &mut Vec<Diagnostic>) {
    for section in REQUIRED_SECTIONS {
        if !body.contains(section) {
            diagnostics.push(Diagnostic::new(format!(
                "Missing required section: {section}"
            )));
        }
    }
}

fn check_references(skill_dir: &Path, body: &str, diagnostics: &mut Vec<Diagnostic>) {
    for reference in extract_references(body) {
        if !skill_dir.join(&reference).exists() {
            debug!(%reference, "referenced path missing");
            diagnostics.push(Diagnostic::new(format!(
                "Referenced path does not exist: {reference}"
            )));
        }
    }
}
