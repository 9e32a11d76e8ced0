//! Starter layout for a new skill.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    error::{Error, Result},
    rules::{self, ALLOWED_DIRS, MANIFEST_FILE},
};

const TEMPLATE_SKILL_MD: &str = r#"---
name: {skill_name}
description: <Describe what this skill does and the phrases that should trigger it.>
---

# {skill_title}

# Instructions

### Step 1: [First Step]

[TODO: Add specific, actionable instructions.]

### Step 2: [Second Step]

[TODO: Add specific, actionable instructions.]

## Examples

### Example 1: [Common Scenario]

User says: "[trigger phrase]"

Actions:
1. [First action]
2. [Second action]

Result: [Expected outcome]

## Troubleshooting

### Error: [Common error]

Cause: [Why it happens]
Solution: [How to fix it]
"#;

const TEMPLATE_REFERENCE: &str = "# Reference Notes

Store detailed documentation that should only be loaded when needed.
";

const TEMPLATE_SCRIPT: &str = r#"#!/usr/bin/env python3
"""Example helper script. Replace or delete as needed."""


def main() -> None:
    print("example helper")


if __name__ == "__main__":
    main()
"#;

const TEMPLATE_ASSET: &str = "Placeholder asset file.

Store templates, boilerplate, or static resources in this directory.
";

pub const EXAMPLE_SCRIPT: &str = "scripts/example.py";
pub const EXAMPLE_REFERENCE: &str = "references/guide.md";
pub const EXAMPLE_ASSET: &str = "assets/README.txt";

/// Check a proposed skill name, returning the first rule it breaks.
pub fn check_skill_name(name: &str) -> Result<()> {
    if !rules::is_kebab_case(name) {
        return Err(Error::invalid_name(
            "Skill name must be kebab-case (lowercase letters, numbers, single hyphens).",
        ));
    }
    if !rules::name_within_limit(name) {
        return Err(Error::invalid_name(format!(
            "Skill name must be {} characters or fewer.",
            rules::MAX_NAME_LEN
        )));
    }
    if rules::contains_reserved_word(name) {
        return Err(Error::invalid_name(
            "Skill name cannot contain reserved words 'claude' or 'anthropic'.",
        ));
    }
    Ok(())
}

/// `pdf-form-filler` becomes `Pdf Form Filler`.
pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Render the starter `SKILL.md` for `name`.
pub fn render_manifest(name: &str) -> String {
    TEMPLATE_SKILL_MD
        .replace("{skill_name}", name)
        .replace("{skill_title}", &title_case(name))
}

/// Create `<output_root>/<name>` with the standard subdirectories and
/// starter files. Returns the new skill directory.
pub fn init_skill(name: &str, output_root: &Path) -> Result<PathBuf> {
    check_skill_name(name)?;

    let skill_dir = output_root.join(name);
    if skill_dir.exists() {
        return Err(Error::AlreadyExists { path: skill_dir });
    }

    fs::create_dir_all(&skill_dir)?;
    for dir in ALLOWED_DIRS {
        fs::create_dir(skill_dir.join(dir))?;
    }

    fs::write(skill_dir.join(MANIFEST_FILE), render_manifest(name))?;
    let script = skill_dir.join(EXAMPLE_SCRIPT);
    fs::write(&script, TEMPLATE_SCRIPT)?;
    make_executable(&script)?;
    fs::write(skill_dir.join(EXAMPLE_REFERENCE), TEMPLATE_REFERENCE)?;
    fs::write(skill_dir.join(EXAMPLE_ASSET), TEMPLATE_ASSET)?;

    info!(skill = name, path = %skill_dir.display(), "created skill skeleton");
    Ok(skill_dir)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{frontmatter, validate::validate_skill},
        rstest::rstest,
        walkdir::WalkDir,
    };

    #[rstest]
    #[case("notes-taker", "Notes Taker")]
    #[case("pdf", "Pdf")]
    #[case("a-b-c", "A B C")]
    #[case("v2-api", "V2 Api")]
    fn titles(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(title_case(name), expected);
    }

    #[rstest]
    #[case("My_Skill", "kebab-case")]
    #[case("bad--name", "kebab-case")]
    #[case("", "kebab-case")]
    #[case("claude-helper", "reserved words")]
    fn rejects_bad_names(#[case] name: &str, #[case] fragment: &str) {
        let err = check_skill_name(name).unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }));
        assert!(err.to_string().contains(fragment), "{err}");
    }

    #[test]
    fn length_is_checked_before_reserved_words() {
        let name = format!("claude-{}", "a".repeat(64));
        let err = check_skill_name(&name).unwrap_err();
        assert_eq!(err.to_string(), "Skill name must be 64 characters or fewer.");
    }

    #[test]
    fn scaffold_creates_expected_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = init_skill("notes-taker", tmp.path()).unwrap();
        assert_eq!(dir, tmp.path().join("notes-taker"));

        let mut listing: Vec<String> = WalkDir::new(&dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|e| {
                let e = e.unwrap();
                let rel = e
                    .path()
                    .strip_prefix(&dir)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                if e.file_type().is_dir() {
                    format!("{rel}/")
                } else {
                    rel
                }
            })
            .collect();
        listing.sort();
        assert_eq!(listing, vec![
            "SKILL.md",
            "assets/",
            "assets/README.txt",
            "references/",
            "references/guide.md",
            "scripts/",
            "scripts/example.py",
        ]);
    }

    #[cfg(unix)]
    #[test]
    fn example_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dir = init_skill("notes-taker", tmp.path()).unwrap();
        let mode = fs::metadata(dir.join(EXAMPLE_SCRIPT)).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn manifest_substitutes_name_and_title() {
        let content = render_manifest("notes-taker");
        let (header, body) = frontmatter::split_frontmatter(&content).unwrap();
        let fm = frontmatter::parse_frontmatter(header);
        assert_eq!(fm.get("name"), Some("notes-taker"));
        assert!(body.contains("# Notes Taker\n"));
        assert!(!content.contains("{skill_"));
    }

    #[test]
    fn existing_directory_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("notes-taker")).unwrap();
        let err = init_skill("notes-taker", tmp.path()).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
        assert!(err.to_string().starts_with("Skill directory already exists: "));
    }

    #[test]
    fn invalid_name_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(init_skill("Bad Name", tmp.path()).is_err());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn output_root_is_created_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nested/skills");
        let dir = init_skill("notes-taker", &root).unwrap();
        assert!(dir.join(MANIFEST_FILE).is_file());
    }

    #[test]
    fn fresh_scaffold_only_fails_on_description_placeholder() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = init_skill("notes-taker", tmp.path()).unwrap();
        let report = validate_skill(&dir);
        assert!(!report.valid);
        assert_eq!(report.messages(), vec!["description cannot contain '<' or '>'"]);
    }
}
