//! Fixed rule tables shared by the validator and the scaffolder.

use std::sync::LazyLock;

use regex::Regex;

/// Manifest file every skill directory must contain.
pub const MANIFEST_FILE: &str = "SKILL.md";

/// Header keys a manifest may declare.
pub const ALLOWED_KEYS: &[&str] = &[
    "name",
    "description",
    "license",
    "allowed-tools",
    "metadata",
    "compatibility",
];

/// Header keys a manifest must declare, in reporting order.
pub const REQUIRED_KEYS: &[&str] = &["name", "description"];

/// Subdirectories permitted at the skill root.
pub const ALLOWED_DIRS: &[&str] = &["references", "scripts", "assets"];

/// Prefixes a body reference must start with to be checked on disk.
pub const PATH_PREFIXES: &[&str] = &["references/", "scripts/", "assets/"];

/// Root-level files exempt from the misplaced-file check.
pub const IGNORED_ROOT_FILES: &[&str] = &[MANIFEST_FILE, "README.md", "LICENSE"];

pub const DOC_EXTENSIONS: &[&str] = &["md"];

pub const SCRIPT_EXTENSIONS: &[&str] = &["py", "sh", "bash"];

/// Substrings a skill name may not contain.
pub const RESERVED_WORDS: &[&str] = &["claude", "anthropic"];

/// Body headings every manifest must include.
pub const REQUIRED_SECTIONS: &[&str] = &["## Examples", "## Troubleshooting"];

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 1024;
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Common misnamed directories and the directory they belong in.
const DIR_SUGGESTIONS: &[(&str, &str)] = &[
    ("docs", "references"),
    ("doc", "references"),
    ("documentation", "references"),
    ("resources", "references"),
    ("ref", "references"),
    ("refs", "references"),
    ("guides", "references"),
    ("src", "scripts"),
    ("source", "scripts"),
    ("bin", "scripts"),
    ("lib", "scripts"),
    ("tools", "scripts"),
    ("utils", "scripts"),
    ("static", "assets"),
    ("images", "assets"),
    ("img", "assets"),
    ("templates", "assets"),
    ("media", "assets"),
    ("files", "assets"),
    ("data", "assets"),
];

static NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").ok());

/// Suggested replacement for a disallowed root directory, matched case-insensitively.
pub fn suggest_directory(name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    DIR_SUGGESTIONS
        .iter()
        .find(|(from, _)| *from == lowered)
        .map(|(_, to)| *to)
}

/// Lowercase alphanumeric segments joined by single hyphens.
pub fn is_kebab_case(name: &str) -> bool {
    NAME_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name))
}

pub fn contains_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.iter().any(|word| name.contains(word))
}

pub fn name_within_limit(name: &str) -> bool {
    name.chars().count() <= MAX_NAME_LEN
}

pub fn is_allowed_key(key: &str) -> bool {
    ALLOWED_KEYS.contains(&key)
}

/// Allowed keys sorted alphabetically, comma-separated.
pub fn allowed_keys_listing() -> String {
    let mut keys = ALLOWED_KEYS.to_vec();
    keys.sort_unstable();
    keys.join(", ")
}
