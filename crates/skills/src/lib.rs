//! Skill directory tooling: header parsing, structural validation,
//! packaging, and scaffolding.
//!
//! A skill is a directory containing a `SKILL.md` file with a `---`
//! delimited header and markdown instructions, plus optional `references/`,
//! `scripts/`, and `assets/` subdirectories.

pub mod error;
pub mod frontmatter;
pub mod package;
pub mod references;
pub mod rules;
pub mod scaffold;
pub mod types;
pub mod validate;

pub use {
    error::{Error, Result},
    package::package_skill,
    scaffold::init_skill,
    types::{Diagnostic, Frontmatter, ValidationReport},
    validate::validate_skill,
};
