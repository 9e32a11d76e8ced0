//! Validation-gated packaging of a skill directory into a `.skill` zip archive.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use {
    tempfile::NamedTempFile,
    tracing::{debug, info, warn},
    walkdir::WalkDir,
    zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions},
};

use crate::{
    error::{Error, Result},
    validate::validate_skill,
};

/// File extension of packaged skills.
pub const ARCHIVE_EXTENSION: &str = "skill";

/// Validate `skill_dir` and write `<output_dir>/<folder>.skill`.
///
/// `output_dir` defaults to the current working directory and is created
/// when missing. An existing archive at the destination is replaced.
/// Nothing is written when validation reports any diagnostic.
pub fn package_skill(skill_dir: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    if !skill_dir.is_dir() {
        return Err(Error::not_found(skill_dir));
    }
    let skill_dir = fs::canonicalize(skill_dir)?;

    let report = validate_skill(&skill_dir);
    if !report.valid {
        return Err(Error::ValidationFailed {
            diagnostics: report.diagnostics,
        });
    }

    let destination = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    fs::create_dir_all(&destination)?;
    let destination = fs::canonicalize(&destination)?;

    let folder = skill_dir
        .file_name()
        .ok_or_else(|| Error::not_found(&skill_dir))?
        .to_string_lossy()
        .into_owned();
    let archive_path = destination.join(format!("{folder}.{ARCHIVE_EXTENSION}"));

    let entries = write_archive(&skill_dir, &archive_path)?;
    info!(
        archive = %archive_path.display(),
        entries,
        "packaged skill"
    );
    Ok(archive_path)
}

/// Write every regular file under `skill_dir` into a deflate zip at
/// `archive_path`, named relative to the skill's parent directory.
/// Returns the number of entries written.
///
/// The zip is built in a temporary file next to `archive_path` and renamed
/// over it only once complete; a failed run leaves any previous archive intact.
fn write_archive(skill_dir: &Path, archive_path: &Path) -> Result<usize> {
    let root = skill_dir.parent().unwrap_or(skill_dir);
    let staging_dir = archive_path.parent().unwrap_or(Path::new("."));
    let staging = NamedTempFile::new_in(staging_dir)?;
    let staging_path = staging.path().to_path_buf();
    let mut zip = ZipWriter::new(staging);

    let mut written = 0;
    for entry in WalkDir::new(skill_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path == staging_path {
            continue;
        }
        if path == archive_path {
            warn!(path = %path.display(), "skipping archive inside skill directory");
            continue;
        }

        let name = archive_entry_name(path.strip_prefix(root)?);
        debug!(%name, "adding archive entry");
        zip.start_file(name, entry_options(path))?;
        let mut source = fs::File::open(path)?;
        io::copy(&mut source, &mut zip)?;
        written += 1;
    }

    let staging = zip.finish()?;
    set_archive_mode(staging.path())?;
    staging.persist(archive_path).map_err(|e| e.error)?;
    Ok(written)
}

/// Deflate with a fixed timestamp so identical trees produce identical archives.
fn entry_options(path: &Path) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    match file_mode(path) {
        Some(mode) => options.unix_permissions(mode),
        None => options,
    }
}

/// Zip entry names always use `/` separators.
fn archive_entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn file_mode(path: &Path) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).ok().map(|m| m.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> Option<u32> {
    None
}

/// Temporary files are created owner-only; archives are world-readable.
#[cfg(unix)]
fn set_archive_mode(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_archive_mode(_path: &Path) -> Result<()> {
    Ok(())
}
