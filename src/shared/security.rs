use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of any input document (analysis result, model document, config)
pub const MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path exists and is a regular file, returning its size
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "analysis result") for error messages
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds `max_size`
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a text file after the regular-file and size checks
///
/// # Arguments
/// * `path` - The file to read
/// * `file_description` - Description of the file for error messages
pub fn read_checked_file(path: &Path, file_description: &str) -> Result<String> {
    let size = validate_regular_file(path, file_description)?;
    validate_file_size(size, path, MAX_FILE_SIZE)?;

    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}
