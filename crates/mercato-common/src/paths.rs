//! Path utilities for uploaded and stored images.
//!
//! Uploads are screened by extension only; the bytes are never sniffed.

use std::path::{Component, Path};

/// Extensions accepted for uploaded images.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Check if a path carries one of the allowed image extensions.
///
/// The comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mercato_common::paths::is_allowed_image;
///
/// assert!(is_allowed_image(Path::new("photo.jpg")));
/// assert!(is_allowed_image(Path::new("photo.JPEG")));
/// assert!(!is_allowed_image(Path::new("photo.gif")));
/// assert!(!is_allowed_image(Path::new("photo")));
/// ```
pub fn is_allowed_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check that `name` is a bare filename: exactly one normal path component.
///
/// Rejects empty names, `.` and `..`, absolute paths and anything containing
/// a separator, so joining the result onto a directory cannot escape it.
///
/// # Examples
///
/// ```
/// use mercato_common::paths::is_plain_file_name;
///
/// assert!(is_plain_file_name("abc123.jpg"));
/// assert!(!is_plain_file_name("../etc/passwd"));
/// assert!(!is_plain_file_name("/etc/passwd"));
/// assert!(!is_plain_file_name("sub/dir.jpg"));
/// ```
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Content type to serve for a stored file, chosen by extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
