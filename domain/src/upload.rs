pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Lowercased text after the last dot of an uploaded file name, if any.
#[must_use]
pub fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .map(str::to_ascii_lowercase)
}

#[must_use]
pub fn has_allowed_extension<S: AsRef<str>>(file_name: &str, allowed: &[S]) -> bool {
    file_extension(file_name).is_some_and(|ext| {
        allowed
            .iter()
            .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(&ext))
    })
}
