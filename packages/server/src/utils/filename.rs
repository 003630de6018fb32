/// Why a requested file name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameError {
    Empty,
    /// Contains `/` or `\`.
    PathSeparator,
    /// Starts with `.`, which also covers `..`.
    Hidden,
    /// Contains NUL or other ASCII control characters.
    ControlCharacter,
}

impl FilenameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "File name cannot be empty",
            Self::PathSeparator => "Invalid file name: path separators are not allowed",
            Self::Hidden => "Invalid file name: names starting with '.' are not allowed",
            Self::ControlCharacter => "Invalid file name: control characters are not allowed",
        }
    }
}

/// Validate a name that must resolve to a file directly inside the picture
/// directory. Surrounding whitespace is ignored.
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    // Also keeps CR/LF out of response headers.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if trimmed.contains(['/', '\\']) {
        return Err(FilenameError::PathSeparator);
    }

    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}
