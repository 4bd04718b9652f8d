use crate::TransferError;

/// Longest folder name accepted before any request is made.
pub const MAX_FOLDER_NAME_LEN: usize = 100;

/// Validates a folder name against `^[A-Za-z0-9_-]+$`, at most
/// [`MAX_FOLDER_NAME_LEN`] characters.
///
/// Rejects:
/// - Empty names
/// - Names longer than the limit
/// - Whitespace, path separators and any other punctuation
/// - Non-ASCII letters and digits
pub fn validate_folder_name(name: &str) -> Result<(), TransferError> {
    if name.is_empty() {
        return Err(TransferError::InvalidFolderName(
            "folder name is required".into(),
        ));
    }

    let len = name.chars().count();
    if len > MAX_FOLDER_NAME_LEN {
        return Err(TransferError::InvalidFolderName(format!(
            "folder name is {len} characters, at most {MAX_FOLDER_NAME_LEN} allowed"
        )));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(TransferError::InvalidFolderName(format!(
            "invalid character {bad:?}: only letters, digits, '-' and '_' are allowed"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert!(validate_folder_name("").is_err());
    }

    #[test]
    fn rejects_space() {
        assert!(validate_folder_name("a b").is_err());
    }

    #[test]
    fn rejects_slash() {
        assert!(validate_folder_name("a/b").is_err());
    }

    #[test]
    fn rejects_parent_dir() {
        assert!(validate_folder_name("..").is_err());
    }

    #[test]
    fn rejects_too_long() {
        let name = "a".repeat(MAX_FOLDER_NAME_LEN + 1);
        assert!(validate_folder_name(&name).is_err());
    }

    #[test]
    fn accepts_max_length() {
        let name = "a".repeat(MAX_FOLDER_NAME_LEN);
        assert!(validate_folder_name(&name).is_ok());
    }

    #[test]
    fn rejects_non_ascii_letters() {
        assert!(validate_folder_name("carpeta_ñ").is_err());
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert!(validate_folder_name(" docs").is_err());
        assert!(validate_folder_name("docs\n").is_err());
    }

    #[test]
    fn accepts_letters_digits_dash_underscore() {
        assert!(validate_folder_name("my_folder-1").is_ok());
        assert!(validate_folder_name("ABC").is_ok());
        assert!(validate_folder_name("-").is_ok());
    }

    #[test]
    fn error_names_the_offending_character() {
        let err = validate_folder_name("a/b").unwrap_err().to_string();
        assert!(err.contains("'/'"), "{err}");
    }
}
