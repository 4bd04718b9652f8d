//! Admin check for folder management commands.
//!
//! This only hides commands the backend would refuse anyway; the server
//! remains the authority on who may create or delete folders.

/// True when `email` exactly matches a trimmed entry of `admins`.
pub fn is_admin(email: Option<&str>, admins: &[String]) -> bool {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return false;
    };
    admins.iter().any(|a| a.trim() == email)
}
