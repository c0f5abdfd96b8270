/// Normalize a role string from token claims.
///
/// Trims, lowercases and folds spaces and hyphens into underscores so that
/// `"Super Admin"`, `"super-admin"` and `"SUPER_ADMIN"` compare equal.
pub fn normalize_role(role: &str) -> String {
    role.trim()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
