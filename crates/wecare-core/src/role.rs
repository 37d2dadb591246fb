//! Role resolution from the authenticated identity.
//!
//! The role is a pure function of the email's domain part. It is recomputed
//! on every load and never persisted, so this module has no dependency on
//! authentication state — it can be unit-tested with bare strings.

use tracing::debug;

use wecare_contracts::identity::Role;

/// Derive the dashboard role from an email address.
///
/// Matching is a case-insensitive substring search over the domain part
/// (text after the first `@`, lower-cased). Precedence is fixed: the
/// marketing family is checked first, then finance, then support; the first
/// match wins. Anything else — including a malformed email with no `@` —
/// resolves to `Role::Customer`.
pub fn resolve_role(email: &str) -> Role {
    let Some(domain) = email.split_once('@').map(|(_, d)| d.to_lowercase()) else {
        // No '@': fall through to the customer default.
        return Role::Customer;
    };

    let role = if domain.contains("marketing") || domain.contains("mktg") {
        Role::Marketing
    } else if domain.contains("finance") || domain.contains("accounting") || domain.contains("fin")
    {
        Role::Finance
    } else if domain.contains("support") || domain.contains("cs") || domain.contains("help") {
        Role::Support
    } else {
        Role::Customer
    };

    debug!(domain = %domain, role = ?role, "resolved dashboard role");
    role
}

/// The display username: text before the first `@`, or the whole string
/// when no `@` is present.
pub fn username_of(email: &str) -> &str {
    email.split_once('@').map(|(name, _)| name).unwrap_or(email)
}
