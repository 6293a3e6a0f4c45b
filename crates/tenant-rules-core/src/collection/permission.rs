//! The `hasPermission` helper shared by tenant-scoped rule blocks.

/// Name of the helper function declared inside rule blocks.
pub const HAS_PERMISSION: &str = "hasPermission";

/// Custom claim holding `{ <tenantId>: [<permission>, ...] }`.
pub const PERMISSIONS_CLAIM: &str = "permissions";

/// Returns the helper declaration, meant for a rule's `extra` text.
///
/// Firestore rejects duplicate function names at the same scope, so the
/// helper is declared inside each `match` block that calls it.
#[must_use]
pub fn helper_function() -> String {
    format!(
        "function {HAS_PERMISSION}(permission, tenant) {{\n  \
         return request.auth != null\n    \
         && tenant in request.auth.token.{PERMISSIONS_CLAIM}\n    \
         && permission in request.auth.token.{PERMISSIONS_CLAIM}[tenant];\n\
         }}"
    )
}

/// Renders a call `hasPermission('<permission>', <tenant_expr>)`.
#[must_use]
pub fn check(permission: &str, tenant_expr: &str) -> String {
    format!("{HAS_PERMISSION}('{permission}', {tenant_expr})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_quotes_permission_only() {
        assert_eq!(
            check("invoice.read", "resource.data.tenantId"),
            "hasPermission('invoice.read', resource.data.tenantId)"
        );
    }

    #[test]
    fn helper_declares_function() {
        let helper = helper_function();
        assert!(helper.starts_with("function hasPermission(permission, tenant) {"));
        assert!(helper.ends_with('}'));
        assert!(helper.contains("request.auth.token.permissions[tenant]"));
    }
}
