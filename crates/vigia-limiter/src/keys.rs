//! Counter key construction.
//!
//! Keys are namespaced so that the Redis backend can share a database with
//! other services without collisions, and so future ceilings (per-route,
//! per-organization) get their own prefix.

use uuid::Uuid;

/// Key for the per-identity sensitive-action ceiling.
pub fn sensitive_action(user_id: Uuid) -> String {
    format!("vigia:ratelimit:sensitive:{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced_and_distinct() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert!(sensitive_action(a).starts_with("vigia:ratelimit:sensitive:"));
        assert_ne!(sensitive_action(a), sensitive_action(b));
    }
}
