//! Authentication and session tests
//!
//! Tests for the credential table and session lifetime including:
//! - Demo credentials and exact matching
//! - Session expiry and restore from storage
//! - The privileged gate used by management operations

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use shared::auth::{
    authenticate, clear_session, demo_accounts, require_privileged, restore_session, save_session,
    Session, SESSION_DURATION_SECS,
};
use shared::storage::{keys, KeyValueStore, MemoryStore};
use shared::{AuthError, LoginCredentials, UserRole};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn credentials(username: &str, password: &str) -> LoginCredentials {
    LoginCredentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_manager_login() {
        let session = authenticate(&demo_accounts(), &credentials("manager", "manager123"), now()).unwrap();

        assert_eq!(session.user.role, UserRole::Manager);
        assert_eq!(session.user.name, "Kitchen Manager");
        assert!(session.is_privileged());
        assert_eq!(session.expires_at, now() + Duration::hours(8));
    }

    #[test]
    fn test_staff_login_is_not_privileged() {
        let session = authenticate(&demo_accounts(), &credentials("staff", "staff123"), now()).unwrap();

        assert_eq!(session.user.role, UserRole::KitchenStaff);
        assert!(!session.is_privileged());
        assert_eq!(require_privileged(session.is_privileged()), Err(AuthError::NotPrivileged));
    }

    /// Usernames and passwords compare exactly
    #[test]
    fn test_credentials_match_exactly() {
        let accounts = demo_accounts();
        for (username, password) in [("Manager", "manager123"), ("manager", "MANAGER123"), ("manager ", "manager123")] {
            assert_eq!(
                authenticate(&accounts, &credentials(username, password), now()),
                Err(AuthError::InvalidCredentials)
            );
        }
    }

    #[test]
    fn test_session_expires_after_eight_hours() {
        let session = authenticate(&demo_accounts(), &credentials("staff", "staff123"), now()).unwrap();

        assert!(session.is_active(now() + Duration::hours(7)));
        assert!(!session.is_active(now() + Duration::hours(8)));
    }

    #[test]
    fn test_session_restored_from_storage() {
        let session = authenticate(&demo_accounts(), &credentials("manager", "manager123"), now()).unwrap();
        let mut store = MemoryStore::new();
        save_session(&mut store, &session).unwrap();

        let restored = restore_session(&mut store, now() + Duration::hours(1)).unwrap();
        assert_eq!(restored, Some(session));
    }

    /// An expired session is cleared on restore
    #[test]
    fn test_expired_session_cleared() {
        let session = authenticate(&demo_accounts(), &credentials("manager", "manager123"), now()).unwrap();
        let mut store = MemoryStore::new();
        save_session(&mut store, &session).unwrap();

        let restored = restore_session(&mut store, now() + Duration::hours(9)).unwrap();
        assert!(restored.is_none());
        assert_eq!(store.get(keys::AUTH_USER).unwrap(), None);
        assert_eq!(store.get(keys::AUTH_EXPIRY).unwrap(), None);
    }

    #[test]
    fn test_unreadable_session_cleared() {
        let mut store = MemoryStore::new();
        store.set(keys::AUTH_USER, "{ broken").unwrap();
        store.set(keys::AUTH_EXPIRY, "tomorrow").unwrap();

        assert!(restore_session(&mut store, now()).unwrap().is_none());
        assert_eq!(store.get(keys::AUTH_USER).unwrap(), None);
    }

    #[test]
    fn test_logout_clears_session() {
        let session = authenticate(&demo_accounts(), &credentials("staff", "staff123"), now()).unwrap();
        let mut store = MemoryStore::new();
        save_session(&mut store, &session).unwrap();

        clear_session(&mut store).unwrap();
        assert!(restore_session(&mut store, now()).unwrap().is_none());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A session is active for exactly its lifetime
        #[test]
        fn prop_session_lifetime(offset_secs in 0i64..(2 * SESSION_DURATION_SECS)) {
            let session = authenticate(&demo_accounts(), &credentials("manager", "manager123"), now()).unwrap();
            let at = now() + Duration::seconds(offset_secs);
            prop_assert_eq!(session.is_active(at), offset_secs < SESSION_DURATION_SECS);
        }

        /// Arbitrary credentials outside the table are refused
        #[test]
        fn prop_unknown_credentials_rejected(username in "[a-z]{1,12}", password in "[a-z0-9]{1,12}") {
            prop_assume!(!demo_accounts().iter().any(|a| a.username == username && a.password == password));
            prop_assert!(authenticate(&demo_accounts(), &credentials(&username, &password), now()).is_err());
        }

        /// Sessions started at any time survive a save and restore before expiry
        #[test]
        fn prop_restore_before_expiry(start_offset in 0i64..1_000_000, elapsed in 0i64..SESSION_DURATION_SECS) {
            let start = now() + Duration::seconds(start_offset);
            let user = demo_accounts()[1].to_user(start);
            let session = Session::start(user, start);
            let mut store = MemoryStore::new();
            save_session(&mut store, &session).unwrap();

            let restored = restore_session(&mut store, start + Duration::seconds(elapsed)).unwrap();
            prop_assert_eq!(restored, Some(session));
        }
    }
}
