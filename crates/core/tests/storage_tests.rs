// ═══════════════════════════════════════════════════════════════════
// Storage Tests — LocalStore, snapshot format, StorageManager
// ═══════════════════════════════════════════════════════════════════

use wealth_dashboard_core::errors::CoreError;
use wealth_dashboard_core::models::dashboard::DashboardState;
use wealth_dashboard_core::storage::local_store::{income_target_key, LocalStore};
use wealth_dashboard_core::storage::manager::StorageManager;

// ═══════════════════════════════════════════════════════════════════
//  LocalStore
// ═══════════════════════════════════════════════════════════════════

mod local_store {
    use super::*;

    #[test]
    fn set_get_and_remove() {
        let mut store = LocalStore::new();
        assert!(store.is_empty());

        store.set("theme", "dark");
        assert_eq!(store.get("theme"), Some("dark"));
        assert_eq!(store.len(), 1);

        store.set("theme", "light");
        assert_eq!(store.get("theme"), Some("light"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("theme"));
        assert!(!store.remove("theme"));
        assert!(store.get("theme").is_none());
    }

    #[test]
    fn keys_are_sorted() {
        let mut store = LocalStore::new();
        store.set("zzz", "1");
        store.set("aaa", "2");
        store.set("mmm", "3");
        assert_eq!(store.keys(), vec!["aaa", "mmm", "zzz"]);
    }

    #[test]
    fn get_f64_parses_numeric_values() {
        let mut store = LocalStore::new();
        store.set("target", "5000.5");
        store.set("junk", "not-a-number");
        assert_eq!(store.get_f64("target"), Some(5000.5));
        assert_eq!(store.get_f64("junk"), None);
        assert_eq!(store.get_f64("absent"), None);
    }

    #[test]
    fn income_target_key_uppercases_the_ticker() {
        assert_eq!(income_target_key("petr4"), "income_target_PETR4");
    }

    #[test]
    fn json_roundtrip() {
        let mut store = LocalStore::new();
        store.set("theme", "dark");
        store.set(income_target_key("KNCR11"), "1500");

        let bytes = store.to_json_bytes().unwrap();
        let back = LocalStore::from_json_bytes(&bytes).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(LocalStore::from_json_bytes(b"{{not json").is_err());
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let path = path.to_str().unwrap();

        let mut store = LocalStore::new();
        store.set("context", "Global");
        store.save_to_file(path).unwrap();

        let back = LocalStore::load_from_file(path).unwrap();
        assert_eq!(back.get("context"), Some("Global"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StorageManager — encrypted snapshot
// ═══════════════════════════════════════════════════════════════════

mod snapshot {
    use super::*;

    #[test]
    fn roundtrip_preserves_the_state() {
        let state = DashboardState::seeded();
        let bytes = StorageManager::save_to_bytes(&state, "hunter2").unwrap();
        let back = StorageManager::load_from_bytes(&bytes, "hunter2").unwrap();

        assert_eq!(back.institutions, state.institutions);
        assert_eq!(back.assets, state.assets);
        assert_eq!(back.goals, state.goals);
        assert_eq!(back.store, state.store);
    }

    #[test]
    fn wrong_password_fails_to_decrypt() {
        let state = DashboardState::seeded();
        let bytes = StorageManager::save_to_bytes(&state, "hunter2").unwrap();
        let err = StorageManager::load_from_bytes(&bytes, "hunter3").unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn tampered_ciphertext_fails_to_decrypt() {
        let state = DashboardState::seeded();
        let mut bytes = StorageManager::save_to_bytes(&state, "hunter2").unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let err = StorageManager::load_from_bytes(&bytes, "hunter2").unwrap_err();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let err = StorageManager::load_from_bytes(b"WDSB", "pw").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn bad_magic_is_rejected() {
        let state = DashboardState::default();
        let mut bytes = StorageManager::save_to_bytes(&state, "pw").unwrap();
        bytes[0] = b'X';
        let err = StorageManager::load_from_bytes(&bytes, "pw").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn future_version_is_rejected() {
        let state = DashboardState::default();
        let mut bytes = StorageManager::save_to_bytes(&state, "pw").unwrap();
        bytes[4] = 0x63; // version 99
        bytes[5] = 0x00;
        let err = StorageManager::load_from_bytes(&bytes, "pw").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVersion(99)));
    }

    #[test]
    fn out_of_range_kdf_params_are_rejected() {
        let state = DashboardState::default();
        let mut bytes = StorageManager::save_to_bytes(&state, "pw").unwrap();
        // memory_cost = 0 KiB, below the Argon2 minimum
        bytes[6..10].copy_from_slice(&0u32.to_le_bytes());
        let err = StorageManager::load_from_bytes(&bytes, "pw").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn empty_state_roundtrips() {
        let state = DashboardState::default();
        let bytes = StorageManager::save_to_bytes(&state, "pw").unwrap();
        let back = StorageManager::load_from_bytes(&bytes, "pw").unwrap();
        assert!(back.assets.is_empty());
        assert!(back.goals.is_empty());
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.wdsb");
        let path = path.to_str().unwrap();

        let state = DashboardState::seeded();
        StorageManager::save_to_file(&state, path, "hunter2").unwrap();
        let back = StorageManager::load_from_file(path, "hunter2").unwrap();
        assert_eq!(back.assets.len(), state.assets.len());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = StorageManager::load_from_file("/nonexistent/dashboard.wdsb", "pw").unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }

    #[test]
    fn each_save_produces_distinct_bytes() {
        // Fresh salt and nonce per save — identical states must not produce
        // identical ciphertext.
        let state = DashboardState::default();
        let a = StorageManager::save_to_bytes(&state, "pw").unwrap();
        let b = StorageManager::save_to_bytes(&state, "pw").unwrap();
        assert_ne!(a, b);
    }
}
