use chrono::NaiveDate;
use uuid::Uuid;

use wealth_dashboard_core::models::asset::{Asset, AssetCategory};
use wealth_dashboard_core::models::context::{AccessMode, ReportingContext};
use wealth_dashboard_core::models::dashboard::DashboardState;
use wealth_dashboard_core::models::goal::{FinancialGoal, GoalUpdate};
use wealth_dashboard_core::models::institution::{logo_url, Region, CONNECTION_CATALOG};
use wealth_dashboard_core::models::market::MarketData;
use wealth_dashboard_core::models::profile::{SignUpProfile, UserProfile};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  AssetCategory
// ═══════════════════════════════════════════════════════════════════

mod asset_category {
    use super::*;

    #[test]
    fn display_labels() {
        assert_eq!(AssetCategory::Stocks.to_string(), "Stocks");
        assert_eq!(AssetCategory::FixedIncome.to_string(), "Fixed Income");
        assert_eq!(AssetCategory::Reits.to_string(), "REITs");
        assert_eq!(AssetCategory::Cash.to_string(), "Cash");
        assert_eq!(AssetCategory::Crypto.to_string(), "Crypto");
    }

    #[test]
    fn all_lists_every_category_once() {
        assert_eq!(AssetCategory::ALL.len(), 5);
        for category in AssetCategory::ALL {
            assert_eq!(
                AssetCategory::ALL.iter().filter(|c| **c == category).count(),
                1
            );
        }
    }

    #[test]
    fn serde_roundtrip_json() {
        for category in AssetCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            let back: AssetCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(category, back);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Asset
// ═══════════════════════════════════════════════════════════════════

mod asset {
    use super::*;

    fn new_asset(value: f64, invested: f64) -> Result<Asset, wealth_dashboard_core::errors::CoreError> {
        Asset::new(
            "Petrobras",
            "petr4",
            AssetCategory::Stocks,
            "BR Equities",
            value,
            invested,
            20.0,
            Uuid::new_v4(),
            false,
        )
    }

    #[test]
    fn new_uppercases_ticker() {
        let a = new_asset(100.0, 80.0).unwrap();
        assert_eq!(a.ticker, "PETR4");
    }

    #[test]
    fn new_rejects_negative_value() {
        assert!(new_asset(-1.0, 80.0).is_err());
    }

    #[test]
    fn new_rejects_negative_invested() {
        assert!(new_asset(100.0, -0.01).is_err());
    }

    #[test]
    fn new_rejects_non_finite_value() {
        assert!(new_asset(f64::NAN, 80.0).is_err());
        assert!(new_asset(f64::INFINITY, 80.0).is_err());
    }

    #[test]
    fn new_accepts_zero_amounts() {
        let a = new_asset(0.0, 0.0).unwrap();
        assert_eq!(a.value, 0.0);
        assert_eq!(a.invested, 0.0);
    }

    #[test]
    fn computed_return_matches_value_and_invested() {
        let a = new_asset(120.0, 100.0).unwrap();
        assert!((a.computed_return_pct() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn computed_return_is_zero_when_nothing_invested() {
        let a = new_asset(120.0, 0.0).unwrap();
        assert_eq!(a.computed_return_pct(), 0.0);
    }

    #[test]
    fn stored_return_is_kept_as_given() {
        // The stored figure is authoritative for display even when it
        // disagrees with the arithmetic one.
        let a = new_asset(120.0, 100.0).unwrap();
        assert_eq!(a.return_percentage, 20.0);
    }

    #[test]
    fn serde_roundtrip_json() {
        let a = new_asset(120.0, 100.0).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FinancialGoal
// ═══════════════════════════════════════════════════════════════════

mod goal {
    use super::*;

    fn goal(current: f64, target: f64) -> FinancialGoal {
        FinancialGoal {
            id: Uuid::new_v4(),
            title: "Emergency fund".into(),
            target_amount: target,
            current_amount: current,
            deadline: d(2024, 12, 31),
        }
    }

    #[test]
    fn progress_pct_basic() {
        let g = goal(25_000.0, 30_000.0);
        assert!((g.progress_pct() - 83.33).abs() < 0.01);
    }

    #[test]
    fn progress_pct_zero_target_is_zero() {
        assert_eq!(goal(25_000.0, 0.0).progress_pct(), 0.0);
    }

    #[test]
    fn progress_pct_is_unclamped_above_target() {
        let g = goal(45_000.0, 30_000.0);
        assert!((g.progress_pct() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn update_defaults_to_no_changes() {
        let update = GoalUpdate::default();
        assert!(update.title.is_none());
        assert!(update.target_amount.is_none());
        assert!(update.current_amount.is_none());
        assert!(update.deadline.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Institution catalog
// ═══════════════════════════════════════════════════════════════════

mod institution {
    use super::*;

    #[test]
    fn catalog_has_ten_entries() {
        assert_eq!(CONNECTION_CATALOG.len(), 10);
    }

    #[test]
    fn catalog_covers_both_regions() {
        let br = CONNECTION_CATALOG.iter().filter(|e| e.region == Region::Br).count();
        let global = CONNECTION_CATALOG.iter().filter(|e| e.region == Region::Global).count();
        assert_eq!(br, 5);
        assert_eq!(global, 5);
    }

    #[test]
    fn catalog_names_are_unique() {
        for entry in &CONNECTION_CATALOG {
            assert_eq!(
                CONNECTION_CATALOG.iter().filter(|e| e.name == entry.name).count(),
                1,
                "duplicate catalog entry: {}",
                entry.name
            );
        }
    }

    #[test]
    fn logo_url_points_at_avatar_service() {
        assert_eq!(
            logo_url("xp.com.br"),
            "https://unavatar.io/xp.com.br?fallback=false"
        );
    }

    #[test]
    fn entry_logo_uses_its_domain() {
        let entry = &CONNECTION_CATALOG[0];
        assert!(entry.logo().contains(entry.logo_domain));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ReportingContext
// ═══════════════════════════════════════════════════════════════════

mod reporting_context {
    use super::*;

    #[test]
    fn display_and_parse_roundtrip() {
        for context in [
            ReportingContext::National,
            ReportingContext::Global,
            ReportingContext::Consolidated,
        ] {
            let parsed: ReportingContext = context.to_string().parse().unwrap();
            assert_eq!(parsed, context);
        }
    }

    #[test]
    fn parse_rejects_unknown_context() {
        assert!("Offshore".parse::<ReportingContext>().is_err());
    }

    #[test]
    fn default_is_consolidated() {
        assert_eq!(ReportingContext::default(), ReportingContext::Consolidated);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AccessMode
// ═══════════════════════════════════════════════════════════════════

mod access_mode {
    use super::*;

    #[test]
    fn view_param_selects_read_only() {
        assert_eq!(AccessMode::from_query("view=1"), AccessMode::ReadOnly);
        assert_eq!(AccessMode::from_query("view=true"), AccessMode::ReadOnly);
        assert_eq!(AccessMode::from_query("view=yes"), AccessMode::ReadOnly);
    }

    #[test]
    fn leading_question_mark_is_tolerated() {
        assert_eq!(AccessMode::from_query("?view=1"), AccessMode::ReadOnly);
    }

    #[test]
    fn value_is_case_insensitive() {
        assert_eq!(AccessMode::from_query("view=TRUE"), AccessMode::ReadOnly);
    }

    #[test]
    fn other_params_do_not_trigger_viewer_mode() {
        assert_eq!(AccessMode::from_query("tab=goals&sort=asc"), AccessMode::Full);
    }

    #[test]
    fn view_param_with_falsy_value_stays_full() {
        assert_eq!(AccessMode::from_query("view=0"), AccessMode::Full);
        assert_eq!(AccessMode::from_query("view=no"), AccessMode::Full);
        assert_eq!(AccessMode::from_query("view="), AccessMode::Full);
    }

    #[test]
    fn empty_query_stays_full() {
        assert_eq!(AccessMode::from_query(""), AccessMode::Full);
    }

    #[test]
    fn view_param_mixed_with_others_is_found() {
        assert_eq!(AccessMode::from_query("tab=goals&view=1"), AccessMode::ReadOnly);
    }

    #[test]
    fn default_is_full() {
        assert_eq!(AccessMode::default(), AccessMode::Full);
        assert!(!AccessMode::Full.is_read_only());
        assert!(AccessMode::ReadOnly.is_read_only());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MarketData
// ═══════════════════════════════════════════════════════════════════

mod market_data {
    use super::*;

    #[test]
    fn flags_default_to_false_when_absent() {
        let json = r#"{
            "price": 38.5,
            "dividend_yield": 11.2,
            "frequency": "Monthly",
            "sources": []
        }"#;
        let data: MarketData = serde_json::from_str(json).unwrap();
        assert!(!data.is_estimated);
        assert!(!data.is_tax_exempt);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  UserProfile / SignUpProfile
// ═══════════════════════════════════════════════════════════════════

mod profile {
    use super::*;

    #[test]
    fn default_profile() {
        let p = UserProfile::default();
        assert_eq!(p.display_name, "User");
        assert!(p.photo.is_none());
        assert!(p.biometry_enabled);
    }

    #[test]
    fn signup_full_name_joins_parts() {
        let profile = SignUpProfile {
            first_name: "Joana".into(),
            last_name: "Silva".into(),
            email: "joana@example.com".into(),
            phone: "+55 11 99999-9999".into(),
            password: "secret".into(),
        };
        assert_eq!(profile.full_name(), "Joana Silva");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DashboardState
// ═══════════════════════════════════════════════════════════════════

mod dashboard_state {
    use super::*;

    #[test]
    fn default_is_empty() {
        let state = DashboardState::default();
        assert!(state.institutions.is_empty());
        assert!(state.assets.is_empty());
        assert!(state.goals.is_empty());
        assert!(state.store.is_empty());
    }

    #[test]
    fn seeded_counts() {
        let state = DashboardState::seeded();
        assert_eq!(state.institutions.len(), 6);
        assert_eq!(state.assets.len(), 7);
        assert_eq!(state.goals.len(), 2);
    }

    #[test]
    fn seeded_assets_reference_existing_institutions() {
        let state = DashboardState::seeded();
        for asset in &state.assets {
            assert!(
                state.institution(asset.institution_id).is_some(),
                "asset {} points at a missing institution",
                asset.ticker
            );
        }
    }

    #[test]
    fn seeded_assets_agree_with_their_institution_on_is_global() {
        let state = DashboardState::seeded();
        for asset in &state.assets {
            let institution = state.institution(asset.institution_id).unwrap();
            assert_eq!(
                asset.is_global, institution.is_global,
                "asset {} disagrees with {}",
                asset.ticker, institution.name
            );
        }
    }

    #[test]
    fn seeded_has_both_jurisdictions() {
        let state = DashboardState::seeded();
        assert!(state.assets.iter().any(|a| a.is_global));
        assert!(state.assets.iter().any(|a| !a.is_global));
    }

    #[test]
    fn serde_roundtrip_preserves_ledger() {
        let state = DashboardState::seeded();
        let json = serde_json::to_string(&state).unwrap();
        let back: DashboardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.assets, state.assets);
        assert_eq!(back.goals, state.goals);
        assert_eq!(back.institutions, state.institutions);
    }
}
