use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::local_store::LocalStore;

use super::asset::{Asset, AssetCategory};
use super::goal::FinancialGoal;
use super::institution::{logo_url, Institution};
use super::profile::UserProfile;

/// The main data container. Everything in here gets serialized, encrypted,
/// and saved into the portable snapshot.
///
/// Contains: connected institutions, the asset ledger, financial goals, the
/// user profile, and the local key-value store (theme, cached income
/// targets, provider keys).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardState {
    /// Connected account-holding entities, newest first
    pub institutions: Vec<Institution>,

    /// The asset ledger, newest first. Mutated only by adding
    /// institution-derived assets.
    pub assets: Vec<Asset>,

    /// Savings targets, newest first
    pub goals: Vec<FinancialGoal>,

    /// User-editable profile settings
    #[serde(default)]
    pub profile: UserProfile,

    /// Local key-value persistence (theme, per-ticker income targets,
    /// cached profile fields, API keys)
    #[serde(default)]
    pub store: LocalStore,
}

impl DashboardState {
    /// A demo data set: six connected institutions, seven assets, two goals.
    /// Every asset references an existing institution and agrees with it on
    /// the `is_global` flag.
    #[must_use]
    pub fn seeded() -> Self {
        let xp = Institution {
            id: Uuid::new_v4(),
            name: "XP Investimentos".into(),
            logo: Some(logo_url("xp.com.br")),
            balance: 45_000.0,
            percentage: 35.0,
            is_global: false,
        };
        let btg = Institution {
            id: Uuid::new_v4(),
            name: "BTG Pactual".into(),
            logo: Some(logo_url("btgpactual.com")),
            balance: 35_000.0,
            percentage: 25.0,
            is_global: false,
        };
        let inter = Institution {
            id: Uuid::new_v4(),
            name: "Banco Inter".into(),
            logo: Some(logo_url("bancointer.com.br")),
            balance: 20_000.0,
            percentage: 15.0,
            is_global: false,
        };
        let nubank = Institution {
            id: Uuid::new_v4(),
            name: "NuBank".into(),
            logo: Some(logo_url("nubank.com.br")),
            balance: 15_000.0,
            percentage: 10.0,
            is_global: false,
        };
        let binance = Institution {
            id: Uuid::new_v4(),
            name: "Binance".into(),
            logo: Some(logo_url("binance.com")),
            balance: 12_500.0,
            percentage: 8.0,
            is_global: true,
        };
        let avenue = Institution {
            id: Uuid::new_v4(),
            name: "Avenue".into(),
            logo: Some(logo_url("avenue.us")),
            balance: 10_000.0,
            percentage: 7.0,
            is_global: true,
        };

        let assets = vec![
            seed_asset("Petrobras", "PETR4", AssetCategory::Stocks, "BR Equities", 12_000.0, 10_000.0, 20.0, &xp),
            seed_asset("Tesouro Selic 2027", "LFT", AssetCategory::FixedIncome, "Government Bonds", 25_000.0, 23_500.0, 6.38, &btg),
            seed_asset("Kinea Rendimentos", "KNCR11", AssetCategory::Reits, "Paper REITs", 8_000.0, 7_500.0, 6.67, &xp),
            seed_asset("Apple Inc.", "AAPL", AssetCategory::Stocks, "US Equities", 15_000.0, 12_000.0, 25.0, &avenue),
            seed_asset("CDB Inter 100% CDI", "CDB", AssetCategory::FixedIncome, "Bank CDs", 5_000.0, 5_000.0, 0.5, &inter),
            seed_asset("Nvidia Corp.", "NVDA", AssetCategory::Stocks, "US Equities", 8_500.0, 6_000.0, 41.6, &avenue),
            seed_asset("Bitcoin", "BTC", AssetCategory::Crypto, "Cryptocurrencies", 12_500.0, 8_000.0, 56.2, &binance),
        ];

        let goals = vec![
            FinancialGoal {
                id: Uuid::new_v4(),
                title: "Emergency fund".into(),
                target_amount: 30_000.0,
                current_amount: 25_000.0,
                deadline: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            },
            FinancialGoal {
                id: Uuid::new_v4(),
                title: "Financial independence".into(),
                target_amount: 1_000_000.0,
                current_amount: 100_000.0,
                deadline: NaiveDate::from_ymd_opt(2035, 1, 1).unwrap_or_default(),
            },
        ];

        Self {
            institutions: vec![xp, btg, inter, nubank, binance, avenue],
            assets,
            goals,
            profile: UserProfile::default(),
            store: LocalStore::default(),
        }
    }

    /// Look up an institution by id.
    #[must_use]
    pub fn institution(&self, id: Uuid) -> Option<&Institution> {
        self.institutions.iter().find(|i| i.id == id)
    }
}

fn seed_asset(
    name: &str,
    ticker: &str,
    category: AssetCategory,
    subcategory: &str,
    value: f64,
    invested: f64,
    return_percentage: f64,
    institution: &Institution,
) -> Asset {
    Asset {
        id: Uuid::new_v4(),
        name: name.into(),
        ticker: ticker.into(),
        category,
        subcategory: subcategory.into(),
        value,
        invested,
        return_percentage,
        institution_id: institution.id,
        is_global: institution.is_global,
    }
}
