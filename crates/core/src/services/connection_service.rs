use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::asset::{Asset, AssetCategory};
use crate::models::dashboard::DashboardState;
use crate::models::institution::{CatalogEntry, Institution, Region, CONNECTION_CATALOG};
use crate::storage::encryption;

/// Bounds for the synthesized opening balance of a new connection.
const MIN_SEED_BALANCE: f64 = 1_000.0;
const MAX_SEED_BALANCE: f64 = 50_000.0;

/// The institution connection wizard.
///
/// Connecting is simulated: the user picks a catalog entry and supplies a
/// credential token, and the service synthesizes one `Institution` plus one
/// seed cash asset with a randomly generated balance. Institution and asset
/// are created together so their `is_global` flags always agree.
pub struct ConnectionService;

impl ConnectionService {
    pub fn new() -> Self {
        Self
    }

    /// The institutions available for connection.
    #[must_use]
    pub fn catalog(&self) -> &'static [CatalogEntry] {
        &CONNECTION_CATALOG
    }

    /// Find a catalog entry by display name (case-insensitive).
    #[must_use]
    pub fn find_entry(&self, name: &str) -> Option<&'static CatalogEntry> {
        CONNECTION_CATALOG
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Connect a catalog institution and seed it with one cash asset.
    ///
    /// The credential token is only checked for presence — no real
    /// institution API sits behind this. Both records are prepended, and the
    /// informational percentage shares are recomputed across all
    /// institutions. Returns the new institution's id.
    pub fn connect(
        &self,
        state: &mut DashboardState,
        institution_name: &str,
        credential_token: &str,
    ) -> Result<Uuid, CoreError> {
        if credential_token.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "A credential token is required to connect an institution".into(),
            ));
        }

        let entry = self
            .find_entry(institution_name)
            .ok_or_else(|| CoreError::InstitutionNotFound(institution_name.to_string()))?;

        let is_global = entry.region == Region::Global;
        let balance = random_balance()?;

        let institution = Institution {
            id: Uuid::new_v4(),
            name: entry.name.to_string(),
            logo: Some(entry.logo()),
            balance,
            percentage: 0.0, // recomputed below
            is_global,
        };
        let institution_id = institution.id;

        let seed_asset = Asset {
            id: Uuid::new_v4(),
            name: format!("{} Account Balance", entry.name),
            ticker: "CASH".to_string(),
            category: AssetCategory::Cash,
            subcategory: "Account Balance".to_string(),
            value: balance,
            invested: balance,
            return_percentage: 0.0,
            institution_id,
            is_global,
        };

        state.institutions.insert(0, institution);
        state.assets.insert(0, seed_asset);
        self.recompute_shares(state);

        Ok(institution_id)
    }

    /// Recompute every institution's informational percentage share of the
    /// overall balance. Reports 0 across the board when nothing is held.
    pub fn recompute_shares(&self, state: &mut DashboardState) {
        let total: f64 = state.institutions.iter().map(|i| i.balance).sum();
        for institution in &mut state.institutions {
            institution.percentage = if total > 0.0 {
                institution.balance / total * 100.0
            } else {
                0.0
            };
        }
    }
}

impl Default for ConnectionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw an opening balance in [MIN_SEED_BALANCE, MAX_SEED_BALANCE) from OS
/// randomness, rounded to cents.
fn random_balance() -> Result<f64, CoreError> {
    let bytes = encryption::random_array::<8>()?;
    let fraction = u64::from_le_bytes(bytes) as f64 / u64::MAX as f64;
    let raw = MIN_SEED_BALANCE + fraction * (MAX_SEED_BALANCE - MIN_SEED_BALANCE);
    Ok((raw * 100.0).round() / 100.0)
}
