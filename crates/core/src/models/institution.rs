use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an institution operates. Drives the `is_global` flag of the
/// institution and of every asset synthesized under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// Domestic (home-jurisdiction) institution
    Br,
    /// International institution
    Global,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Br => write!(f, "BR"),
            Region::Global => write!(f, "Global"),
        }
    }
}

/// A connected account-holding entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (e.g., "XP Investimentos")
    pub name: String,

    /// Logo URI. `None` falls back to initials rendering in the frontend.
    pub logo: Option<String>,

    /// Total balance held at this institution
    pub balance: f64,

    /// Share of the overall balance, in percent. Informational only —
    /// recomputed on connection/refresh, never fed back into aggregation.
    pub percentage: f64,

    /// Whether this is an international institution
    pub is_global: bool,
}

/// An entry in the connection catalog the user picks from.
/// The catalog is a fixed table, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub logo_domain: &'static str,
    pub region: Region,
}

/// Institutions available for connection.
pub const CONNECTION_CATALOG: [CatalogEntry; 10] = [
    CatalogEntry { name: "XP Investimentos", logo_domain: "xp.com.br", region: Region::Br },
    CatalogEntry { name: "BTG Pactual", logo_domain: "btgpactual.com", region: Region::Br },
    CatalogEntry { name: "Banco Inter", logo_domain: "bancointer.com.br", region: Region::Br },
    CatalogEntry { name: "NuBank", logo_domain: "nubank.com.br", region: Region::Br },
    CatalogEntry { name: "Itaú", logo_domain: "itau.com.br", region: Region::Br },
    CatalogEntry { name: "Avenue", logo_domain: "avenue.us", region: Region::Global },
    CatalogEntry { name: "Nomad", logo_domain: "nomadglobal.com", region: Region::Global },
    CatalogEntry { name: "Binance", logo_domain: "binance.com", region: Region::Global },
    CatalogEntry { name: "Charles Schwab", logo_domain: "schwab.com", region: Region::Global },
    CatalogEntry { name: "Interactive Brokers", logo_domain: "interactivebrokers.com", region: Region::Global },
];

/// Build the avatar-service logo URI for an institution domain.
#[must_use]
pub fn logo_url(domain: &str) -> String {
    format!("https://unavatar.io/{domain}?fallback=false")
}

impl CatalogEntry {
    /// Logo URI for this catalog entry.
    #[must_use]
    pub fn logo(&self) -> String {
        logo_url(self.logo_domain)
    }
}
