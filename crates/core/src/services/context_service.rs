use crate::models::asset::Asset;
use crate::models::context::ReportingContext;

/// Partitions the ledger by reporting context.
///
/// Pure business logic — no I/O, no state. `National` and `Global` split the
/// ledger on the `is_global` flag; `Consolidated` is an identity pass.
pub struct ContextFilter;

impl ContextFilter {
    pub fn new() -> Self {
        Self
    }

    /// Select the assets that count under `context`. An empty ledger yields
    /// an empty result; there are no error conditions.
    #[must_use]
    pub fn filter<'a>(&self, assets: &'a [Asset], context: ReportingContext) -> Vec<&'a Asset> {
        match context {
            ReportingContext::Consolidated => assets.iter().collect(),
            ReportingContext::National => assets.iter().filter(|a| !a.is_global).collect(),
            ReportingContext::Global => assets.iter().filter(|a| a.is_global).collect(),
        }
    }
}

impl Default for ContextFilter {
    fn default() -> Self {
        Self::new()
    }
}
