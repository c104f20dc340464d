pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use uuid::Uuid;

use models::{
    analytics::{CategoryAllocation, PortfolioStats},
    asset::Asset,
    chart::{AllocationSlice, EvolutionPoint},
    context::{AccessMode, ReportingContext},
    dashboard::DashboardState,
    goal::{FinancialGoal, GoalUpdate},
    institution::{CatalogEntry, Institution},
    profile::{Session, SignUpProfile, UserProfile},
};
use providers::{
    gemini::GeminiProvider,
    hosted_auth::HostedAuthProvider,
    registry::MarketDataRegistry,
    traits::{AuthProvider, InsightsProvider},
};
use services::{
    allocation_service::AllocationService,
    chart_service::ChartService,
    connection_service::ConnectionService,
    context_service::ContextFilter,
    goal_service::GoalService,
    simulation_service::SimulationFlow,
    stats_service::StatsService,
};
use storage::local_store::{api_key_key, income_target_key, LocalStore, KEY_AUTH_KEY, KEY_AUTH_URL, KEY_CONTEXT, KEY_THEME};
use storage::manager::StorageManager;

use errors::CoreError;

/// Called whenever the session appears, changes, or goes away.
pub type SessionListener = Box<dyn Fn(Option<&Session>) + Send + Sync>;

/// Main entry point for the wealth-dashboard core library.
///
/// Owns all process-wide state — the ledger, goals, profile, preferences,
/// session, reporting context, and access mode — plus the services that
/// operate on it. Views hold this by reference and call explicit update
/// methods; there is no ambient global mutation.
#[must_use]
pub struct WealthDashboard {
    state: DashboardState,
    context_filter: ContextFilter,
    stats_service: StatsService,
    allocation_service: AllocationService,
    chart_service: ChartService,
    goal_service: GoalService,
    connection_service: ConnectionService,
    market_data: MarketDataRegistry,
    insights: Option<Box<dyn InsightsProvider>>,
    auth: Option<Box<dyn AuthProvider>>,
    session: Option<Session>,
    session_listeners: Vec<SessionListener>,
    context: ReportingContext,
    access_mode: AccessMode,
    /// Gates duplicate submissions of the single in-flight request.
    loading: bool,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for WealthDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WealthDashboard")
            .field("institutions", &self.state.institutions.len())
            .field("assets", &self.state.assets.len())
            .field("goals", &self.state.goals.len())
            .field("context", &self.context)
            .field("access_mode", &self.access_mode)
            .field("authenticated", &self.session.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl WealthDashboard {
    /// Create a dashboard with an empty ledger and default settings.
    pub fn create_new() -> Self {
        Self::build(DashboardState::default())
    }

    /// Create a dashboard pre-populated with the demo data set.
    pub fn with_seed_data() -> Self {
        Self::build(DashboardState::seeded())
    }

    /// Load existing state from encrypted snapshot bytes (password required).
    /// Use this for WASM / embedded hosts where the frontend handles file I/O.
    pub fn load_from_bytes(encrypted: &[u8], password: &str) -> Result<Self, CoreError> {
        let state = StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(state))
    }

    /// Save the current state to encrypted bytes.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.state, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from an encrypted snapshot file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Self, CoreError> {
        let state = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(state))
    }

    /// Save to an encrypted snapshot file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.state, path, password)?;
        self.dirty = false;
        Ok(())
    }

    // ── Access Mode ─────────────────────────────────────────────────

    /// Set the capability mode directly.
    pub fn set_access_mode(&mut self, mode: AccessMode) {
        self.access_mode = mode;
    }

    /// Derive the capability mode from a URL query string
    /// (`?view=1` selects read-only viewer mode).
    pub fn set_access_mode_from_query(&mut self, query: &str) {
        self.access_mode = AccessMode::from_query(query);
    }

    #[must_use]
    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.access_mode.is_read_only()
    }

    // ── Authentication ──────────────────────────────────────────────

    /// Point the dashboard at a hosted auth endpoint. The endpoint is
    /// persisted so a restored snapshot reconnects to the same service.
    pub fn configure_auth(&mut self, base_url: impl Into<String>, anon_key: impl Into<String>) {
        let base_url = base_url.into();
        let anon_key = anon_key.into();
        self.state.store.set(KEY_AUTH_URL, base_url.clone());
        self.state.store.set(KEY_AUTH_KEY, anon_key.clone());
        self.auth = Some(Box::new(HostedAuthProvider::new(base_url, anon_key)));
        self.dirty = true;
    }

    /// Replace the auth provider with an arbitrary implementation.
    pub fn set_auth_provider(&mut self, provider: Box<dyn AuthProvider>) {
        self.auth = Some(provider);
    }

    /// Exchange credentials for a session. On success the session becomes
    /// current, the profile picks up the provider's display name, and
    /// session listeners fire. A sign-in already in flight is refused.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, CoreError> {
        if self.loading {
            return Err(CoreError::RequestInFlight);
        }

        self.loading = true;
        let outcome = match &self.auth {
            Some(provider) => provider.sign_in(email, password).await,
            None => Err(CoreError::NotConfigured("Authentication service".into())),
        };
        self.loading = false;

        let session = outcome?;
        self.install_session(session.clone());
        Ok(session)
    }

    /// Register a new account and sign it in.
    pub async fn sign_up(&mut self, profile: SignUpProfile) -> Result<Session, CoreError> {
        if self.loading {
            return Err(CoreError::RequestInFlight);
        }

        self.loading = true;
        let outcome = match &self.auth {
            Some(provider) => provider.sign_up(&profile).await,
            None => Err(CoreError::NotConfigured("Authentication service".into())),
        };
        self.loading = false;

        let session = outcome?;
        self.install_session(session.clone());
        Ok(session)
    }

    /// Ask the auth service to email a password-reset link.
    pub async fn reset_password(&mut self, email: &str) -> Result<(), CoreError> {
        if self.loading {
            return Err(CoreError::RequestInFlight);
        }

        self.loading = true;
        let outcome = match &self.auth {
            Some(provider) => provider.reset_password(email).await,
            None => Err(CoreError::NotConfigured("Authentication service".into())),
        };
        self.loading = false;

        outcome
    }

    /// Drop the current session and notify the provider. The local session
    /// is cleared before the provider call, so the dashboard signs out even
    /// when the service is unreachable.
    pub async fn sign_out(&mut self) -> Result<(), CoreError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        self.notify_session_listeners();

        match &self.auth {
            Some(provider) => provider.sign_out(&session.access_token).await,
            None => Ok(()),
        }
    }

    /// The current session, if signed in.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Presence of a session gates access to all protected views.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Register a listener invoked on every session transition
    /// (sign-in, sign-up, sign-out).
    pub fn on_session_change(&mut self, listener: SessionListener) {
        self.session_listeners.push(listener);
    }

    // ── Reporting Context & Aggregation ─────────────────────────────

    /// Select the reporting context. The choice is persisted so the next
    /// launch restores it.
    pub fn select_context(&mut self, context: ReportingContext) {
        self.context = context;
        self.state.store.set(KEY_CONTEXT, context.to_string());
        self.dirty = true;
    }

    #[must_use]
    pub fn context(&self) -> ReportingContext {
        self.context
    }

    /// The ledger filtered by the selected reporting context.
    #[must_use]
    pub fn filtered_assets(&self) -> Vec<&Asset> {
        self.context_filter.filter(&self.state.assets, self.context)
    }

    /// Summary statistics over the filtered ledger.
    #[must_use]
    pub fn stats(&self) -> PortfolioStats {
        let filtered = self.filtered_assets();
        self.stats_service.compute(&filtered)
    }

    /// Category/subcategory allocation breakdown of the filtered ledger.
    #[must_use]
    pub fn allocation(&self) -> Vec<CategoryAllocation> {
        let filtered = self.filtered_assets();
        let stats = self.stats_service.compute(&filtered);
        self.allocation_service.group(&filtered, stats.gross_balance)
    }

    /// Donut-ready allocation slices, largest class first.
    #[must_use]
    pub fn allocation_donut(&self) -> Vec<AllocationSlice> {
        self.chart_service.allocation_donut(&self.allocation())
    }

    /// The synthesized six-month evolution series for the filtered ledger.
    #[must_use]
    pub fn evolution_chart(&self) -> Vec<EvolutionPoint> {
        self.chart_service.evolution_series(&self.stats())
    }

    /// The full, unfiltered ledger.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.state.assets
    }

    // ── Goals ───────────────────────────────────────────────────────

    #[must_use]
    pub fn goals(&self) -> &[FinancialGoal] {
        &self.state.goals
    }

    /// Create a goal (saved amount starts at 0). Refused in viewer mode.
    pub fn add_goal(
        &mut self,
        title: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        self.ensure_mutable()?;
        let id = self.goal_service.add_goal(&mut self.state, title, target_amount, deadline)?;
        self.dirty = true;
        Ok(id)
    }

    /// Patch an existing goal. Refused in viewer mode.
    pub fn update_goal(&mut self, goal_id: Uuid, update: GoalUpdate) -> Result<(), CoreError> {
        self.ensure_mutable()?;
        self.goal_service.update_goal(&mut self.state, goal_id, update)?;
        self.dirty = true;
        Ok(())
    }

    /// Delete a goal. Refused in viewer mode.
    pub fn delete_goal(&mut self, goal_id: Uuid) -> Result<(), CoreError> {
        self.ensure_mutable()?;
        self.goal_service.delete_goal(&mut self.state, goal_id)?;
        self.dirty = true;
        Ok(())
    }

    // ── Institution Connections ─────────────────────────────────────

    /// The catalog of institutions available for connection.
    #[must_use]
    pub fn catalog(&self) -> &'static [CatalogEntry] {
        self.connection_service.catalog()
    }

    #[must_use]
    pub fn institutions(&self) -> &[Institution] {
        &self.state.institutions
    }

    /// Connect a catalog institution, synthesizing it together with one
    /// seed cash asset. Refused in viewer mode.
    pub fn connect_institution(
        &mut self,
        institution_name: &str,
        credential_token: &str,
    ) -> Result<Uuid, CoreError> {
        self.ensure_mutable()?;
        let id = self
            .connection_service
            .connect(&mut self.state, institution_name, credential_token)?;
        self.dirty = true;
        Ok(id)
    }

    /// Re-sync derived data after external changes. Gated by the loading
    /// flag like every other single-in-flight action; a no-op when signed
    /// out.
    pub async fn refresh_data(&mut self) -> Result<(), CoreError> {
        if self.loading {
            return Err(CoreError::RequestInFlight);
        }
        if !self.is_authenticated() {
            return Ok(());
        }

        self.loading = true;
        self.connection_service.recompute_shares(&mut self.state);
        self.loading = false;
        self.dirty = true;
        Ok(())
    }

    // ── Profile & Preferences ───────────────────────────────────────

    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.state.profile
    }

    /// Change the display name. Refused in viewer mode.
    pub fn set_display_name(&mut self, name: impl Into<String>) -> Result<(), CoreError> {
        self.ensure_mutable()?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError("Display name must not be empty".into()));
        }
        self.state.store.set("profile_name", name.clone());
        self.state.profile.display_name = name;
        self.dirty = true;
        Ok(())
    }

    /// Set or clear the profile photo (a URI or data string).
    /// Refused in viewer mode.
    pub fn set_photo(&mut self, photo: Option<String>) -> Result<(), CoreError> {
        self.ensure_mutable()?;
        match &photo {
            Some(uri) => self.state.store.set("profile_photo", uri.clone()),
            None => {
                self.state.store.remove("profile_photo");
            }
        }
        self.state.profile.photo = photo;
        self.dirty = true;
        Ok(())
    }

    /// Toggle biometric unlock. Refused in viewer mode.
    pub fn set_biometry(&mut self, enabled: bool) -> Result<(), CoreError> {
        self.ensure_mutable()?;
        self.state.profile.biometry_enabled = enabled;
        self.dirty = true;
        Ok(())
    }

    /// Whether the dark theme is selected.
    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.state.store.get(KEY_THEME) == Some("dark")
    }

    /// Flip the theme preference and persist it. Available in viewer mode —
    /// the theme is a device preference, not portfolio data.
    pub fn toggle_theme(&mut self) {
        let next = if self.is_dark_mode() { "light" } else { "dark" };
        self.state.store.set(KEY_THEME, next);
        self.dirty = true;
    }

    /// Set an API key for a provider (e.g., "gemini").
    /// Rebuilds the provider registry so the new key takes effect
    /// immediately.
    pub fn set_api_key(&mut self, provider: impl Into<String>, key: impl Into<String>) {
        self.state.store.set(api_key_key(&provider.into()), key.into());
        self.rebuild_providers();
        self.dirty = true;
    }

    /// Remove a provider API key. Rebuilds the registry so the removal
    /// takes effect immediately.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.state.store.remove(&api_key_key(provider));
        if removed {
            self.rebuild_providers();
            self.dirty = true;
        }
        removed
    }

    /// The local key-value store (theme, cached targets, keys).
    #[must_use]
    pub fn store(&self) -> &LocalStore {
        &self.state.store
    }

    // ── Income Simulation ───────────────────────────────────────────

    /// Open a simulation flow for a ledger asset, prefilling the cached
    /// target income for its ticker when one exists.
    pub fn start_simulation(&self, ticker: &str) -> Result<SimulationFlow, CoreError> {
        let upper = ticker.to_uppercase();
        let asset = self
            .state
            .assets
            .iter()
            .find(|a| a.ticker == upper)
            .ok_or_else(|| CoreError::ValidationError(format!("Asset {upper} is not in the ledger")))?;

        let mut flow = SimulationFlow::new(&asset.ticker, asset.category, asset.value);
        if let Some(cached) = self.cached_income_target(&asset.ticker) {
            flow.prefill_target(cached);
        }
        Ok(flow)
    }

    /// Submit a target income into a flow and cache it for the ticker.
    pub fn submit_simulation_target(
        &mut self,
        flow: &mut SimulationFlow,
        income: f64,
    ) -> Result<(), CoreError> {
        flow.submit_target(income)?;
        self.state
            .store
            .set(income_target_key(flow.ticker()), income.to_string());
        self.dirty = true;
        Ok(())
    }

    /// Run the market-data lookup for a flow that just entered `Loading`.
    /// Success lands the flow in `Result`; any failure lands it in `Error`
    /// with the manual-entry path open.
    pub async fn resolve_market_data(&self, flow: &mut SimulationFlow) -> Result<(), CoreError> {
        let outcome = self.market_data.fetch(flow.ticker(), &flow.category()).await;
        flow.complete_fetch(outcome)
    }

    /// The cached target income for a ticker, if any.
    #[must_use]
    pub fn cached_income_target(&self, ticker: &str) -> Option<f64> {
        self.state.store.get_f64(&income_target_key(ticker))
    }

    // ── Insights ────────────────────────────────────────────────────

    /// Generative commentary over the filtered ledger. Always returns a
    /// displayable string — configuration and service failures degrade to
    /// fixed messages.
    pub async fn portfolio_insights(&self) -> String {
        let Some(provider) = &self.insights else {
            return "Generative insights are not configured — set an API key in settings.".into();
        };

        let assets: Vec<Asset> = self.filtered_assets().into_iter().cloned().collect();
        let stats = self.stats();

        match provider.portfolio_insights(&assets, &stats).await {
            Ok(text) => text,
            Err(_) => "Could not generate insights right now. Check your API key and try again.".into(),
        }
    }

    /// Replace the insights provider with an arbitrary implementation.
    pub fn set_insights_provider(&mut self, provider: Box<dyn InsightsProvider>) {
        self.insights = Some(provider);
    }

    /// Register an extra market-data provider at the end of the fallback
    /// order.
    pub fn register_market_provider(&mut self, provider: Box<dyn providers::traits::MarketDataProvider>) {
        self.market_data.register(provider);
    }

    // ── Export & Dirty State ────────────────────────────────────────

    /// Export the full state as JSON (unencrypted snapshot for
    /// debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize state: {e}")))
    }

    /// Returns `true` if the state has been modified since the last save or
    /// load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Whether a gated async action is currently in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(state: DashboardState) -> Self {
        let market_data = MarketDataRegistry::new_with_defaults(&state.store);
        let insights = insights_from_store(&state.store);
        let auth = auth_from_store(&state.store);
        let context = state
            .store
            .get(KEY_CONTEXT)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            state,
            context_filter: ContextFilter::new(),
            stats_service: StatsService::new(),
            allocation_service: AllocationService::new(),
            chart_service: ChartService::new(),
            goal_service: GoalService::new(),
            connection_service: ConnectionService::new(),
            market_data,
            insights,
            auth,
            session: None,
            session_listeners: Vec::new(),
            context,
            access_mode: AccessMode::Full,
            loading: false,
            dirty: false,
        }
    }

    fn ensure_mutable(&self) -> Result<(), CoreError> {
        if self.access_mode.is_read_only() {
            Err(CoreError::ReadOnlyMode)
        } else {
            Ok(())
        }
    }

    fn install_session(&mut self, session: Session) {
        self.state.profile.display_name = session.display_name.clone();
        self.state.profile.email = session.email.clone();
        self.session = Some(session);
        self.notify_session_listeners();
    }

    fn notify_session_listeners(&self) {
        for listener in &self.session_listeners {
            listener(self.session.as_ref());
        }
    }

    fn rebuild_providers(&mut self) {
        self.market_data = MarketDataRegistry::new_with_defaults(&self.state.store);
        self.insights = insights_from_store(&self.state.store);
    }
}

fn insights_from_store(store: &LocalStore) -> Option<Box<dyn InsightsProvider>> {
    store
        .get(&api_key_key("gemini"))
        .map(|key| Box::new(GeminiProvider::new(key)) as Box<dyn InsightsProvider>)
}

fn auth_from_store(store: &LocalStore) -> Option<Box<dyn AuthProvider>> {
    match (store.get(KEY_AUTH_URL), store.get(KEY_AUTH_KEY)) {
        (Some(url), Some(key)) => {
            Some(Box::new(HostedAuthProvider::new(url, key)) as Box<dyn AuthProvider>)
        }
        _ => None,
    }
}
