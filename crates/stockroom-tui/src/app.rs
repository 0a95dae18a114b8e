//! Application state management for Stockroom.
//!
//! This module contains the core `App` struct: the active page, form and
//! list state, the shared session and the channels background API calls
//! report through.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use stockroom_core::auth::{landing_route, redirect_if_authenticated};
use stockroom_core::models::{filter_products, LoginResponse, Product, UserProfile};
use stockroom_core::navigation::ChannelNavigator;
use stockroom_core::{
    ApiClient, ApiError, Config, CredentialStore, GuardState, Route, Session, SessionGuard,
};

use crate::forms::{CredentialsForm, ProductForm};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// How long a notification stays in the status bar.
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingDelete,
    ConfirmingQuit,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification shown in the status bar.
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= TOAST_DURATION
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// What a finished API call produced.
enum TaskOutcome {
    LoggedIn(Result<LoginResponse, ApiError>),
    Registered(Result<String, ApiError>),
    Products(Result<Vec<Product>, ApiError>),
    ProductLoaded(i64, Result<Product, ApiError>),
    ProductSaved {
        updated: bool,
        result: Result<Product, ApiError>,
    },
    ProductDeleted(Result<(), ApiError>),
}

/// A task outcome tagged with the page visit that started the call. Results
/// from an earlier visit only contribute their notification, even when the
/// same route is showing again.
struct TaskResult {
    origin: Route,
    visit: u64,
    outcome: TaskOutcome,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub session: Arc<Session>,
    pub api: ApiClient,

    // Page state
    pub state: AppState,
    pub route: Route,
    pub guard: SessionGuard,
    pub user: Option<UserProfile>,
    pub toast: Option<Toast>,

    // Forms
    pub login_form: CredentialsForm,
    pub register_form: CredentialsForm,
    pub product_form: ProductForm,

    // Product list
    pub products: Vec<Product>,
    pub products_loading: bool,
    pub search_query: String,
    pub selection: usize,
    pub pending_delete: Option<Product>,

    /// Where `last_username` is persisted; `None` keeps it in memory only.
    config_path: Option<PathBuf>,
    pending_tasks: usize,
    /// Bumped each time a different page is entered.
    visit: u64,
    nav_rx: mpsc::UnboundedReceiver<Route>,
    task_tx: mpsc::Sender<TaskResult>,
    task_rx: mpsc::Receiver<TaskResult>,
}

impl App {
    /// Build the app over the on-disk credential store, with page
    /// navigation delivered through a channel this app drains.
    pub fn new(config: Config) -> Result<Self> {
        let store = CredentialStore::open(config.data_dir().ok());
        let (navigator, nav_rx) = ChannelNavigator::channel();
        let session = Arc::new(Session::new(store, Arc::new(navigator)));

        let mut app = Self::with_session(config, session, nav_rx)?;
        app.config_path = Config::path().ok();
        Ok(app)
    }

    /// Build the app over an existing session. `nav_rx` must receive the
    /// routes the session's navigator issues.
    pub fn with_session(
        config: Config,
        session: Arc<Session>,
        nav_rx: mpsc::UnboundedReceiver<Route>,
    ) -> Result<Self> {
        let api = ApiClient::from_config(&config, session.clone())?;
        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let login_form = CredentialsForm::login(config.last_username.as_deref());

        Ok(Self {
            config,
            session,
            api,
            state: AppState::Normal,
            route: Route::Home,
            guard: SessionGuard::new(),
            user: None,
            toast: None,
            login_form,
            register_form: CredentialsForm::register(),
            product_form: ProductForm::new_product(),
            products: Vec::new(),
            products_loading: false,
            search_query: String::new(),
            selection: 0,
            pending_delete: None,
            config_path: None,
            pending_tasks: 0,
            visit: 0,
            nav_rx,
            task_tx,
            task_rx,
        })
    }

    /// Show the home page, which forwards to the right landing page.
    pub fn start(&mut self) {
        info!(api = %self.api.base_url(), "Starting at home page");
        self.activate(Route::Home);
    }

    /// Request a page change. It takes effect on the next tick.
    pub fn go(&self, route: Route) {
        self.session.navigate(route);
    }

    pub fn is_busy(&self) -> bool {
        self.pending_tasks > 0
    }

    // =========================================================================
    // Page activation
    // =========================================================================

    /// Switch to `route` and run its entry logic: guards, guest redirects and
    /// initial fetches. Re-activating the current page keeps its form data.
    fn activate(&mut self, route: Route) {
        let entering = route != self.route;
        debug!(from = %self.route, to = %route, "Activating page");
        self.route = route;
        if entering {
            self.visit += 1;
            self.state = AppState::Normal;
            self.pending_delete = None;
        }

        if !route.is_protected() {
            self.guard = SessionGuard::new();
        }

        match route {
            Route::Home => {
                let next = landing_route(&self.session);
                self.session.navigate(next);
            }
            Route::Login => {
                if redirect_if_authenticated(&self.session) {
                    return;
                }
                if entering {
                    self.login_form = CredentialsForm::login(self.config.last_username.as_deref());
                }
            }
            Route::Register => {
                if redirect_if_authenticated(&self.session) {
                    return;
                }
                if entering {
                    self.register_form = CredentialsForm::register();
                }
            }
            Route::Products => {
                if self.guard.activate(&self.session) == GuardState::Authenticated {
                    self.user = self.session.user();
                    self.refresh_products();
                }
            }
            Route::NewProduct => {
                if self.guard.activate(&self.session) == GuardState::Authenticated && entering {
                    self.product_form = ProductForm::new_product();
                }
            }
            Route::EditProduct(id) => {
                if self.guard.activate(&self.session) == GuardState::Authenticated && entering {
                    self.product_form = ProductForm::edit(id);
                    let api = self.api.clone();
                    self.spawn_task(async move {
                        TaskOutcome::ProductLoaded(id, api.get_product(id).await)
                    });
                }
            }
        }
    }

    // =========================================================================
    // Background tasks
    // =========================================================================

    fn spawn_task<F>(&mut self, task: F)
    where
        F: Future<Output = TaskOutcome> + Send + 'static,
    {
        let tx = self.task_tx.clone();
        let origin = self.route;
        let visit = self.visit;
        self.pending_tasks += 1;

        tokio::spawn(async move {
            let outcome = task.await;
            if tx.send(TaskResult { origin, visit, outcome }).await.is_err() {
                debug!("App closed before task finished");
            }
        });
    }

    /// Apply pending navigations, then finished task results. Called once per
    /// tick of the UI loop.
    pub fn check_background_tasks(&mut self) {
        while let Ok(route) = self.nav_rx.try_recv() {
            self.activate(route);
        }

        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.pending_tasks = self.pending_tasks.saturating_sub(1);
            self.process_task_result(result);
        }

        self.expire_toast(Instant::now());
    }

    fn process_task_result(&mut self, result: TaskResult) {
        let active = result.visit == self.visit;
        if !active {
            debug!(
                origin = %result.origin,
                visit = result.visit,
                current = %self.route,
                "Result for an earlier page visit"
            );
        }

        match result.outcome {
            TaskOutcome::LoggedIn(outcome) => {
                if active {
                    self.login_form.submitting = false;
                }
                match outcome {
                    Ok(LoginResponse { token, user }) => {
                        self.notify(ToastKind::Success, "Login successful!");
                        if active {
                            info!(username = %user.username, "Login successful");
                            self.session.init(&token, Some(&user));
                            self.remember_username(&user.username);
                            self.login_form.password.clear();
                            self.session.navigate(Route::Products);
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Login failed");
                        self.notify(ToastKind::Error, e.to_string());
                    }
                }
            }
            TaskOutcome::Registered(outcome) => {
                if active {
                    self.register_form.submitting = false;
                }
                match outcome {
                    Ok(message) => {
                        self.notify(ToastKind::Success, message);
                        if active {
                            self.session.navigate(Route::Login);
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Registration failed");
                        self.notify(ToastKind::Error, e.to_string());
                    }
                }
            }
            TaskOutcome::Products(outcome) => {
                if active {
                    self.products_loading = false;
                }
                match outcome {
                    Ok(products) => {
                        if active {
                            self.products = products;
                            self.clamp_selection();
                        }
                    }
                    Err(e) => self.notify(ToastKind::Error, e.to_string()),
                }
            }
            TaskOutcome::ProductLoaded(id, outcome) => match outcome {
                Ok(product) => {
                    if active && self.product_form.product_id == Some(id) {
                        self.product_form.load(&product);
                    }
                }
                Err(e) => {
                    warn!(id, error = %e, "Failed to load product");
                    self.notify(ToastKind::Error, "Failed to load product");
                    if active && !e.is_unauthorized() {
                        self.session.navigate(Route::Products);
                    }
                }
            },
            TaskOutcome::ProductSaved { updated, result } => {
                if active {
                    self.product_form.submitting = false;
                }
                match result {
                    Ok(product) => {
                        let message = if updated {
                            "Product updated successfully"
                        } else {
                            "Product created successfully"
                        };
                        info!(id = product.id, updated, "Product saved");
                        self.notify(ToastKind::Success, message);
                        if active {
                            self.session.navigate(Route::Products);
                        }
                    }
                    Err(e) => self.notify(ToastKind::Error, e.to_string()),
                }
            }
            TaskOutcome::ProductDeleted(outcome) => match outcome {
                Ok(()) => {
                    self.notify(ToastKind::Success, "Product deleted successfully");
                    if active {
                        self.refresh_products();
                    }
                }
                Err(e) => self.notify(ToastKind::Error, e.to_string()),
            },
        }
    }

    fn remember_username(&mut self, username: &str) {
        self.config.last_username = Some(username.to_string());
        if let Some(ref path) = self.config_path {
            if let Err(e) = self.config.save_to(path) {
                warn!(error = %e, "Failed to save config");
            }
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    // =========================================================================
    // Auth pages
    // =========================================================================

    pub fn submit_login(&mut self) {
        if self.login_form.submitting {
            return;
        }
        let Some(credentials) = self.login_form.submit() else {
            return;
        };
        self.login_form.submitting = true;
        let api = self.api.clone();
        self.spawn_task(async move { TaskOutcome::LoggedIn(api.login(&credentials).await) });
    }

    pub fn submit_register(&mut self) {
        if self.register_form.submitting {
            return;
        }
        let Some(credentials) = self.register_form.submit() else {
            return;
        };
        self.register_form.submitting = true;
        let api = self.api.clone();
        self.spawn_task(async move { TaskOutcome::Registered(api.register(&credentials).await) });
    }

    pub fn logout(&mut self) {
        info!("Logging out");
        self.session.logout();
        self.products.clear();
        self.user = None;
        self.notify(ToastKind::Success, "Logged out successfully");
    }

    // =========================================================================
    // Product list
    // =========================================================================

    pub fn refresh_products(&mut self) {
        self.products_loading = true;
        let api = self.api.clone();
        self.spawn_task(async move { TaskOutcome::Products(api.list_products().await) });
    }

    /// Products matching the current search, in backend order.
    pub fn visible_products(&self) -> Vec<&Product> {
        filter_products(&self.products, &self.search_query)
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.visible_products().get(self.selection).copied()
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_products().len();
        self.selection = self.selection.min(count.saturating_sub(1));
    }

    pub fn select_next(&mut self, step: usize) {
        let count = self.visible_products().len();
        if count > 0 {
            self.selection = (self.selection + step).min(count - 1);
        }
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selection = self.selection.saturating_sub(step);
    }

    pub fn select_last(&mut self) {
        self.selection = self.visible_products().len().saturating_sub(1);
    }

    pub fn push_search_char(&mut self, c: char) {
        if !c.is_control() {
            self.search_query.push(c);
            self.selection = 0;
        }
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.selection = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.selection = 0;
    }

    pub fn edit_selected(&self) {
        if let Some(product) = self.selected_product() {
            self.go(Route::EditProduct(product.id));
        }
    }

    /// Ask for confirmation before deleting the selected product.
    pub fn request_delete(&mut self) {
        if let Some(product) = self.selected_product().cloned() {
            self.pending_delete = Some(product);
            self.state = AppState::ConfirmingDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.state = AppState::Normal;
        let Some(product) = self.pending_delete.take() else {
            return;
        };
        info!(id = product.id, "Deleting product");
        let api = self.api.clone();
        self.spawn_task(async move { TaskOutcome::ProductDeleted(api.delete_product(product.id).await) });
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.state = AppState::Normal;
    }

    // =========================================================================
    // Product form
    // =========================================================================

    pub fn submit_product(&mut self) {
        if self.product_form.submitting || self.product_form.loading {
            return;
        }
        let Some(draft) = self.product_form.submit() else {
            return;
        };
        self.product_form.submitting = true;
        let api = self.api.clone();
        match self.product_form.product_id {
            Some(id) => self.spawn_task(async move {
                TaskOutcome::ProductSaved {
                    updated: true,
                    result: api.update_product(id, &draft).await,
                }
            }),
            None => self.spawn_task(async move {
                TaskOutcome::ProductSaved {
                    updated: false,
                    result: api.create_product(&draft).await,
                }
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::api::SESSION_EXPIRED_MESSAGE;

    /// App over an in-memory session, pointed at a port nothing listens on.
    fn test_app() -> App {
        let (navigator, nav_rx) = ChannelNavigator::channel();
        let session = Arc::new(Session::new(CredentialStore::in_memory(), Arc::new(navigator)));
        let config = Config {
            api_url: Some("http://127.0.0.1:9".to_string()),
            ..Config::default()
        };
        App::with_session(config, session, nav_rx).unwrap()
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: format!("{} for the office", name),
            price: 10.0,
        }
    }

    /// The page visit a task started now would be tagged with.
    fn current_visit(app: &App) -> (Route, u64) {
        (app.route, app.visit)
    }

    fn deliver_from(app: &mut App, (origin, visit): (Route, u64), outcome: TaskOutcome) {
        app.pending_tasks += 1;
        assert!(app.task_tx.try_send(TaskResult { origin, visit, outcome }).is_ok());
        app.check_background_tasks();
    }

    /// Deliver a result for the page that is showing.
    fn deliver(app: &mut App, outcome: TaskOutcome) {
        let visit = current_visit(app);
        deliver_from(app, visit, outcome);
    }

    // ------------------------------------------------------------------------
    // Navigation and guards
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_home_sends_guest_to_login() {
        let mut app = test_app();
        app.start();
        app.check_background_tasks();
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_home_sends_member_to_products() {
        let mut app = test_app();
        app.session.init("abc123", Some(&UserProfile::from_username("ana")));
        app.start();
        app.check_background_tasks();
        assert_eq!(app.route, Route::Products);
        assert_eq!(app.guard.state(), GuardState::Authenticated);
        assert_eq!(app.user.as_ref().map(|u| u.username.as_str()), Some("ana"));
        assert!(app.products_loading);
    }

    #[tokio::test]
    async fn test_guard_bounces_guest_from_products() {
        let mut app = test_app();
        app.go(Route::NewProduct);
        app.check_background_tasks();
        assert_eq!(app.route, Route::Login);
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn test_login_page_redirects_member() {
        let mut app = test_app();
        app.session.init("abc123", None);
        app.go(Route::Register);
        app.check_background_tasks();
        assert_eq!(app.route, Route::Products);
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let mut app = test_app();
        app.session.init("abc123", None);
        app.go(Route::Products);
        app.check_background_tasks();

        app.logout();
        app.check_background_tasks();
        assert_eq!(app.route, Route::Login);
        assert!(!app.session.is_authenticated());
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Logged out successfully")
        );
    }

    // ------------------------------------------------------------------------
    // Task results
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_login_success_starts_session() {
        let mut app = test_app();
        app.start();
        app.check_background_tasks();
        app.login_form.submitting = true;

        deliver(
            &mut app,
            TaskOutcome::LoggedIn(Ok(LoginResponse {
                token: "abc123".to_string(),
                user: UserProfile::from_username("ana"),
            })),
        );
        assert_eq!(app.session.token().as_deref(), Some("abc123"));
        assert_eq!(app.config.last_username.as_deref(), Some("ana"));
        assert!(!app.login_form.submitting);

        app.check_background_tasks();
        assert_eq!(app.route, Route::Products);
    }

    #[tokio::test]
    async fn test_login_failure_keeps_form() {
        let mut app = test_app();
        app.start();
        app.check_background_tasks();
        app.login_form.username = "ana".to_string();
        app.login_form.password = "wrong".to_string();
        app.login_form.submitting = true;

        // A 401 on login logs out, which re-activates the login page
        app.go(Route::Login);
        deliver(
            &mut app,
            TaskOutcome::LoggedIn(Err(ApiError::Unauthorized("Invalid credentials.".to_string()))),
        );

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.login_form.username, "ana");
        assert_eq!(app.login_form.password, "wrong");
        assert!(!app.login_form.submitting);
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Invalid credentials.");
    }

    #[tokio::test]
    async fn test_register_success_goes_to_login() {
        let mut app = test_app();
        app.go(Route::Register);
        app.check_background_tasks();

        deliver(
            &mut app,
            TaskOutcome::Registered(Ok("User registered successfully.".to_string())),
        );
        app.check_background_tasks();
        assert_eq!(app.route, Route::Login);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("User registered successfully.")
        );
    }

    #[tokio::test]
    async fn test_stale_result_only_notifies() {
        let mut app = test_app();
        app.session.init("abc123", None);
        app.go(Route::Products);
        app.check_background_tasks();
        let list_visit = current_visit(&app);

        app.go(Route::NewProduct);
        app.check_background_tasks();

        deliver_from(
            &mut app,
            list_visit,
            TaskOutcome::Products(Ok(vec![product(1, "Lamp")])),
        );
        assert!(app.products.is_empty());

        deliver_from(
            &mut app,
            list_visit,
            TaskOutcome::Products(Err(ApiError::Unauthorized(SESSION_EXPIRED_MESSAGE.to_string()))),
        );
        assert_eq!(app.route, Route::NewProduct);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(SESSION_EXPIRED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_save_from_earlier_visit_of_same_page_is_stale() {
        let mut app = test_app();
        app.session.init("abc123", None);
        app.go(Route::EditProduct(5));
        app.check_background_tasks();
        let first_visit = current_visit(&app);

        // Leave mid-save, then come back to the same product
        app.go(Route::Products);
        app.check_background_tasks();
        app.go(Route::EditProduct(5));
        app.check_background_tasks();
        assert_eq!(app.route, Route::EditProduct(5));
        app.product_form.submitting = true;

        deliver_from(
            &mut app,
            first_visit,
            TaskOutcome::ProductSaved {
                updated: true,
                result: Ok(product(5, "Lamp")),
            },
        );
        assert!(app.product_form.submitting);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Product updated successfully")
        );
        app.check_background_tasks();
        assert_eq!(app.route, Route::EditProduct(5));
    }

    #[tokio::test]
    async fn test_products_result_fills_list() {
        let mut app = test_app();
        app.session.init("abc123", None);
        app.go(Route::Products);
        app.check_background_tasks();

        deliver(
            &mut app,
            TaskOutcome::Products(Ok(vec![product(1, "Lamp"), product(2, "Mug")])),
        );
        assert!(!app.products_loading);
        assert_eq!(app.products.len(), 2);
        assert_eq!(app.selected_product().map(|p| p.id), Some(1));
    }

    #[tokio::test]
    async fn test_edit_load_failure_returns_to_list() {
        let mut app = test_app();
        app.session.init("abc123", None);
        app.go(Route::EditProduct(42));
        app.check_background_tasks();
        assert!(app.product_form.loading);

        deliver(
            &mut app,
            TaskOutcome::ProductLoaded(
                42,
                Err(ApiError::InvalidResponse("Failed to fetch product".to_string())),
            ),
        );
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Failed to load product")
        );
        app.check_background_tasks();
        assert_eq!(app.route, Route::Products);
    }

    #[tokio::test]
    async fn test_product_saved_returns_to_list() {
        let mut app = test_app();
        app.session.init("abc123", None);
        app.go(Route::NewProduct);
        app.check_background_tasks();
        app.product_form.submitting = true;

        deliver(
            &mut app,
            TaskOutcome::ProductSaved {
                updated: false,
                result: Ok(product(3, "Mug")),
            },
        );
        assert!(!app.product_form.submitting);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Product created successfully")
        );
        app.check_background_tasks();
        assert_eq!(app.route, Route::Products);
    }

    #[tokio::test]
    async fn test_invalid_product_form_sends_nothing() {
        let mut app = test_app();
        app.session.init("abc123", None);
        app.go(Route::NewProduct);
        app.check_background_tasks();

        app.submit_product();
        assert!(!app.product_form.submitting);
        assert!(!app.is_busy());
        assert_eq!(app.product_form.errors.len(), 3);
    }

    // ------------------------------------------------------------------------
    // List interaction
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_search_filters_and_resets_selection() {
        let mut app = test_app();
        app.products = vec![product(1, "Lamp"), product(2, "Mug"), product(3, "Lampshade")];
        app.select_next(2);
        assert_eq!(app.selection, 2);

        for c in "lamp".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.selection, 0);
        let ids: Vec<i64> = app.visible_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        app.select_next(PAGE_SCROLL_SIZE);
        assert_eq!(app.selected_product().map(|p| p.id), Some(3));

        app.clear_search();
        assert_eq!(app.visible_products().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let mut app = test_app();
        app.products = vec![product(1, "Lamp")];

        app.request_delete();
        assert_eq!(app.state, AppState::ConfirmingDelete);
        assert_eq!(app.pending_delete.as_ref().map(|p| p.id), Some(1));

        app.cancel_delete();
        assert_eq!(app.state, AppState::Normal);
        assert!(app.pending_delete.is_none());
        assert!(!app.is_busy());

        app.request_delete();
        app.confirm_delete();
        assert!(app.pending_delete.is_none());
        assert!(app.is_busy());
    }

    #[tokio::test]
    async fn test_delete_on_empty_list_does_nothing() {
        let mut app = test_app();
        app.request_delete();
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_toast_expires() {
        let mut app = test_app();
        app.notify(ToastKind::Success, "Saved");
        let shown_at = app.toast.as_ref().unwrap().shown_at;

        app.expire_toast(shown_at + Duration::from_secs(1));
        assert!(app.toast.is_some());
        app.expire_toast(shown_at + TOAST_DURATION);
        assert!(app.toast.is_none());
    }
}
