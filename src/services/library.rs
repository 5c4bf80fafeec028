//! Library orchestrator: owns the user directory, the catalog and the single
//! active session, and exposes the account, session and lending operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use mockable::Clock;

use crate::{
    config::OverdueScope,
    error::{AppError, AppResult},
    models::{
        item::{CatalogItem, FieldValue, ItemDetails, ItemKind, ItemView},
        user::{User, UserCategory, UserProfile, UserShort},
    },
    repository::Repository,
};

/// Available titles grouped by kind, kinds in display order
pub type AvailableByKind = IndexMap<ItemKind, Vec<String>>;

pub struct Library {
    repository: Repository,
    /// Username of the logged-in user
    session: Option<String>,
    clock: Arc<dyn Clock + Send + Sync>,
    overdue_scope: OverdueScope,
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("repository", &self.repository)
            .field("session", &self.session)
            .field("overdue_scope", &self.overdue_scope)
            .finish_non_exhaustive()
    }
}

impl Library {
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            repository: Repository::new(),
            session: None,
            clock,
            overdue_scope: OverdueScope::default(),
        }
    }

    pub fn with_overdue_scope(mut self, scope: OverdueScope) -> Self {
        self.overdue_scope = scope;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    // -----------------------------------------------------------------------
    // Accounts and session
    // -----------------------------------------------------------------------

    /// Register a new user. `school` is required for students and ignored otherwise.
    pub fn create_account(
        &mut self,
        username: &str,
        password: &str,
        category: i64,
        school: Option<String>,
    ) -> AppResult<UserShort> {
        if self.repository.users.exists(username) {
            tracing::warn!("Account creation refused: username '{}' already exists", username);
            return Err(AppError::UsernameExists(username.to_string()));
        }

        let profile = match UserCategory::try_from(category)? {
            UserCategory::Student => {
                let school = school
                    .ok_or_else(|| AppError::Validation("A school is required for student accounts".to_string()))?;
                UserProfile::Student { school }
            }
            UserCategory::Lecturer => UserProfile::Lecturer,
            UserCategory::PublicUser => UserProfile::PublicUser,
        };

        let user = User::new(username, password, profile);
        let short = UserShort::from(&user);
        self.repository.users.add(user);

        tracing::info!("Account created: {} ({})", short.username, short.category);
        Ok(short)
    }

    /// Open the session for `username`, replacing any current one
    pub fn login(&mut self, username: &str, password: &str) -> AppResult<UserShort> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .filter(|user| user.authenticate(password))
            .ok_or_else(|| {
                tracing::warn!("Login failed for '{}'", username);
                AppError::InvalidCredentials
            })?;

        let short = UserShort::from(user);
        self.session = Some(short.username.clone());

        tracing::info!("Login successful: {}", short.username);
        Ok(short)
    }

    /// Close the session. Does nothing when nobody is logged in.
    pub fn logout(&mut self) {
        if let Some(username) = self.session.take() {
            tracing::info!("Logged out: {}", username);
        }
    }

    pub fn current_user(&self) -> AppResult<UserShort> {
        self.session_user().map(UserShort::from)
    }

    pub fn users(&self) -> Vec<UserShort> {
        self.repository.users.list().iter().map(UserShort::from).collect()
    }

    fn session_user(&self) -> AppResult<&User> {
        let username = self.session.as_deref().ok_or(AppError::NotLoggedIn)?;
        self.repository
            .users
            .get_by_username(username)
            .ok_or_else(|| AppError::Internal(format!("Session user '{}' is not registered", username)))
    }

    // -----------------------------------------------------------------------
    // Lending
    // -----------------------------------------------------------------------

    /// Lend the first item titled `title` to the logged-in user.
    ///
    /// With [`OverdueScope::Catalog`] the catalog is scanned in order and the
    /// first overdue item met before (or at) the requested title refuses the
    /// loan, whatever its title. With [`OverdueScope::Item`] only the requested
    /// item's own overdue status is checked.
    pub fn lend_resource(&mut self, title: &str) -> AppResult<DateTime<Utc>> {
        let (username, category) = {
            let user = self.session_user()?;
            (user.username().to_string(), user.category())
        };
        let now = self.now();
        let scope = self.overdue_scope;

        for item in self.repository.catalog.iter_mut() {
            if scope == OverdueScope::Catalog && item.is_overdue(now) {
                tracing::warn!(
                    "Lending '{}' refused: '{}' is overdue since {}",
                    title,
                    item.title(),
                    item.due_date().unwrap_or(now)
                );
                return Err(AppError::OverdueBlock(item.title().to_string()));
            }

            if item.title() != title {
                continue;
            }

            if item.is_overdue(now) {
                tracing::warn!("Lending '{}' refused: item is overdue", title);
                return Err(AppError::OverdueBlock(title.to_string()));
            }

            let due_date = item.lend(category, now).map_err(|e| {
                tracing::debug!("{}", e);
                e
            })?;
            tracing::info!("{} lent successfully to {}. Due date: {}", title, username, due_date);
            return Ok(due_date);
        }

        tracing::debug!("Lending '{}' refused: not in catalog", title);
        Err(AppError::NotFound(title.to_string()))
    }

    /// Return the first item titled `title`. The returner is not checked against the borrower.
    pub fn return_resource(&mut self, title: &str) -> AppResult<()> {
        let username = self.session_user()?.username().to_string();

        let item = self
            .repository
            .catalog
            .find_by_title_mut(title)
            .ok_or_else(|| AppError::NotFound(title.to_string()))?;

        item.return_item()?;
        tracing::info!("{} returned successfully by {}", title, username);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Catalog
    // -----------------------------------------------------------------------

    /// Titles of every non-overdue item, grouped by kind; empty kinds are left out
    pub fn list_available(&self) -> AvailableByKind {
        let now = self.now();

        ItemKind::ALL
            .iter()
            .filter_map(|kind| {
                let titles: Vec<String> = self
                    .repository
                    .catalog
                    .iter()
                    .filter(|item| item.kind() == *kind && !item.is_overdue(now))
                    .map(|item| item.title().to_string())
                    .collect();
                (!titles.is_empty()).then_some((*kind, titles))
            })
            .collect()
    }

    /// Every catalog item with its loan state
    pub fn list_items(&self) -> Vec<ItemView> {
        let now = self.now();
        self.repository.catalog.iter().map(|item| item.view(now)).collect()
    }

    /// Build an item of `variant` from positional fields and append it
    pub fn add_item(&mut self, variant: i64, title: &str, fields: &[FieldValue]) -> AppResult<ItemView> {
        let kind = ItemKind::try_from(variant)?;
        let details = ItemDetails::from_fields(kind, fields)?;
        let item = CatalogItem::new(title, details);
        let view = item.view(self.now());

        self.add_resource(item);
        tracing::info!("New item '{}' added successfully", title);
        Ok(view)
    }

    /// Append an already built item
    pub fn add_resource(&mut self, item: CatalogItem) {
        self.repository.catalog.add(item);
    }

    pub fn catalog_len(&self) -> usize {
        self.repository.catalog.len()
    }
}
