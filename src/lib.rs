use std::sync::Arc;

pub mod constants;
mod domain;
pub mod errors;
mod infrastructure;
mod interfaces;
pub mod settings;
pub mod theme;

pub use domain::{entities, use_cases, validation};
pub use infrastructure::{http, storage, utils};
pub use interfaces::{layouts, middlewares, repositories, routes};

use entities::user::AccountKind;
use errors::AppError;
use http::ApiClient;
use layouts::LayoutShell;
use repositories::http_repo::HttpRepo;
use routes::Route;
use settings::AppConfig;
use storage::{FileStore, KeyValueStore, SessionStore};
use theme::ThemeSettings;
use use_cases::auth::{CompleteProfilePage, LoginPage, LogoutPage, PasswordRecoveryPage, RegisterPage};
use use_cases::browse_practicas::BrowsePracticasPage;
use use_cases::create_practica::CreatePracticaPage;
use use_cases::manage_practicas::PracticaListPage;
use use_cases::practica_shell::PracticaShell;
use use_cases::profile::{EditProfilePage, UserProfilePage};
use utils::clock::{Clock, SystemClock};

/// Shared services every page is built from.
pub struct AppState {
    pub session: SessionStore,
    pub theme: ThemeSettings,
    pub repo: Arc<HttpRepo>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Opens the file-backed store at `config.storage_path`.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let store = FileStore::open(&config.storage_path)?;
        Self::with_store(config, Arc::new(store), Arc::new(SystemClock))
    }

    pub fn with_store(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let base_url = config.base_url().map_err(|e| AppError::InvalidInput(e.to_string()))?;
        let timeout = config.timeout().map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let session = SessionStore::new(store.clone(), config.session_ttl());
        let theme = ThemeSettings::load(store, config.theme_ttl());
        let client = ApiClient::new(base_url, timeout, session.clone())?;

        Ok(AppState {
            session,
            theme,
            repo: Arc::new(HttpRepo::new(client)),
            clock,
        })
    }

    pub fn layout(&self, route: &Route) -> LayoutShell {
        LayoutShell::new(route.layout, route.path, self.theme.clone())
    }

    pub fn login_page(&self, kind: AccountKind) -> LoginPage<HttpRepo> {
        LoginPage::new(self.repo.clone(), self.session.clone(), kind)
    }

    pub fn register_page(&self, kind: AccountKind) -> RegisterPage<HttpRepo> {
        RegisterPage::new(self.repo.clone(), kind)
    }

    pub fn password_recovery_page(&self) -> PasswordRecoveryPage<HttpRepo> {
        PasswordRecoveryPage::new(self.repo.clone())
    }

    pub fn complete_profile_page(&self) -> CompleteProfilePage<HttpRepo> {
        CompleteProfilePage::new(self.repo.clone(), self.session.clone(), self.clock.clone())
    }

    pub fn logout_page(&self, kind: AccountKind) -> LogoutPage {
        LogoutPage::new(self.session.clone(), kind)
    }

    pub fn user_profile_page(&self) -> UserProfilePage<HttpRepo> {
        UserProfilePage::new(self.repo.clone(), self.session.clone())
    }

    pub fn edit_profile_page(&self) -> EditProfilePage<HttpRepo> {
        EditProfilePage::new(self.repo.clone(), self.session.clone())
    }

    pub fn create_practica_page(&self) -> CreatePracticaPage<HttpRepo> {
        CreatePracticaPage::new(self.repo.clone(), self.session.clone(), self.clock.clone())
    }

    pub fn practica_list_page(&self) -> PracticaListPage<HttpRepo> {
        PracticaListPage::new(self.repo.clone())
    }

    pub fn browse_page(&self) -> BrowsePracticasPage<HttpRepo> {
        BrowsePracticasPage::new(self.repo.clone())
    }

    pub fn practica_shell(&self) -> PracticaShell<HttpRepo> {
        PracticaShell::new(self.repo.clone(), self.session.clone(), self.clock.clone())
    }
}
