use serde::Serialize;
use tokio::sync::watch;

use crate::constants::{
    ROUTE_COMPANY_HOME, ROUTE_LOGIN, ROUTE_LOGOUT, ROUTE_LOGOUT_COMPANY, ROUTE_REGISTER,
    ROUTE_STUDENT_HOME, ROUTE_USER_PROFILE,
};
use crate::domain::entities::theme::Theme;
use crate::errors::AppError;
use crate::interfaces::routes::Layout;
use crate::theme::ThemeSettings;

pub const BRAND: &str = "ULINK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

const AUTH_LINKS: &[NavLink] = &[
    NavLink { label: "Registrarse", path: ROUTE_REGISTER },
    NavLink { label: "Iniciar sesión", path: ROUTE_LOGIN },
];

const STUDENT_LINKS: &[NavLink] = &[
    NavLink { label: "Perfil", path: ROUTE_USER_PROFILE },
    NavLink { label: "Buscar", path: ROUTE_STUDENT_HOME },
    NavLink { label: "Salir", path: ROUTE_LOGOUT },
];

const COMPANY_LINKS: &[NavLink] = &[NavLink { label: "Salir", path: ROUTE_LOGOUT_COMPANY }];

impl Layout {
    /// Target of the brand link in the header.
    pub fn brand_link(self) -> &'static str {
        match self {
            Layout::Auth => ROUTE_LOGIN,
            Layout::Student => ROUTE_STUDENT_HOME,
            Layout::Company => ROUTE_COMPANY_HOME,
        }
    }

    pub fn nav_links(self) -> &'static [NavLink] {
        match self {
            Layout::Auth => AUTH_LINKS,
            Layout::Student => STUDENT_LINKS,
            Layout::Company => COMPANY_LINKS,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LayoutView {
    pub layout: Layout,
    pub brand: &'static str,
    pub brand_link: &'static str,
    pub nav: Vec<NavLink>,
    pub theme: Theme,
}

/// Header chrome of one mounted page; follows the shared theme setting.
pub struct LayoutShell {
    layout: Layout,
    current_path: String,
    theme: ThemeSettings,
    updates: watch::Receiver<Theme>,
}

impl LayoutShell {
    pub fn new(layout: Layout, current_path: impl Into<String>, theme: ThemeSettings) -> Self {
        let updates = theme.subscribe();
        LayoutShell {
            layout,
            current_path: current_path.into(),
            theme,
            updates,
        }
    }

    pub fn theme(&self) -> Theme {
        *self.updates.borrow()
    }

    pub fn toggle_theme(&self) -> Result<Theme, AppError> {
        self.theme.toggle()
    }

    /// Waits for the next theme change. `None` once the setting is gone.
    pub async fn theme_changed(&mut self) -> Option<Theme> {
        self.updates.changed().await.ok()?;
        Some(*self.updates.borrow_and_update())
    }

    /// Links to show; the link to the page already open is left out.
    pub fn nav(&self) -> Vec<NavLink> {
        self.layout
            .nav_links()
            .iter()
            .filter(|link| link.path != self.current_path)
            .copied()
            .collect()
    }

    pub fn view(&self) -> LayoutView {
        LayoutView {
            layout: self.layout,
            brand: BRAND,
            brand_link: self.layout.brand_link(),
            nav: self.nav(),
            theme: self.theme(),
        }
    }
}
