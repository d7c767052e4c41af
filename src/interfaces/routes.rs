use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::constants::{
    ROUTE_COMPANY_HOME, ROUTE_COMPLETE_PROFILE, ROUTE_CREATE_PRACTICA, ROUTE_EDIT_PROFILE,
    ROUTE_LIST_PRACTICAS, ROUTE_LOGIN, ROUTE_LOGIN_COMPANY, ROUTE_LOGOUT, ROUTE_LOGOUT_COMPANY,
    ROUTE_PASSWORD_RECOVERY, ROUTE_REGISTER, ROUTE_REGISTER_COMPANY, ROUTE_STUDENT_HOME,
    ROUTE_USER_PROFILE,
};
use crate::entities::user::AccountKind;

/// Chrome wrapped around a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Auth,
    Student,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "account", rename_all = "snake_case")]
pub enum Page {
    Login(AccountKind),
    Register(AccountKind),
    CompleteProfile,
    PasswordRecovery,
    UserProfile,
    EditProfile,
    Logout(AccountKind),
    BrowsePracticas,
    CreatePractica,
    ListPracticas,
    ManagePracticas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub page: Page,
    pub layout: Layout,
}

static ROUTES: Lazy<HashMap<&'static str, Route>> = Lazy::new(|| {
    let mut table = HashMap::new();
    auth_routes(&mut table);
    student_routes(&mut table);
    company_routes(&mut table);
    table
});

fn add(table: &mut HashMap<&'static str, Route>, layout: Layout, path: &'static str, page: Page) {
    table.insert(path, Route { path, page, layout });
}

fn auth_routes(table: &mut HashMap<&'static str, Route>) {
    add(table, Layout::Auth, ROUTE_LOGIN, Page::Login(AccountKind::Student));
    add(table, Layout::Auth, ROUTE_REGISTER, Page::Register(AccountKind::Student));
    add(table, Layout::Auth, ROUTE_LOGIN_COMPANY, Page::Login(AccountKind::Company));
    add(table, Layout::Auth, ROUTE_REGISTER_COMPANY, Page::Register(AccountKind::Company));
    add(table, Layout::Auth, ROUTE_COMPLETE_PROFILE, Page::CompleteProfile);
    add(table, Layout::Auth, ROUTE_PASSWORD_RECOVERY, Page::PasswordRecovery);
}

fn student_routes(table: &mut HashMap<&'static str, Route>) {
    add(table, Layout::Student, ROUTE_USER_PROFILE, Page::UserProfile);
    add(table, Layout::Student, ROUTE_EDIT_PROFILE, Page::EditProfile);
    add(table, Layout::Student, ROUTE_LOGOUT, Page::Logout(AccountKind::Student));
    add(table, Layout::Student, ROUTE_STUDENT_HOME, Page::BrowsePracticas);
}

fn company_routes(table: &mut HashMap<&'static str, Route>) {
    add(table, Layout::Company, ROUTE_CREATE_PRACTICA, Page::CreatePractica);
    add(table, Layout::Company, ROUTE_LIST_PRACTICAS, Page::ListPracticas);
    add(table, Layout::Company, ROUTE_COMPANY_HOME, Page::ManagePracticas);
    add(table, Layout::Company, ROUTE_LOGOUT_COMPANY, Page::Logout(AccountKind::Company));
}

/// Drops query, fragment and trailing slashes; the root stays `/`.
pub fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROUTE_LOGIN
    } else {
        trimmed
    }
}

pub fn resolve(path: &str) -> Option<&'static Route> {
    ROUTES.get(normalize(path))
}

/// Every route, ordered by path.
pub fn all() -> Vec<&'static Route> {
    let mut routes: Vec<_> = ROUTES.values().collect();
    routes.sort_by_key(|r| r.path);
    routes
}
