use std::env;

use anyhow::Context;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use ulink_client::{
    constants::ROUTE_LOGIN,
    routes::{self, Page},
    settings::AppConfig,
    use_cases::Redirect,
    AppState,
};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Builds the page behind `page`, runs its mount step and returns its view.
async fn render(state: &AppState, page: Page) -> anyhow::Result<(Value, Option<Redirect>)> {
    let rendered = match page {
        Page::Login(kind) => (serde_json::to_value(state.login_page(kind).view())?, None),
        Page::Register(kind) => (state.register_page(kind).view(), None),
        Page::CompleteProfile => (serde_json::to_value(state.complete_profile_page().view())?, None),
        Page::PasswordRecovery => (serde_json::to_value(state.password_recovery_page().view())?, None),
        Page::UserProfile => {
            let mut page = state.user_profile_page();
            let redirect = page.mount().await;
            (serde_json::to_value(page.view())?, redirect)
        }
        Page::EditProfile => {
            let mut page = state.edit_profile_page();
            let redirect = page.mount().await;
            (serde_json::to_value(page.view())?, redirect)
        }
        Page::Logout(kind) => {
            let mut page = state.logout_page(kind);
            let redirect = page.mount();
            (json!({ "kind": page.kind(), "message": page.message() }), Some(redirect))
        }
        Page::BrowsePracticas => {
            let mut page = state.browse_page();
            page.mount().await;
            (serde_json::to_value(page.view())?, None)
        }
        Page::CreatePractica => (serde_json::to_value(state.create_practica_page().view())?, None),
        Page::ListPracticas => {
            let mut page = state.practica_list_page();
            page.mount().await;
            (serde_json::to_value(page.view())?, None)
        }
        Page::ManagePracticas => {
            let mut shell = state.practica_shell();
            shell.mount().await;
            (shell.view(), None)
        }
    };
    Ok(rendered)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new().context("Configuration error")?;
    init_tracing(config.log_json);
    tracing::debug!("Loaded configuration: {:?}", config);

    let path = env::args().nth(1).unwrap_or_else(|| ROUTE_LOGIN.to_string());
    let Some(route) = routes::resolve(&path) else {
        tracing::warn!(%path, "No route matches");
        anyhow::bail!("No page at {}", path);
    };

    let state = AppState::new(&config).context("Failed to initialise client state")?;
    let layout = state.layout(route);

    tracing::info!(path = route.path, page = ?route.page, "Rendering page");
    let (view, redirect) = render(&state, route.page).await?;

    let output = json!({
        "route": route,
        "layout": layout.view(),
        "view": view,
        "redirect": redirect,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
