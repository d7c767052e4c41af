use std::sync::Arc;

use serde::Serialize;

use crate::infrastructure::storage::SessionStore;
use crate::infrastructure::utils::clock::Clock;
use crate::repositories::practica::PracticaRepository;
use crate::use_cases::create_practica::CreatePracticaPage;
use crate::use_cases::manage_practicas::PracticaListPage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellMode {
    #[default]
    List,
    Create,
}

/// Active child of the management shell. Each switch builds a fresh page.
pub enum ShellContent<R>
where
    R: PracticaRepository,
{
    List(PracticaListPage<R>),
    Create(CreatePracticaPage<R>),
}

/// "Gestión de Prácticas": switches between the company list and the create form.
pub struct PracticaShell<R>
where
    R: PracticaRepository,
{
    repo: Arc<R>,
    session: SessionStore,
    clock: Arc<dyn Clock>,
    content: ShellContent<R>,
}

impl<R> PracticaShell<R>
where
    R: PracticaRepository,
{
    /// Starts in list mode; call [`PracticaShell::mount`] to load it.
    pub fn new(repo: Arc<R>, session: SessionStore, clock: Arc<dyn Clock>) -> Self {
        let content = ShellContent::List(PracticaListPage::new(repo.clone()));
        PracticaShell {
            repo,
            session,
            clock,
            content,
        }
    }

    pub fn mode(&self) -> ShellMode {
        match self.content {
            ShellContent::List(_) => ShellMode::List,
            ShellContent::Create(_) => ShellMode::Create,
        }
    }

    pub fn content(&self) -> &ShellContent<R> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ShellContent<R> {
        &mut self.content
    }

    pub async fn mount(&mut self) {
        if let ShellContent::List(page) = &mut self.content {
            page.mount().await;
        }
    }

    /// Replaces the child with a fresh page for `mode`. A fresh list is mounted.
    pub async fn switch_to(&mut self, mode: ShellMode) {
        self.content = match mode {
            ShellMode::List => ShellContent::List(PracticaListPage::new(self.repo.clone())),
            ShellMode::Create => ShellContent::Create(CreatePracticaPage::new(
                self.repo.clone(),
                self.session.clone(),
                self.clock.clone(),
            )),
        };
        tracing::debug!(mode = ?mode, "Shell mode changed");
        self.mount().await;
    }

    pub fn view(&self) -> serde_json::Value {
        let content = match &self.content {
            ShellContent::List(page) => serde_json::to_value(page.view()),
            ShellContent::Create(page) => serde_json::to_value(page.view()),
        };
        serde_json::json!({
            "mode": self.mode(),
            "content": content.unwrap_or(serde_json::Value::Null),
        })
    }
}
