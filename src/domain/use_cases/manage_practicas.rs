use std::sync::Arc;

use serde::Serialize;

use crate::constants::{
    MSG_DELETE_FAILED, MSG_DELETE_SUCCESS, MSG_LOAD_FAILED, MSG_SESSION_EXPIRED, MSG_UPDATE_FAILED,
    MSG_UPDATE_SUCCESS,
};
use crate::entities::practica::{Practica, PracticaField, PracticaForm, PracticaRow};
use crate::errors::{AppError, FieldError};
use crate::repositories::practica::PracticaRepository;
use crate::use_cases::{detailed_failure, Banner};

/// The list page shows either the table or one edit form, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewMode {
    List,
    Editing { id: i64, form: PracticaForm },
}

/// Company table of own prácticas with inline edit and delete.
pub struct PracticaListPage<R>
where
    R: PracticaRepository,
{
    repo: Arc<R>,
    practicas: Vec<Practica>,
    mode: ViewMode,
    field_errors: Vec<FieldError>,
    banner: Option<Banner>,
}

#[derive(Debug, Serialize)]
pub struct PracticaListView<'a> {
    pub rows: Vec<PracticaRow>,
    #[serde(flatten)]
    pub mode: &'a ViewMode,
    pub field_errors: &'a [FieldError],
    pub banner: Option<&'a Banner>,
}

impl<R> PracticaListPage<R>
where
    R: PracticaRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        PracticaListPage {
            repo,
            practicas: Vec::new(),
            mode: ViewMode::List,
            field_errors: Vec::new(),
            banner: None,
        }
    }

    pub fn practicas(&self) -> &[Practica] {
        &self.practicas
    }

    pub fn rows(&self) -> Vec<PracticaRow> {
        self.practicas.iter().map(PracticaRow::from).collect()
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn view(&self) -> PracticaListView<'_> {
        PracticaListView {
            rows: self.rows(),
            mode: &self.mode,
            field_errors: &self.field_errors,
            banner: self.banner.as_ref(),
        }
    }

    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Re-fetches the company's postings. On failure the previous rows stay.
    pub async fn refresh(&mut self) {
        match self.repo.list_company().await {
            Ok(practicas) => {
                tracing::debug!(count = practicas.len(), "Loaded company prácticas");
                self.practicas = practicas;
            }
            Err(e) => self.fail(MSG_LOAD_FAILED, e),
        }
    }

    /// Switches to the edit form for row `id`. Unknown ids are ignored.
    pub fn edit(&mut self, id: i64) {
        if let Some(practica) = self.practicas.iter().find(|p| p.id == id) {
            self.field_errors.clear();
            self.mode = ViewMode::Editing {
                id,
                form: PracticaForm::from_practica(practica),
            };
        }
    }

    pub fn change(&mut self, field: PracticaField, value: impl Into<String>) {
        if let ViewMode::Editing { form, .. } = &mut self.mode {
            form.set(field, value);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.field_errors.clear();
        self.mode = ViewMode::List;
    }

    /// Sends one update for the record being edited, then re-fetches.
    pub async fn submit_edit(&mut self) {
        let ViewMode::Editing { id, form } = &self.mode else {
            return;
        };
        let id = *id;

        let payload = match form.to_update_payload() {
            Ok(payload) => payload,
            Err(AppError::ValidationError(errors)) => {
                self.field_errors = errors;
                return;
            }
            Err(e) => {
                self.banner = Some(Banner::Error(e.to_string()));
                return;
            }
        };
        self.field_errors.clear();

        match self.repo.update(id, &payload).await {
            Ok(()) => {
                tracing::info!(id, "Práctica updated");
                self.banner = Some(Banner::Success(MSG_UPDATE_SUCCESS.to_string()));
                self.mode = ViewMode::List;
                self.refresh().await;
            }
            Err(e) => self.fail(MSG_UPDATE_FAILED, e),
        }
    }

    /// Deletes immediately, without confirmation, then re-fetches.
    pub async fn delete(&mut self, id: i64) {
        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "Práctica deleted");
                self.banner = Some(Banner::Success(MSG_DELETE_SUCCESS.to_string()));
                self.refresh().await;
            }
            Err(e) => self.fail(MSG_DELETE_FAILED, e),
        }
    }

    fn fail(&mut self, prefix: &str, err: AppError) {
        let message = match err {
            AppError::SessionExpired => MSG_SESSION_EXPIRED.to_string(),
            ref e => {
                tracing::warn!(error = %e, "{}", prefix);
                detailed_failure(prefix, e)
            }
        };
        self.banner = Some(Banner::Error(message));
    }
}
