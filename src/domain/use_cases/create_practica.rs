use std::sync::Arc;

use serde::Serialize;

use crate::constants::{MSG_CREATE_FAILED, MSG_CREATE_SUCCESS, MSG_MISSING_TOKEN, MSG_SESSION_EXPIRED};
use crate::entities::practica::{PracticaField, PracticaForm};
use crate::errors::{AppError, FieldError};
use crate::infrastructure::storage::SessionStore;
use crate::infrastructure::utils::clock::Clock;
use crate::repositories::practica::PracticaRepository;
use crate::use_cases::{server_failure, Banner};

/// Company form for publishing a new práctica.
pub struct CreatePracticaPage<R>
where
    R: PracticaRepository,
{
    repo: Arc<R>,
    session: SessionStore,
    clock: Arc<dyn Clock>,
    form: PracticaForm,
    field_errors: Vec<FieldError>,
    banner: Option<Banner>,
}

#[derive(Debug, Serialize)]
pub struct CreatePracticaView<'a> {
    pub form: &'a PracticaForm,
    pub field_errors: &'a [FieldError],
    pub banner: Option<&'a Banner>,
}

impl<R> CreatePracticaPage<R>
where
    R: PracticaRepository,
{
    pub fn new(repo: Arc<R>, session: SessionStore, clock: Arc<dyn Clock>) -> Self {
        CreatePracticaPage {
            repo,
            session,
            clock,
            form: PracticaForm::default(),
            field_errors: Vec::new(),
            banner: None,
        }
    }

    pub fn form(&self) -> &PracticaForm {
        &self.form
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Message for `field`, using the form's snake_case keys.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn view(&self) -> CreatePracticaView<'_> {
        CreatePracticaView {
            form: &self.form,
            field_errors: &self.field_errors,
            banner: self.banner.as_ref(),
        }
    }

    pub fn change(&mut self, field: PracticaField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validates and, when the form is clean and a session exists, sends exactly
    /// one create request.
    pub async fn submit(&mut self) {
        let payload = match self.form.to_new_payload(self.clock.today()) {
            Ok(payload) => payload,
            Err(AppError::ValidationError(errors)) => {
                self.field_errors = errors;
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Create form could not be converted");
                self.banner = Some(Banner::Error(e.to_string()));
                return;
            }
        };
        self.field_errors.clear();

        if self.session.token().is_none() {
            self.banner = Some(Banner::Error(MSG_MISSING_TOKEN.to_string()));
            return;
        }

        match self.repo.create(&payload).await {
            Ok(created) => {
                tracing::info!(id = created.id_practica, "Práctica created");
                self.banner = Some(Banner::Success(format!("{} {}", MSG_CREATE_SUCCESS, created.id_practica)));
                self.form = PracticaForm::default();
            }
            Err(AppError::SessionExpired) => {
                self.banner = Some(Banner::Error(MSG_SESSION_EXPIRED.to_string()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create práctica");
                self.banner = Some(Banner::Error(server_failure(MSG_CREATE_FAILED, &e)));
            }
        }
    }
}
