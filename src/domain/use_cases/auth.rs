use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use validator::Validate;
use zeroize::{Zeroize, Zeroizing};

use crate::constants::{
    LOGOUT_REDIRECT_SECS, MSG_COMPLETE_PROFILE_FAILED, MSG_CONNECTION_ERROR, MSG_LOGGED_OUT,
    MSG_LOGIN_FAILED, MSG_MISSING_CREDENTIALS, MSG_PASSWORD_MISMATCH, MSG_PROFILE_COMPLETED,
    MSG_REGISTER_FAILED, MSG_REGISTER_SUCCESS, MSG_RESET_FAILED, MSG_SESSION_EXPIRED_STUDENT,
    ROUTE_COMPANY_HOME, ROUTE_COMPLETE_PROFILE, ROUTE_LOGIN, ROUTE_STUDENT_HOME,
};
use crate::entities::user::{
    AccountKind, CompleteProfileForm, LoginUser, NewCompany, NewStudent, PasswordResetRequest,
    RegisterRequest,
};
use crate::errors::{AppError, FieldError};
use crate::infrastructure::storage::SessionStore;
use crate::infrastructure::utils::clock::Clock;
use crate::infrastructure::utils::image::ProfilePhoto;
use crate::repositories::user::UserRepository;
use crate::use_cases::{Banner, Redirect};

/// Wipes the previous secret before storing the new one.
fn replace_secret(slot: &mut String, value: String) {
    slot.zeroize();
    *slot = value;
}

/// Message for a failed public request: the server's text, a fallback for
/// other HTTP failures, or the connection message when nothing came back.
fn public_failure(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::Request { message: Some(message), .. } => message.clone(),
        AppError::Request { .. } | AppError::InvalidResponse(_) => fallback.to_string(),
        _ => MSG_CONNECTION_ERROR.to_string(),
    }
}

// ───── Login ─────────────────────────────────────────────────────────

/// Student (`/`) or company (`/login_em`) login form.
pub struct LoginPage<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    session: SessionStore,
    kind: AccountKind,
    credentials: LoginUser,
    field_errors: Vec<FieldError>,
    error: Option<String>,
    loading: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginView<'a> {
    pub kind: AccountKind,
    pub email: &'a str,
    pub field_errors: &'a [FieldError],
    pub error: Option<&'a str>,
    pub loading: bool,
}

impl<R> LoginPage<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, session: SessionStore, kind: AccountKind) -> Self {
        LoginPage {
            repo,
            session,
            kind,
            credentials: LoginUser::default(),
            field_errors: Vec::new(),
            error: None,
            loading: false,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.credentials.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        replace_secret(&mut self.credentials.password, password.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn view(&self) -> LoginView<'_> {
        LoginView {
            kind: self.kind,
            email: &self.credentials.email,
            field_errors: &self.field_errors,
            error: self.error.as_deref(),
            loading: self.loading,
        }
    }

    /// Logs in and decides where to go next. Any failure leaves no session behind.
    pub async fn submit(&mut self) -> Option<Redirect> {
        self.error = None;
        if let Err(errors) = self.credentials.validate() {
            self.field_errors = AppError::from(errors).field_errors().to_vec();
            return None;
        }
        self.field_errors.clear();

        self.loading = true;
        let result = self.login().await;
        self.loading = false;

        match result {
            Ok(redirect) => Some(redirect),
            Err(message) => {
                self.session.clear();
                self.error = Some(message);
                None
            }
        }
    }

    async fn login(&self) -> Result<Redirect, String> {
        let response = self
            .repo
            .login(self.kind, &self.credentials)
            .await
            .map_err(|e| {
                tracing::warn!(kind = ?self.kind, error = %e, "Login failed");
                public_failure(&e, MSG_LOGIN_FAILED)
            })?;

        let (token, uid) = response
            .credentials()
            .ok_or_else(|| MSG_MISSING_CREDENTIALS.to_string())?;

        self.session.start(token, uid).map_err(|e| {
            tracing::error!(error = %e, "Failed to persist session");
            e.to_string()
        })?;

        if self.kind == AccountKind::Company {
            return Ok(Redirect::to(ROUTE_COMPANY_HOME));
        }

        match self.repo.profile_status().await {
            Ok(status) if status.needs_completion() => Ok(Redirect::to(ROUTE_COMPLETE_PROFILE)),
            Ok(_) => Ok(Redirect::to(ROUTE_STUDENT_HOME)),
            Err(e) => {
                tracing::warn!(error = %e, "Profile status check failed");
                Ok(Redirect::to(ROUTE_STUDENT_HOME))
            }
        }
    }
}

// ───── Register ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    /// Student first names.
    Nombres,
    Apellidos,
    /// Company name.
    Nombre,
    Email,
    Password,
    ConfirmPassword,
}

pub struct RegisterPage<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    kind: AccountKind,
    student: NewStudent,
    company: NewCompany,
    confirm_password: Zeroizing<String>,
    field_errors: Vec<FieldError>,
    banner: Option<Banner>,
}

impl<R> RegisterPage<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, kind: AccountKind) -> Self {
        RegisterPage {
            repo,
            kind,
            student: NewStudent::default(),
            company: NewCompany::default(),
            confirm_password: Zeroizing::new(String::new()),
            field_errors: Vec::new(),
            banner: None,
        }
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Fields that do not belong to this page's account kind are ignored.
    pub fn set(&mut self, field: RegisterField, value: impl Into<String>) {
        let value = value.into();
        match (self.kind, field) {
            (AccountKind::Student, RegisterField::Nombres) => self.student.nombres = value,
            (AccountKind::Student, RegisterField::Apellidos) => self.student.apellidos = value,
            (AccountKind::Student, RegisterField::Email) => self.student.email = value,
            (AccountKind::Student, RegisterField::Password) => replace_secret(&mut self.student.password, value),
            (AccountKind::Company, RegisterField::Nombre) => self.company.nombre = value,
            (AccountKind::Company, RegisterField::Email) => self.company.email = value,
            (AccountKind::Company, RegisterField::Password) => replace_secret(&mut self.company.password, value),
            (_, RegisterField::ConfirmPassword) => self.confirm_password = Zeroizing::new(value),
            _ => {}
        }
    }

    pub fn view(&self) -> serde_json::Value {
        let account = match self.kind {
            AccountKind::Student => serde_json::json!({
                "nombres": self.student.nombres,
                "apellidos": self.student.apellidos,
                "email": self.student.email,
            }),
            AccountKind::Company => serde_json::json!({
                "nombre": self.company.nombre,
                "email": self.company.email,
            }),
        };
        serde_json::json!({
            "kind": self.kind,
            "form": account,
            "field_errors": self.field_errors,
            "banner": self.banner,
        })
    }

    pub async fn submit(&mut self) {
        self.banner = None;

        let password = match self.kind {
            AccountKind::Student => &self.student.password,
            AccountKind::Company => &self.company.password,
        };
        if password.as_str() != self.confirm_password.as_str() {
            self.banner = Some(Banner::Error(MSG_PASSWORD_MISMATCH.to_string()));
            return;
        }

        let (request, validation) = match self.kind {
            AccountKind::Student => (RegisterRequest::Student(self.student.clone()), self.student.validate()),
            AccountKind::Company => (RegisterRequest::Company(self.company.clone()), self.company.validate()),
        };
        if let Err(errors) = validation {
            self.field_errors = AppError::from(errors).field_errors().to_vec();
            return;
        }
        self.field_errors.clear();

        self.banner = Some(match self.repo.register(&request).await {
            Ok(()) => {
                tracing::info!(kind = ?self.kind, "Account registered");
                Banner::Success(MSG_REGISTER_SUCCESS.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                Banner::Error(public_failure(&e, MSG_REGISTER_FAILED))
            }
        });
    }
}

// ───── Password recovery ─────────────────────────────────────────────

#[derive(Debug, Default, Serialize)]
pub struct PasswordRecoveryView {
    pub email: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

pub struct PasswordRecoveryPage<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    state: PasswordRecoveryView,
}

impl<R> PasswordRecoveryPage<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        PasswordRecoveryPage {
            repo,
            state: PasswordRecoveryView::default(),
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.state.email = email.into();
    }

    pub fn view(&self) -> &PasswordRecoveryView {
        &self.state
    }

    pub async fn submit(&mut self) {
        self.state.message = None;
        self.state.error = None;
        self.state.loading = true;

        let request = PasswordResetRequest { email: self.state.email.trim().to_string() };
        match self.repo.password_reset(&request).await {
            Ok(response) => self.state.message = response.message,
            Err(e) => {
                tracing::warn!(error = %e, "Password reset failed");
                self.state.error = Some(e.server_message().unwrap_or(MSG_RESET_FAILED).to_string());
            }
        }
        self.state.loading = false;
    }
}

// ───── Complete profile ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteProfileField {
    FechaNacimiento,
    AnoIngreso,
    IdCarrera,
}

pub struct CompleteProfilePage<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    session: SessionStore,
    clock: Arc<dyn Clock>,
    form: CompleteProfileForm,
    photo: Option<ProfilePhoto>,
    field_errors: Vec<FieldError>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompleteProfileView<'a> {
    pub form: &'a CompleteProfileForm,
    pub photo: Option<&'a str>,
    pub field_errors: &'a [FieldError],
    pub error: Option<&'a str>,
}

impl<R> CompleteProfilePage<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, session: SessionStore, clock: Arc<dyn Clock>) -> Self {
        CompleteProfilePage {
            repo,
            session,
            clock,
            form: CompleteProfileForm::default(),
            photo: None,
            field_errors: Vec::new(),
            error: None,
        }
    }

    pub fn set(&mut self, field: CompleteProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CompleteProfileField::FechaNacimiento => self.form.fecha_nacimiento = value,
            CompleteProfileField::AnoIngreso => self.form.ano_ingreso = value,
            CompleteProfileField::IdCarrera => self.form.id_carrera = value,
        }
    }

    pub fn attach_photo(&mut self, photo: ProfilePhoto) {
        self.photo = Some(photo);
    }

    pub async fn attach_photo_file(&mut self, path: &Path) -> Result<(), AppError> {
        match ProfilePhoto::load(path).await {
            Ok(photo) => {
                self.attach_photo(photo);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn view(&self) -> CompleteProfileView<'_> {
        CompleteProfileView {
            form: &self.form,
            photo: self.photo.as_ref().map(|p| p.file_name.as_str()),
            field_errors: &self.field_errors,
            error: self.error.as_deref(),
        }
    }

    /// Uploads the photo when one is attached, then completes the profile.
    pub async fn submit(&mut self) -> Option<Redirect> {
        self.error = None;

        let current_year = self.clock.current_year();
        if let Err(e) = self.form.to_request(current_year, String::new()) {
            self.field_errors = e.field_errors().to_vec();
            return None;
        }
        self.field_errors.clear();

        match self.complete(current_year).await {
            Ok(redirect) => Some(redirect),
            Err(AppError::SessionExpired) => {
                self.error = Some(MSG_SESSION_EXPIRED_STUDENT.to_string());
                Some(Redirect::to(ROUTE_LOGIN))
            }
            Err(AppError::InvalidInput(message)) => {
                self.error = Some(format!("{}: {}", MSG_COMPLETE_PROFILE_FAILED, message));
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Complete profile failed");
                self.error = Some(e.server_message().unwrap_or(MSG_COMPLETE_PROFILE_FAILED).to_string());
                None
            }
        }
    }

    async fn complete(&self, current_year: i32) -> Result<Redirect, AppError> {
        let foto_perfil = match &self.photo {
            Some(photo) => self.repo.upload_image(photo).await?.url,
            None => String::new(),
        };

        let request = self.form.to_request(current_year, foto_perfil)?;
        let response = self.repo.complete_profile(&request).await?;

        let message = response.message.unwrap_or_default();
        if message != MSG_PROFILE_COMPLETED {
            return Err(AppError::InvalidInput(message));
        }

        if let Some(token) = response.token.filter(|t| !t.is_empty()) {
            self.session.replace_token(&token)?;
        }
        tracing::info!("Profile completed");
        Ok(Redirect::to(ROUTE_STUDENT_HOME))
    }
}

// ───── Logout ────────────────────────────────────────────────────────

pub struct LogoutPage {
    session: SessionStore,
    kind: AccountKind,
    message: Option<&'static str>,
}

impl LogoutPage {
    pub fn new(session: SessionStore, kind: AccountKind) -> Self {
        LogoutPage { session, kind, message: None }
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    /// Ends the session and schedules the return to the start page.
    pub fn mount(&mut self) -> Redirect {
        self.session.clear();
        self.message = Some(MSG_LOGGED_OUT);
        tracing::info!(kind = ?self.kind, "Logged out");
        Redirect::after(ROUTE_LOGIN, LOGOUT_REDIRECT_SECS)
    }

    /// "Volver al inicio" without waiting for the timer.
    pub fn go_home(&self) -> Redirect {
        Redirect::to(ROUTE_LOGIN)
    }
}
