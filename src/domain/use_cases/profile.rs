use std::sync::Arc;

use serde::Serialize;
use validator::Validate;

use crate::constants::{
    MSG_PROFILE_LOAD_FAILED, MSG_PROFILE_UPDATED, MSG_PROFILE_UPDATE_FAILED, NOT_SPECIFIED,
    ROUTE_EDIT_PROFILE, ROUTE_LOGIN, ROUTE_USER_PROFILE,
};
use crate::entities::carrera::Carrera;
use crate::entities::user::{ProfileForm, UserProfile};
use crate::errors::{AppError, FieldError};
use crate::infrastructure::storage::SessionStore;
use crate::infrastructure::utils::timestamp::display_date;
use crate::repositories::user::UserRepository;
use crate::use_cases::{Banner, Redirect};

/// Result of loading the logged-in student's record.
enum Loaded {
    Profile(UserProfile),
    Redirect(Redirect),
    Failed,
}

async fn load_profile<R: UserRepository>(repo: &R, session: &SessionStore) -> Loaded {
    let Some(uid) = session.uid() else {
        tracing::warn!("No UID stored, sending to login");
        return Loaded::Redirect(Redirect::to(ROUTE_LOGIN));
    };

    match repo.get_user(&uid).await {
        Ok(profile) => Loaded::Profile(profile),
        Err(AppError::SessionExpired) => Loaded::Redirect(Redirect::to(ROUTE_LOGIN)),
        Err(e) => {
            tracing::warn!(uid = %uid, error = %e, "Failed to load profile");
            Loaded::Failed
        }
    }
}

// ───── View ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub foto_perfil: Option<String>,
    pub nombre_completo: String,
    pub email: String,
    pub fecha_nacimiento: String,
    pub ano_ingreso: String,
    pub carrera: &'static str,
}

impl From<&UserProfile> for ProfileSummary {
    fn from(profile: &UserProfile) -> Self {
        let nombre_completo = [profile.nombres.as_deref(), profile.apellidos.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        ProfileSummary {
            foto_perfil: profile.foto_perfil.clone().filter(|url| !url.is_empty()),
            nombre_completo,
            email: profile.correo.clone().unwrap_or_default(),
            fecha_nacimiento: profile
                .fecha_nacimiento
                .as_deref()
                .and_then(display_date)
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            ano_ingreso: profile.ano_ingreso.clone().unwrap_or_default(),
            carrera: Carrera::display_name(profile.carrera_id()),
        }
    }
}

pub struct UserProfilePage<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    session: SessionStore,
    profile: Option<UserProfile>,
    error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct UserProfileView {
    pub profile: Option<ProfileSummary>,
    pub error: Option<&'static str>,
}

impl<R> UserProfilePage<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, session: SessionStore) -> Self {
        UserProfilePage {
            repo,
            session,
            profile: None,
            error: None,
        }
    }

    /// Loads the record; a missing UID or an expired session sends to login.
    pub async fn mount(&mut self) -> Option<Redirect> {
        match load_profile(self.repo.as_ref(), &self.session).await {
            Loaded::Profile(profile) => {
                self.profile = Some(profile);
                self.error = None;
                None
            }
            Loaded::Redirect(redirect) => Some(redirect),
            Loaded::Failed => {
                self.error = Some(MSG_PROFILE_LOAD_FAILED);
                None
            }
        }
    }

    pub fn summary(&self) -> Option<ProfileSummary> {
        self.profile.as_ref().map(ProfileSummary::from)
    }

    pub fn view(&self) -> UserProfileView {
        UserProfileView {
            profile: self.summary(),
            error: self.error,
        }
    }

    pub fn edit(&self) -> Redirect {
        Redirect::to(ROUTE_EDIT_PROFILE)
    }
}

// ───── Edit ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditProfileField {
    FotoPerfil,
    Nombres,
    Apellidos,
    Email,
    FechaNacimiento,
    AnoIngreso,
    IdCarrera,
}

pub struct EditProfilePage<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    session: SessionStore,
    form: ProfileForm,
    field_errors: Vec<FieldError>,
    notice: Option<Banner>,
}

#[derive(Debug, Serialize)]
pub struct EditProfileView<'a> {
    pub form: &'a ProfileForm,
    pub field_errors: &'a [FieldError],
    pub notice: Option<&'a Banner>,
}

impl<R> EditProfilePage<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, session: SessionStore) -> Self {
        EditProfilePage {
            repo,
            session,
            form: ProfileForm::default(),
            field_errors: Vec::new(),
            notice: None,
        }
    }

    pub async fn mount(&mut self) -> Option<Redirect> {
        match load_profile(self.repo.as_ref(), &self.session).await {
            Loaded::Profile(profile) => {
                self.form = ProfileForm::from(&profile);
                None
            }
            Loaded::Redirect(redirect) => Some(redirect),
            Loaded::Failed => {
                self.notice = Some(Banner::Error(MSG_PROFILE_LOAD_FAILED.to_string()));
                None
            }
        }
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Acknowledgment of the last submit.
    pub fn notice(&self) -> Option<&Banner> {
        self.notice.as_ref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn view(&self) -> EditProfileView<'_> {
        EditProfileView {
            form: &self.form,
            field_errors: &self.field_errors,
            notice: self.notice.as_ref(),
        }
    }

    pub fn set(&mut self, field: EditProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EditProfileField::FotoPerfil => self.form.foto_perfil = value,
            EditProfileField::Nombres => self.form.nombres = value,
            EditProfileField::Apellidos => self.form.apellidos = value,
            EditProfileField::Email => self.form.email = value,
            EditProfileField::FechaNacimiento => self.form.fecha_nacimiento = value,
            EditProfileField::AnoIngreso => self.form.ano_ingreso = value,
            EditProfileField::IdCarrera => self.form.id_carrera = value,
        }
    }

    pub async fn submit(&mut self) -> Option<Redirect> {
        self.notice = None;

        let Some(uid) = self.session.uid() else {
            return Some(Redirect::to(ROUTE_LOGIN));
        };

        if let Err(errors) = self.form.validate() {
            self.field_errors = AppError::from(errors).field_errors().to_vec();
            return None;
        }
        self.field_errors.clear();

        match self.repo.update_user(&uid, &self.form).await {
            Ok(()) => {
                tracing::info!(uid = %uid, "Profile updated");
                self.notice = Some(Banner::Success(MSG_PROFILE_UPDATED.to_string()));
                Some(Redirect::to(ROUTE_USER_PROFILE))
            }
            Err(AppError::SessionExpired) => Some(Redirect::to(ROUTE_LOGIN)),
            Err(e) => {
                tracing::warn!(uid = %uid, error = %e, "Profile update failed");
                self.notice = Some(Banner::Error(MSG_PROFILE_UPDATE_FAILED.to_string()));
                None
            }
        }
    }
}
