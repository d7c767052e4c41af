use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::MIN_ENROLLMENT_YEAR;
use crate::domain::entities::carrera::Carrera;
use crate::domain::validation::{new_validation_error, validate_form_date, validate_not_blank};
use crate::errors::AppError;
use crate::infrastructure::utils::timestamp::date_part;
use crate::infrastructure::utils::wire::opt_string_or_number;

/// Which side of the platform an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Student,
    Company,
}

// ───── Authentication ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Validate, Zeroize, ZeroizeOnDrop)]
pub struct LoginUser {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Validate, Zeroize, ZeroizeOnDrop)]
pub struct NewStudent {
    #[validate(custom(function = "validate_not_blank", message = "Los nombres son requeridos"))]
    pub nombres: String,

    #[validate(custom(function = "validate_not_blank", message = "Los apellidos son requeridos"))]
    pub apellidos: String,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Validate, Zeroize, ZeroizeOnDrop)]
pub struct NewCompany {
    #[validate(custom(function = "validate_not_blank", message = "El nombre de la empresa es requerido"))]
    pub nombre: String,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RegisterRequest {
    Student(NewStudent),
    Company(NewCompany),
}

impl RegisterRequest {
    pub fn kind(&self) -> AccountKind {
        match self {
            RegisterRequest::Student(_) => AccountKind::Student,
            RegisterRequest::Company(_) => AccountKind::Company,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

// ───── Profile ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteProfileRequest {
    pub fecha_nacimiento: String,
    pub ano_ingreso: String,
    pub id_carrera: u8,
    pub foto_perfil: String,
}

/// Raw input of the complete-profile form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct CompleteProfileForm {
    #[validate(
        length(min = 1, message = "La fecha de nacimiento es requerida"),
        custom(function = "validate_form_date")
    )]
    pub fecha_nacimiento: String,

    #[validate(length(min = 1, message = "El año de ingreso es requerido"))]
    pub ano_ingreso: String,

    #[validate(length(min = 1, message = "La carrera es requerida"))]
    pub id_carrera: String,
}

impl CompleteProfileForm {
    /// Checks the enrollment year against `current_year` and the carrera
    /// against the known list, then builds the request body.
    pub fn to_request(&self, current_year: i32, foto_perfil: String) -> Result<CompleteProfileRequest, AppError> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let year = self.ano_ingreso.trim();
        if !year.is_empty() {
            match year.parse::<i32>() {
                Ok(y) if (MIN_ENROLLMENT_YEAR..=current_year).contains(&y) => {}
                _ => errors.add(
                    "ano_ingreso",
                    new_validation_error(
                        "ano_ingreso_rango",
                        format!("El año de ingreso debe estar entre {} y {}", MIN_ENROLLMENT_YEAR, current_year),
                    ),
                ),
            }
        }

        let carrera = self.id_carrera.trim().parse::<u8>().ok().and_then(Carrera::from_id);
        if !self.id_carrera.trim().is_empty() && carrera.is_none() {
            errors.add("id_carrera", new_validation_error("id_carrera", "Selecciona una carrera válida"));
        }

        if !errors.errors().is_empty() {
            return Err(AppError::from(errors));
        }

        let id_carrera = carrera
            .map(|c| c.id)
            .ok_or_else(|| AppError::InvalidInput("id_carrera is missing".to_string()))?;

        Ok(CompleteProfileRequest {
            fecha_nacimiento: self.fecha_nacimiento.trim().to_string(),
            ano_ingreso: year.to_string(),
            id_carrera,
            foto_perfil,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Student record as returned by `GET /usuarios/{uid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "Foto_Perfil", default)]
    pub foto_perfil: Option<String>,

    #[serde(rename = "Nombres", default)]
    pub nombres: Option<String>,

    #[serde(rename = "Apellidos", default)]
    pub apellidos: Option<String>,

    #[serde(rename = "Correo", default)]
    pub correo: Option<String>,

    #[serde(rename = "Fecha_Nacimiento", default)]
    pub fecha_nacimiento: Option<String>,

    #[serde(rename = "Ano_Ingreso", default, deserialize_with = "opt_string_or_number")]
    pub ano_ingreso: Option<String>,

    #[serde(rename = "Id_carrera", default, deserialize_with = "opt_string_or_number")]
    pub id_carrera: Option<String>,
}

impl UserProfile {
    pub fn carrera_id(&self) -> Option<u8> {
        self.id_carrera.as_deref().and_then(|id| id.trim().parse().ok())
    }
}

/// Editable copy of a profile; also the body of `PUT /usuarios/{uid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(rename = "fotoPerfil", default)]
    pub foto_perfil: String,

    #[validate(custom(function = "validate_not_blank", message = "Los nombres son requeridos"))]
    pub nombres: String,

    #[validate(custom(function = "validate_not_blank", message = "Los apellidos son requeridos"))]
    pub apellidos: String,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(custom(function = "validate_not_blank", message = "La fecha de nacimiento es requerida"))]
    pub fecha_nacimiento: String,

    #[validate(custom(function = "validate_not_blank", message = "El año de ingreso es requerido"))]
    pub ano_ingreso: String,

    #[validate(custom(function = "validate_not_blank", message = "La carrera es requerida"))]
    pub id_carrera: String,
}

impl From<&UserProfile> for ProfileForm {
    fn from(profile: &UserProfile) -> Self {
        ProfileForm {
            foto_perfil: profile.foto_perfil.clone().unwrap_or_default(),
            nombres: profile.nombres.clone().unwrap_or_default(),
            apellidos: profile.apellidos.clone().unwrap_or_default(),
            email: profile.correo.clone().unwrap_or_default(),
            fecha_nacimiento: profile.fecha_nacimiento.as_deref().map(date_part).unwrap_or_default().to_string(),
            ano_ingreso: profile.ano_ingreso.clone().unwrap_or_default(),
            id_carrera: profile.id_carrera.clone().unwrap_or_default(),
        }
    }
}
