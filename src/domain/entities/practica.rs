use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::{
    domain::validation::{new_validation_error, validate_company_id, validate_form_date, validate_ubicacion},
    errors::AppError,
    infrastructure::utils::timestamp::{date_part, millis, parse_form_date, start_of_day},
};

// ───── Wire Models ───────────────────────────────────────────────────

/// Internship posting as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practica {
    #[serde(rename = "Id", alias = "ID")]
    pub id: i64,

    #[serde(rename = "Titulo", default)]
    pub titulo: String,

    #[serde(rename = "Descripcion", default)]
    pub descripcion: String,

    #[serde(rename = "Id_Empresa", default)]
    pub id_empresa: i64,

    #[serde(rename = "Ubicacion", default)]
    pub ubicacion: String,

    #[serde(rename = "Fecha_inicio", default)]
    pub fecha_inicio: String,

    #[serde(rename = "Fecha_fin", default)]
    pub fecha_fin: String,

    #[serde(rename = "Requisitos", default)]
    pub requisitos: String,

    #[serde(rename = "Fecha_expiracion", default)]
    pub fecha_expiracion: String,

    #[serde(rename = "Modalidad", default)]
    pub modalidad: Option<String>,

    #[serde(rename = "Area_practica", default)]
    pub area_practica: String,

    #[serde(rename = "Jornada", default)]
    pub jornada: Option<String>,
}

/// Body of create and update requests.
///
/// `Id_Empresa` is only sent on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticaPayload {
    #[serde(rename = "Titulo")]
    pub titulo: String,

    #[serde(rename = "Descripcion")]
    pub descripcion: String,

    #[serde(rename = "Id_Empresa", default, skip_serializing_if = "Option::is_none")]
    pub id_empresa: Option<i64>,

    #[serde(rename = "Ubicacion")]
    pub ubicacion: String,

    #[serde(rename = "Fecha_inicio", with = "millis")]
    pub fecha_inicio: DateTime<Utc>,

    #[serde(rename = "Fecha_fin", with = "millis")]
    pub fecha_fin: DateTime<Utc>,

    #[serde(rename = "Requisitos")]
    pub requisitos: String,

    #[serde(rename = "Fecha_expiracion", with = "millis")]
    pub fecha_expiracion: DateTime<Utc>,

    #[serde(rename = "Modalidad", default)]
    pub modalidad: String,

    #[serde(rename = "Area_practica")]
    pub area_practica: String,

    #[serde(rename = "Jornada", default)]
    pub jornada: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticaCreatedResponse {
    pub id_practica: i64,
}

// ───── Form State ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticaField {
    Titulo,
    Descripcion,
    IdEmpresa,
    Ubicacion,
    FechaInicio,
    FechaFin,
    Requisitos,
    FechaExpiracion,
    Modalidad,
    AreaPractica,
    Jornada,
}

impl PracticaField {
    pub const ALL: [PracticaField; 11] = [
        PracticaField::Titulo,
        PracticaField::Descripcion,
        PracticaField::IdEmpresa,
        PracticaField::Ubicacion,
        PracticaField::FechaInicio,
        PracticaField::FechaFin,
        PracticaField::Requisitos,
        PracticaField::FechaExpiracion,
        PracticaField::Modalidad,
        PracticaField::AreaPractica,
        PracticaField::Jornada,
    ];

    /// Name used on the wire and as the input `name` attribute.
    pub fn wire_name(self) -> &'static str {
        match self {
            PracticaField::Titulo => "Titulo",
            PracticaField::Descripcion => "Descripcion",
            PracticaField::IdEmpresa => "Id_Empresa",
            PracticaField::Ubicacion => "Ubicacion",
            PracticaField::FechaInicio => "Fecha_inicio",
            PracticaField::FechaFin => "Fecha_fin",
            PracticaField::Requisitos => "Requisitos",
            PracticaField::FechaExpiracion => "Fecha_expiracion",
            PracticaField::Modalidad => "Modalidad",
            PracticaField::AreaPractica => "Area_practica",
            PracticaField::Jornada => "Jornada",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }

}

/// Raw input of the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct PracticaForm {
    #[validate(length(min = 1, message = "El título es requerido"))]
    pub titulo: String,

    #[validate(length(min = 1, message = "La descripción es requerida"))]
    pub descripcion: String,

    /// Only checked on create; updates never send it.
    pub id_empresa: String,

    #[validate(custom(function = "validate_ubicacion"))]
    pub ubicacion: String,

    #[validate(
        length(min = 1, message = "La fecha de inicio es requerida"),
        custom(function = "validate_form_date")
    )]
    pub fecha_inicio: String,

    #[validate(
        length(min = 1, message = "La fecha de fin es requerida"),
        custom(function = "validate_form_date")
    )]
    pub fecha_fin: String,

    #[validate(length(min = 1, message = "Los requisitos son requeridos"))]
    pub requisitos: String,

    #[validate(
        length(min = 1, message = "La fecha de expiración es requerida"),
        custom(function = "validate_form_date")
    )]
    pub fecha_expiracion: String,

    pub modalidad: String,

    #[validate(length(min = 1, message = "El área de práctica es requerida"))]
    pub area_practica: String,

    pub jornada: String,
}

impl PracticaForm {
    /// Edit-form copy of an existing posting, dates reduced to `YYYY-MM-DD`.
    pub fn from_practica(practica: &Practica) -> Self {
        PracticaForm {
            titulo: practica.titulo.clone(),
            descripcion: practica.descripcion.clone(),
            id_empresa: practica.id_empresa.to_string(),
            ubicacion: practica.ubicacion.clone(),
            fecha_inicio: date_part(&practica.fecha_inicio).to_string(),
            fecha_fin: date_part(&practica.fecha_fin).to_string(),
            requisitos: practica.requisitos.clone(),
            fecha_expiracion: date_part(&practica.fecha_expiracion).to_string(),
            modalidad: practica.modalidad.clone().unwrap_or_default(),
            area_practica: practica.area_practica.clone(),
            jornada: practica.jornada.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: PracticaField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PracticaField::Titulo => self.titulo = value,
            PracticaField::Descripcion => self.descripcion = value,
            PracticaField::IdEmpresa => self.id_empresa = value,
            PracticaField::Ubicacion => self.ubicacion = value,
            PracticaField::FechaInicio => self.fecha_inicio = value,
            PracticaField::FechaFin => self.fecha_fin = value,
            PracticaField::Requisitos => self.requisitos = value,
            PracticaField::FechaExpiracion => self.fecha_expiracion = value,
            PracticaField::Modalidad => self.modalidad = value,
            PracticaField::AreaPractica => self.area_practica = value,
            PracticaField::Jornada => self.jornada = value,
        }
    }

    pub fn get(&self, field: PracticaField) -> &str {
        match field {
            PracticaField::Titulo => &self.titulo,
            PracticaField::Descripcion => &self.descripcion,
            PracticaField::IdEmpresa => &self.id_empresa,
            PracticaField::Ubicacion => &self.ubicacion,
            PracticaField::FechaInicio => &self.fecha_inicio,
            PracticaField::FechaFin => &self.fecha_fin,
            PracticaField::Requisitos => &self.requisitos,
            PracticaField::FechaExpiracion => &self.fecha_expiracion,
            PracticaField::Modalidad => &self.modalidad,
            PracticaField::AreaPractica => &self.area_practica,
            PracticaField::Jornada => &self.jornada,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == PracticaForm::default()
    }

    /// Validates a new posting; the start date may not lie before `today`.
    pub fn to_new_payload(&self, today: NaiveDate) -> Result<PracticaPayload, AppError> {
        self.check(Some(today))?;
        self.build_payload(true)
    }

    /// Validates an edited posting. Ordering is enforced; the start date is not
    /// compared with today and the company id is not checked.
    pub fn to_update_payload(&self) -> Result<PracticaPayload, AppError> {
        self.check(None)?;
        self.build_payload(false)
    }

    fn check(&self, today: Option<NaiveDate>) -> Result<(), AppError> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if today.is_some() {
            if self.id_empresa.trim().is_empty() {
                errors.add("id_empresa", new_validation_error("length", "El ID de la empresa es requerido"));
            } else if let Err(e) = validate_company_id(&self.id_empresa) {
                errors.add("id_empresa", e);
            }
        }

        let inicio = parse_form_date(&self.fecha_inicio);
        let fin = parse_form_date(&self.fecha_fin);
        let expiracion = parse_form_date(&self.fecha_expiracion);

        if let (Some(inicio), Some(today)) = (inicio, today) {
            if inicio < today {
                errors.add(
                    "fecha_inicio",
                    new_validation_error("fecha_inicio_pasada", "La fecha de inicio no puede ser anterior a hoy."),
                );
            }
        }
        if let (Some(inicio), Some(fin)) = (inicio, fin) {
            if fin < inicio {
                errors.add(
                    "fecha_fin",
                    new_validation_error("fecha_fin_orden", "La fecha de fin no puede ser anterior a la fecha de inicio."),
                );
            }
        }
        if let (Some(fin), Some(expiracion)) = (fin, expiracion) {
            if expiracion < fin {
                errors.add(
                    "fecha_expiracion",
                    new_validation_error(
                        "fecha_expiracion_orden",
                        "La fecha de expiración no puede ser anterior a la fecha de fin.",
                    ),
                );
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(AppError::from(errors))
        }
    }

    fn build_payload(&self, include_company: bool) -> Result<PracticaPayload, AppError> {
        let date = |value: &str, field: &str| {
            parse_form_date(value)
                .map(start_of_day)
                .ok_or_else(|| AppError::InvalidInput(format!("{} is not a valid date", field)))
        };

        let id_empresa = if include_company {
            let id = self.id_empresa.trim().parse::<i64>()
                .map_err(|_| AppError::InvalidInput("Id_Empresa is not a number".to_string()))?;
            Some(id)
        } else {
            None
        };

        Ok(PracticaPayload {
            titulo: self.titulo.clone(),
            descripcion: self.descripcion.clone(),
            id_empresa,
            ubicacion: self.ubicacion.clone(),
            fecha_inicio: date(&self.fecha_inicio, "Fecha_inicio")?,
            fecha_fin: date(&self.fecha_fin, "Fecha_fin")?,
            requisitos: self.requisitos.clone(),
            fecha_expiracion: date(&self.fecha_expiracion, "Fecha_expiracion")?,
            modalidad: self.modalidad.clone(),
            area_practica: self.area_practica.clone(),
            jornada: self.jornada.clone(),
        })
    }
}

// ───── Display Models ────────────────────────────────────────────────

/// Row of the company's list table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticaRow {
    pub id: i64,
    pub titulo: String,
    pub descripcion: String,
}

impl From<&Practica> for PracticaRow {
    fn from(practica: &Practica) -> Self {
        PracticaRow {
            id: practica.id,
            titulo: practica.titulo.clone(),
            descripcion: practica.descripcion.clone(),
        }
    }
}
