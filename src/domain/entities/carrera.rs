use serde::Serialize;

use crate::constants::UNKNOWN_CARRERA;

/// Degree program a student is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carrera {
    pub id: u8,
    pub nombre: &'static str,
}

pub const CARRERAS: [Carrera; 32] = [
    Carrera { id: 1, nombre: "Ingeniería en Informatica" },
    Carrera { id: 2, nombre: "Ingeniería Civil Biomedica" },
    Carrera { id: 3, nombre: "Bachillerato en Ciencias de la Ingenieria" },
    Carrera { id: 4, nombre: "Ingenieria Civil en Computacion, mencion Informatica" },
    Carrera { id: 5, nombre: "Ingenieria Civil Industrial" },
    Carrera { id: 6, nombre: "Ingenieria Civil en Ciencias de Datos" },
    Carrera { id: 7, nombre: "Ingenieria Civil en Electronica" },
    Carrera { id: 8, nombre: "Ingenieria Civil en Mecanica" },
    Carrera { id: 9, nombre: "Ingenieria en Geomensura" },
    Carrera { id: 10, nombre: "Ingenieria Industrial" },
    Carrera { id: 11, nombre: "Dibujante Proyectista" },
    Carrera { id: 12, nombre: "Diseño en Comunicacion Visual" },
    Carrera { id: 13, nombre: "Diseño Industrial" },
    Carrera { id: 14, nombre: "Trabajo Social" },
    Carrera { id: 15, nombre: "Ingenieria Civil Quimica" },
    Carrera { id: 16, nombre: "Ingeniería Civil Matematica" },
    Carrera { id: 17, nombre: "Quimica y Farmacia" },
    Carrera { id: 18, nombre: "Ingenieria en Biotecnologia" },
    Carrera { id: 19, nombre: "Ingenieria en Alimentos" },
    Carrera { id: 20, nombre: "Quimica Industrial" },
    Carrera { id: 21, nombre: "Arquitectura" },
    Carrera { id: 22, nombre: "Ingenieria Civil en Obras Civiles" },
    Carrera { id: 23, nombre: "Ingenieria en Construccion" },
    Carrera { id: 24, nombre: "Ingenieria Civil en Prevencion de Riesgos y Medioambiente" },
    Carrera { id: 25, nombre: "Administracion Publica" },
    Carrera { id: 26, nombre: "Bibliotecologia y Documentacion" },
    Carrera { id: 27, nombre: "Contador Publico y Auditor" },
    Carrera { id: 28, nombre: "Ingenieria Comercial" },
    Carrera { id: 29, nombre: "Ingenieria en Comercio Internacional" },
    Carrera { id: 30, nombre: "Ingenieria en Gestion Turistica" },
    Carrera { id: 31, nombre: "Derecho" },
    Carrera { id: 32, nombre: "Psicologia" },
];

impl Carrera {
    pub fn from_id(id: u8) -> Option<Carrera> {
        CARRERAS.iter().copied().find(|c| c.id == id)
    }

    /// Name for display; unknown or missing ids fall back to a placeholder.
    pub fn display_name(id: Option<u8>) -> &'static str {
        id.and_then(Carrera::from_id)
            .map(|c| c.nombre)
            .unwrap_or(UNKNOWN_CARRERA)
    }
}
