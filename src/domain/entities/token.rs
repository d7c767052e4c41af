use serde::{Deserialize, Serialize};

use crate::infrastructure::utils::wire::opt_string_or_number;

/// Body returned by the login endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub uid: Option<String>,
}

impl AuthResponse {
    /// Token and UID, only when both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        let uid = self.uid.as_deref().filter(|u| !u.is_empty())?;
        Some((token, uid))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileStatus {
    #[serde(rename = "PerfilCompletado", default)]
    pub perfil_completado: Option<bool>,
}

impl ProfileStatus {
    /// Only an explicit `false` counts as incomplete.
    pub fn needs_completion(&self) -> bool {
        self.perfil_completado == Some(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub token: Option<String>,
}
