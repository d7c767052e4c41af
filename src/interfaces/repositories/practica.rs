use async_trait::async_trait;
use reqwest::Method;

use crate::{
    entities::practica::{Practica, PracticaCreatedResponse, PracticaPayload},
    errors::AppError,
    infrastructure::http::Access,
    repositories::http_repo::HttpRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PracticaRepository: Send + Sync {
    async fn create(&self, practica: &PracticaPayload) -> Result<PracticaCreatedResponse, AppError>;
    /// Postings owned by the logged-in company.
    async fn list_company(&self) -> Result<Vec<Practica>, AppError>;
    async fn update(&self, id: i64, practica: &PracticaPayload) -> Result<(), AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    /// Every open posting, for students.
    async fn list_all(&self) -> Result<Vec<Practica>, AppError>;
    async fn apply(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
impl PracticaRepository for HttpRepo {
    async fn create(&self, practica: &PracticaPayload) -> Result<PracticaCreatedResponse, AppError> {
        self.client
            .send_json(Method::POST, "/Create-practicas", practica, Access::Authenticated)
            .await
    }

    async fn list_company(&self) -> Result<Vec<Practica>, AppError> {
        self.client
            .get_json("/Get-practicas-empresa", Access::Authenticated)
            .await
    }

    async fn update(&self, id: i64, practica: &PracticaPayload) -> Result<(), AppError> {
        self.client
            .send(Method::PUT, &format!("/Update-practicas/{}", id), Some(practica), Access::Authenticated)
            .await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.client
            .send::<()>(Method::DELETE, &format!("/Delete-practica/{}", id), None, Access::Authenticated)
            .await
    }

    async fn list_all(&self) -> Result<Vec<Practica>, AppError> {
        self.client
            .get_json("/Get-practicas", Access::Authenticated)
            .await
    }

    async fn apply(&self, id: i64) -> Result<(), AppError> {
        self.client
            .send(Method::POST, &format!("/Rpracticas/{}/apply", id), Some(&serde_json::json!({})), Access::Authenticated)
            .await
    }
}
