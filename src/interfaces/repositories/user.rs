use async_trait::async_trait;
use reqwest::Method;

use crate::{
    entities::token::{AuthResponse, MessageResponse, ProfileStatus},
    entities::user::{
        AccountKind, CompleteProfileRequest, LoginUser, PasswordResetRequest, ProfileForm,
        RegisterRequest, UploadResponse, UserProfile,
    },
    errors::AppError,
    infrastructure::http::Access,
    infrastructure::utils::image::ProfilePhoto,
    repositories::http_repo::{segment, HttpRepo},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn login(&self, kind: AccountKind, credentials: &LoginUser) -> Result<AuthResponse, AppError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), AppError>;
    async fn password_reset(&self, request: &PasswordResetRequest) -> Result<MessageResponse, AppError>;
    async fn profile_status(&self) -> Result<ProfileStatus, AppError>;
    async fn upload_image(&self, photo: &ProfilePhoto) -> Result<UploadResponse, AppError>;
    async fn complete_profile(&self, request: &CompleteProfileRequest) -> Result<MessageResponse, AppError>;
    async fn get_user(&self, uid: &str) -> Result<UserProfile, AppError>;
    async fn update_user(&self, uid: &str, profile: &ProfileForm) -> Result<(), AppError>;
}

#[async_trait]
impl UserRepository for HttpRepo {
    async fn login(&self, kind: AccountKind, credentials: &LoginUser) -> Result<AuthResponse, AppError> {
        let path = match kind {
            AccountKind::Student => "/login",
            AccountKind::Company => "/LoginEm",
        };
        self.client
            .send_json(Method::POST, path, credentials, Access::Public)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        let path = match request.kind() {
            AccountKind::Student => "/register",
            AccountKind::Company => "/RegisterEm",
        };
        self.client
            .send(Method::POST, path, Some(request), Access::Public)
            .await
    }

    async fn password_reset(&self, request: &PasswordResetRequest) -> Result<MessageResponse, AppError> {
        self.client
            .send_json(Method::POST, "/password-reset", request, Access::Public)
            .await
    }

    async fn profile_status(&self) -> Result<ProfileStatus, AppError> {
        self.client
            .get_json("/profile-status", Access::Authenticated)
            .await
    }

    async fn upload_image(&self, photo: &ProfilePhoto) -> Result<UploadResponse, AppError> {
        self.client
            .upload("/upload-image", photo, Access::Authenticated)
            .await
    }

    async fn complete_profile(&self, request: &CompleteProfileRequest) -> Result<MessageResponse, AppError> {
        self.client
            .send_json(Method::POST, "/complete-profile", request, Access::Authenticated)
            .await
    }

    async fn get_user(&self, uid: &str) -> Result<UserProfile, AppError> {
        self.client
            .get_json(&format!("/usuarios/{}", segment(uid)), Access::Authenticated)
            .await
    }

    async fn update_user(&self, uid: &str, profile: &ProfileForm) -> Result<(), AppError> {
        self.client
            .send(Method::PUT, &format!("/usuarios/{}", segment(uid)), Some(profile), Access::Authenticated)
            .await
    }
}
