#![allow(dead_code)]

use actix_multipart::Multipart;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::{Duration as DateDuration, NaiveDate};
use futures_util::StreamExt;
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::{json, Value};
use std::{
    net::TcpListener,
    sync::{
        atomic::{AtomicBool, AtomicI64, Ordering},
        Arc,
    },
    time::Duration,
};
use ulink_client::{
    entities::practica::PracticaField,
    repositories::http_repo::HttpRepo,
    settings::{AppConfig, AppEnvironment},
    storage::MemoryStore,
    use_cases::create_practica::CreatePracticaPage,
    utils::clock::FixedClock,
    AppState,
};

pub const STUDENT_TOKEN: &str = "student-token";
pub const COMPANY_TOKEN: &str = "company-token";
pub const REFRESHED_TOKEN: &str = "refreshed-token";
pub const STUDENT_UID: &str = "42";
pub const VALID_PASSWORD: &str = "Secreta123";
pub const TAKEN_EMAIL: &str = "ocupado@utem.cl";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

/// In-memory stand-in for the ULINK API.
#[derive(Default)]
pub struct BackendState {
    requests: Mutex<Vec<RecordedRequest>>,
    uploads: Mutex<Vec<RecordedUpload>>,
    practicas: Mutex<Vec<Value>>,
    next_id: AtomicI64,
    reject_tokens: AtomicBool,
    profile_incomplete: AtomicBool,
}

impl BackendState {
    fn record(&self, req: &HttpRequest, body: Value) {
        let authorization = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        self.requests.lock().push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            authorization,
            body,
        });
    }

    /// 401 for a missing bearer token or while tokens are being rejected.
    fn guard(&self, req: &HttpRequest) -> Option<HttpResponse> {
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Bearer "));

        if !bearer || self.reject_tokens.load(Ordering::SeqCst) {
            return Some(HttpResponse::Unauthorized().json(json!({ "message": "Token inválido" })));
        }
        None
    }
}

fn parse_body(body: &web::Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

// ───── Auth ──────────────────────────────────────────────────────────

async fn login(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<BackendState>,
    token: &'static str,
    uid: Value,
) -> HttpResponse {
    let body = parse_body(&body);
    state.record(&req, body.clone());

    if body["password"] != VALID_PASSWORD {
        return HttpResponse::Unauthorized().json(json!({ "message": "Credenciales inválidas" }));
    }
    HttpResponse::Ok().json(json!({ "token": token, "uid": uid }))
}

async fn login_student(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    login(req, body, state, STUDENT_TOKEN, json!(42)).await
}

async fn login_company(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    login(req, body, state, COMPANY_TOKEN, json!("7")).await
}

async fn register(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    let body = parse_body(&body);
    state.record(&req, body.clone());

    if body["email"] == TAKEN_EMAIL {
        return HttpResponse::BadRequest().json(json!({ "message": "El correo ya está registrado" }));
    }
    HttpResponse::Created().json(json!({ "message": "ok" }))
}

async fn password_reset(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, parse_body(&body));
    HttpResponse::Ok().json(json!({ "message": "Se envió un correo de recuperación" }))
}

async fn profile_status(req: HttpRequest, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, Value::Null);
    if let Some(denied) = state.guard(&req) {
        return denied;
    }
    let complete = !state.profile_incomplete.load(Ordering::SeqCst);
    HttpResponse::Ok().json(json!({ "PerfilCompletado": complete }))
}

async fn upload_image(req: HttpRequest, mut payload: Multipart, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, Value::Null);
    if let Some(denied) = state.guard(&req) {
        return denied;
    }

    let mut file_name = String::new();
    while let Some(item) = payload.next().await {
        let Ok(mut field) = item else {
            return HttpResponse::BadRequest().finish();
        };
        let name = field.name().unwrap_or_default().to_string();
        file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let content_type = field.content_type().map(|m| m.to_string()).unwrap_or_default();

        let mut size = 0;
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => size += bytes.len(),
                Err(_) => return HttpResponse::BadRequest().finish(),
            }
        }

        state.uploads.lock().push(RecordedUpload {
            field: name,
            file_name: file_name.clone(),
            content_type,
            size,
        });
    }

    HttpResponse::Ok().json(json!({ "url": format!("https://cdn.ulink.test/fotos/{}", file_name) }))
}

async fn complete_profile(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, parse_body(&body));
    if let Some(denied) = state.guard(&req) {
        return denied;
    }
    state.profile_incomplete.store(false, Ordering::SeqCst);
    HttpResponse::Ok().json(json!({
        "message": "Perfil actualizado correctamente",
        "token": REFRESHED_TOKEN,
    }))
}

// ───── Users ─────────────────────────────────────────────────────────

async fn get_user(req: HttpRequest, path: web::Path<String>, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, Value::Null);
    if let Some(denied) = state.guard(&req) {
        return denied;
    }
    if path.into_inner() != STUDENT_UID {
        return HttpResponse::NotFound().json(json!({ "message": "Usuario no encontrado" }));
    }
    HttpResponse::Ok().json(json!({
        "Foto_Perfil": "https://cdn.ulink.test/fotos/ana.png",
        "Nombres": "Ana",
        "Apellidos": "Pérez",
        "Correo": "ana@utem.cl",
        "Fecha_Nacimiento": "2003-05-14T00:00:00Z",
        "Ano_Ingreso": 2022,
        "Id_carrera": 6,
    }))
}

async fn update_user(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, parse_body(&body));
    if let Some(denied) = state.guard(&req) {
        return denied;
    }
    HttpResponse::Ok().finish()
}

// ───── Prácticas ─────────────────────────────────────────────────────

async fn create_practica(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    let mut body = parse_body(&body);
    state.record(&req, body.clone());
    if let Some(denied) = state.guard(&req) {
        return denied;
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    body["Id"] = json!(id);
    state.practicas.lock().push(body);
    HttpResponse::Created().json(json!({ "id_practica": id }))
}

async fn list_practicas(req: HttpRequest, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, Value::Null);
    if let Some(denied) = state.guard(&req) {
        return denied;
    }
    HttpResponse::Ok().json(state.practicas.lock().clone())
}

async fn update_practica(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Bytes,
    state: web::Data<BackendState>,
) -> HttpResponse {
    let body = parse_body(&body);
    state.record(&req, body.clone());
    if let Some(denied) = state.guard(&req) {
        return denied;
    }

    let id = path.into_inner();
    let mut practicas = state.practicas.lock();
    let Some(existing) = practicas.iter_mut().find(|p| p["Id"] == id) else {
        return HttpResponse::NotFound().json(json!({ "message": "Práctica no encontrada" }));
    };
    if let (Some(target), Some(changes)) = (existing.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    HttpResponse::Ok().json(json!({ "message": "ok" }))
}

async fn delete_practica(req: HttpRequest, path: web::Path<i64>, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, Value::Null);
    if let Some(denied) = state.guard(&req) {
        return denied;
    }

    let id = path.into_inner();
    let mut practicas = state.practicas.lock();
    let before = practicas.len();
    practicas.retain(|p| p["Id"] != id);
    if practicas.len() == before {
        return HttpResponse::NotFound().json(json!({ "message": "Práctica no encontrada" }));
    }
    HttpResponse::NoContent().finish()
}

async fn apply(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    state.record(&req, parse_body(&body));
    if let Some(denied) = state.guard(&req) {
        return denied;
    }
    HttpResponse::Ok().json(json!({ "message": "Postulación registrada" }))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().finish()
}

fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/login", web::post().to(login_student))
        .route("/LoginEm", web::post().to(login_company))
        .route("/register", web::post().to(register))
        .route("/RegisterEm", web::post().to(register))
        .route("/password-reset", web::post().to(password_reset))
        .route("/profile-status", web::get().to(profile_status))
        .route("/upload-image", web::post().to(upload_image))
        .route("/complete-profile", web::post().to(complete_profile))
        .route("/usuarios/{uid}", web::get().to(get_user))
        .route("/usuarios/{uid}", web::put().to(update_user))
        .route("/Create-practicas", web::post().to(create_practica))
        .route("/Get-practicas-empresa", web::get().to(list_practicas))
        .route("/Get-practicas", web::get().to(list_practicas))
        .route("/Update-practicas/{id}", web::put().to(update_practica))
        .route("/Delete-practica/{id}", web::delete().to(delete_practica))
        .route("/Rpracticas/{id}/apply", web::post().to(apply));
}

// ───── Harness ───────────────────────────────────────────────────────

pub struct TestApp {
    pub address: String,
    pub backend: Arc<BackendState>,
    pub state: AppState,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = Arc::new(BackendState::default());

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let backend_clone = backend.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::from(backend_clone.clone()))
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(1)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(format!("{}/health", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let config = test_config(&address);
        let state = AppState::with_store(
            &config,
            Arc::new(MemoryStore::new()),
            Arc::new(FixedClock(today())),
        )
        .expect("Failed to build client state");

        Self {
            address,
            backend,
            state,
            config,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.backend.requests.lock().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.backend.uploads.lock().clone()
    }

    pub fn practicas(&self) -> Vec<Value> {
        self.backend.practicas.lock().clone()
    }

    pub fn seed_practica(&self, practica: Value) -> i64 {
        let id = self.backend.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut practica = practica;
        practica["Id"] = json!(id);
        self.backend.practicas.lock().push(practica);
        id
    }

    /// Makes the backend answer 401 to every authenticated request.
    pub fn reject_tokens(&self) {
        self.backend.reject_tokens.store(true, Ordering::SeqCst);
    }

    pub fn mark_profile_incomplete(&self) {
        self.backend.profile_incomplete.store(true, Ordering::SeqCst);
    }

    pub fn login_as_student(&self) {
        self.state.session.start(STUDENT_TOKEN, STUDENT_UID).unwrap();
    }

    pub fn login_as_company(&self) {
        self.state.session.start(COMPANY_TOKEN, "7").unwrap();
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn test_config(address: &str) -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        api_base_url: address.to_string(),
        request_timeout: "5s".to_string(),
        ..Default::default()
    }
}

// ───── Fixtures ──────────────────────────────────────────────────────

pub fn day(offset: i64) -> String {
    (today() + DateDuration::days(offset)).format("%Y-%m-%d").to_string()
}

pub fn fill_practica(page: &mut CreatePracticaPage<HttpRepo>, titulo: &str) {
    page.change(PracticaField::Titulo, titulo);
    page.change(PracticaField::Descripcion, "Desarrollo de APIs");
    page.change(PracticaField::IdEmpresa, "7");
    page.change(PracticaField::Ubicacion, "Santiago");
    page.change(PracticaField::FechaInicio, day(1));
    page.change(PracticaField::FechaFin, day(60));
    page.change(PracticaField::Requisitos, "Rust, SQL");
    page.change(PracticaField::FechaExpiracion, day(70));
    page.change(PracticaField::Modalidad, "Híbrido");
    page.change(PracticaField::AreaPractica, "Informática");
}

/// A stored posting as the listing endpoints return it.
pub fn practica_json(titulo: &str) -> Value {
    json!({
        "Titulo": titulo,
        "Descripcion": "Soporte a usuarios",
        "Id_Empresa": 7,
        "Ubicacion": "Valparaíso",
        "Fecha_inicio": "2026-11-01T00:00:00.000Z",
        "Fecha_fin": "2027-01-31T00:00:00.000Z",
        "Requisitos": "Inglés intermedio",
        "Fecha_expiracion": "2027-02-15T00:00:00.000Z",
        "Modalidad": "Presencial",
        "Area_practica": "Soporte",
        "Jornada": "Completa",
    })
}
