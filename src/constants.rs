// ───── Persisted keys ────────────────────────────────────────────────
pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const UID_KEY: &str = "uid";
pub const THEME_KEY: &str = "theme";

pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;
pub const DEFAULT_THEME_TTL_DAYS: i64 = 365;

pub const LOGOUT_REDIRECT_SECS: u64 = 5;
pub const MAX_UBICACION_LENGTH: u64 = 30;
pub const MIN_ENROLLMENT_YEAR: i32 = 1900;

// ───── Session ───────────────────────────────────────────────────────
pub const MSG_SESSION_EXPIRED: &str = "Sesión expirada. Por favor, inicie sesión nuevamente.";
pub const MSG_SESSION_EXPIRED_STUDENT: &str = "Sesión expirada. Por favor, vuelve a iniciar sesión.";
pub const MSG_MISSING_TOKEN: &str = "No se encontró el token de autenticación.";

// ───── Prácticas ─────────────────────────────────────────────────────
pub const MSG_CREATE_SUCCESS: &str = "Práctica creada exitosamente con ID:";
pub const MSG_CREATE_FAILED: &str = "Error al crear la práctica";
pub const MSG_LOAD_FAILED: &str = "Error al cargar las prácticas";
pub const MSG_UPDATE_SUCCESS: &str = "La práctica fue actualizada exitosamente";
pub const MSG_UPDATE_FAILED: &str = "Error al actualizar la práctica";
pub const MSG_DELETE_SUCCESS: &str = "La práctica fue eliminada exitosamente";
pub const MSG_DELETE_FAILED: &str = "Error al eliminar la práctica";
pub const MSG_BROWSE_FAILED: &str = "Error al obtener las prácticas";
pub const MSG_BROWSE_EMPTY: &str = "No hay prácticas disponibles que coincidan con tu búsqueda.";
pub const MSG_APPLY_SUCCESS: &str = "Solicitud enviada con éxito";
pub const MSG_APPLY_FAILED: &str = "Error al enviar la solicitud";
pub const NOT_AVAILABLE: &str = "No disponible";

// ───── Auth ──────────────────────────────────────────────────────────
pub const MSG_LOGIN_FAILED: &str = "Error al iniciar sesión. Por favor verifica tus credenciales.";
pub const MSG_MISSING_CREDENTIALS: &str = "No se recibieron las credenciales necesarias";
pub const MSG_CONNECTION_ERROR: &str = "Error de conexión";
pub const MSG_PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";
pub const MSG_REGISTER_SUCCESS: &str = "Usuario registrado correctamente";
pub const MSG_REGISTER_FAILED: &str = "Error al registrar el usuario";
pub const MSG_RESET_FAILED: &str = "Error al procesar la solicitud";
pub const MSG_PROFILE_COMPLETED: &str = "Perfil actualizado correctamente";
pub const MSG_COMPLETE_PROFILE_FAILED: &str = "Error al completar el perfil";
pub const MSG_LOGGED_OUT: &str = "Has cerrado sesión";

// ───── Profile ───────────────────────────────────────────────────────
pub const MSG_PROFILE_UPDATED: &str = "Perfil actualizado exitosamente";
pub const MSG_PROFILE_UPDATE_FAILED: &str =
    "No se pudo actualizar el perfil. Verifica los datos e intenta nuevamente.";
pub const MSG_PROFILE_LOAD_FAILED: &str = "Error al obtener datos del perfil";
pub const NOT_SPECIFIED: &str = "No especificada";
pub const UNKNOWN_CARRERA: &str = "Carrera no especificada";

// ───── Routes ────────────────────────────────────────────────────────
pub const ROUTE_LOGIN: &str = "/";
pub const ROUTE_REGISTER: &str = "/register";
pub const ROUTE_LOGIN_COMPANY: &str = "/login_em";
pub const ROUTE_REGISTER_COMPANY: &str = "/register_em";
pub const ROUTE_COMPLETE_PROFILE: &str = "/complete_profile";
pub const ROUTE_PASSWORD_RECOVERY: &str = "/password_recovery";
pub const ROUTE_USER_PROFILE: &str = "/user-profile";
pub const ROUTE_EDIT_PROFILE: &str = "/edit-profile";
pub const ROUTE_LOGOUT: &str = "/logout";
pub const ROUTE_STUDENT_HOME: &str = "/rpractica";
pub const ROUTE_CREATE_PRACTICA: &str = "/cpractica";
pub const ROUTE_LIST_PRACTICAS: &str = "/upractica";
pub const ROUTE_COMPANY_HOME: &str = "/gpracticas";
pub const ROUTE_LOGOUT_COMPANY: &str = "/logout-em";
