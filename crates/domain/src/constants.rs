//! Client constants
//!
//! Centralized location for storage keys, endpoint paths and navigation
//! targets shared by every layer.

// Persisted session keys
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const ROLE_KEY: &str = "userRole";

// Backend defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_LOGIN_PATH: &str = "/auth/autenticar";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("informado/", env!("CARGO_PKG_VERSION"));

// Storage defaults
pub const DEFAULT_SESSION_FILE: &str = "session.json";
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "TrujilloInformado.session";

// Navigation targets
pub const LOGIN_PAGE: &str = "login.html";
pub const CITIZEN_DASHBOARD: &str = "dashboard-ciudadano.html";
pub const SUPERVISOR_DASHBOARD: &str = "dashboard-supervisor.html";
pub const WORKER_DASHBOARD: &str = "dashboard-trabajador.html";

// Synthesized response when the refresh procedure gives up
pub const REFRESH_FAILED_MESSAGE: &str = "Refresh token rejected; session ended";

// Report listing
pub const REPORTS_SORT: &str = "createdAt,desc";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// Photo uploads
pub const SUPPORTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
