use crate::error::{auth_error, AppResult};
use crate::utils::role::normalize_role;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Area value meaning "all areas"
pub const NATIONAL_AREA: &str = "Nasional";

/// Claims carried in the bearer token
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: Option<String>,
    /// Role as issued by the backend, e.g. "Super Admin"
    #[serde(default)]
    pub role: Option<String>,
    /// Area (Korwil) the account belongs to
    #[serde(default)]
    pub area: Option<String>,
    /// Visibility scope, e.g. "nasional" or "wilayah"
    #[serde(default)]
    pub scope: Option<String>,
    /// Expiration time (as UTC timestamp)
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
}

impl Role {
    pub fn parse(role: &str) -> Self {
        match normalize_role(role).as_str() {
            "super_admin" | "superadmin" => Role::SuperAdmin,
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    National,
    Area,
}

impl Scope {
    pub fn parse(scope: &str) -> Self {
        match normalize_role(scope).as_str() {
            "nasional" | "national" => Scope::National,
            _ => Scope::Area,
        }
    }
}

/// An authenticated session: the bearer token and its decoded claims.
///
/// Passed explicitly to the API client; created on login and dropped on logout.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    claims: Claims,
}

impl Session {
    /// Decode the claims of a token.
    ///
    /// The signature is not checked here, the backend verifies it on every request.
    pub fn from_token(token: &str) -> AppResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(auth_error("Empty token"));
        }

        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| auth_error(&format!("Failed to decode token: {}", e)))?;

        debug!("Decoded session claims: {:?}", data.claims);

        Ok(Self {
            token: token.to_string(),
            claims: data.claims,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn role(&self) -> Role {
        self.claims.role.as_deref().map(Role::parse).unwrap_or(Role::User)
    }

    pub fn scope(&self) -> Scope {
        self.claims.scope.as_deref().map(Scope::parse).unwrap_or(Scope::Area)
    }

    pub fn area(&self) -> Option<&str> {
        self.claims.area.as_deref()
    }

    /// Whether the token expiry has passed at `now` (UTC timestamp)
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.claims.exp.is_some_and(|exp| exp <= now)
    }

    /// National scope or super admins see every area
    pub fn sees_all_areas(&self) -> bool {
        self.scope() == Scope::National || self.role() == Role::SuperAdmin
    }

    /// Whether this session may view data for `area`
    pub fn can_view_area(&self, area: &str) -> bool {
        self.sees_all_areas() || self.area() == Some(area)
    }

    /// Whether this session may create, update or delete records
    pub fn can_manage(&self) -> bool {
        matches!(self.role(), Role::SuperAdmin | Role::Admin)
    }

    /// The area a dashboard request is pinned to.
    ///
    /// Sessions limited to their own area always get that area back.
    pub fn effective_area(&self, requested: &str) -> String {
        if self.sees_all_areas() {
            return requested.to_string();
        }
        self.area().unwrap_or(requested).to_string()
    }
}

/// Contents of the session file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    token: Option<String>,
    flash: Option<String>,
}

/// File-backed persistence for the session token and a one-shot flash message
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored session, if any
    pub fn load(&self) -> AppResult<Option<Session>> {
        let stored = self.read()?;
        stored.token.as_deref().map(Session::from_token).transpose()
    }

    /// Persist the session token (login)
    pub fn save(&self, session: &Session) -> AppResult<()> {
        let mut stored = self.read()?;
        stored.token = Some(session.token().to_string());
        self.write(&stored)
    }

    /// Forget the session token (logout); a pending flash message is kept
    pub fn clear(&self) -> AppResult<()> {
        let mut stored = self.read()?;
        stored.token = None;
        self.write(&stored)
    }

    /// Store a message to be shown once by the next command
    pub fn set_flash(&self, message: &str) -> AppResult<()> {
        let mut stored = self.read()?;
        stored.flash = Some(message.to_string());
        self.write(&stored)
    }

    /// Take the pending flash message, removing it
    pub fn take_flash(&self) -> AppResult<Option<String>> {
        let mut stored = self.read()?;
        let flash = stored.flash.take();
        if flash.is_some() {
            self.write(&stored)?;
        }
        Ok(flash)
    }

    fn read(&self) -> AppResult<StoredSession> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn write(&self, stored: &StoredSession) -> AppResult<()> {
        if stored.token.is_none() && stored.flash.is_none() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        // Create config directory if it doesn't exist
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !Path::new(parent).exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_str = toml::to_string(stored)?;
        fs::write(&self.path, toml_str)?;
        Ok(())
    }
}
