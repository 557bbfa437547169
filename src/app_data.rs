use std::sync::Arc;
use std::time::Duration;

use crate::config::{BootstrapSettings, DatabaseConnections, EnvironmentProvider, SecretManager};
use crate::errors::InternalError;
use crate::providers::{
    ApprovalProvider, AuthenticationProvider, CryptoProvider, DirectoryProvider, UserProvider,
};
use crate::stores::{FacultyStaffStore, NodueRequestStore, SessionStore, UserStore};

/// Providers built once from the stores and shared by every coordinator
pub struct Providers {
    pub crypto_provider: Arc<CryptoProvider>,
    pub authentication_provider: Arc<AuthenticationProvider>,
    pub user_provider: Arc<UserProvider>,
    pub approval_provider: Arc<ApprovalProvider>,
    pub directory_provider: Arc<DirectoryProvider>,
}

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ connections (DatabaseConnections)
///   ├─ secret_manager (Arc<SecretManager>)
///   ├─ stores: user, session, nodue_request, faculty_staff
///   └─ providers: crypto, authentication, user, approval, directory
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ LoginCoordinator::new(app_data)
///   ├─ DashboardCoordinator::new(app_data)
///   ├─ NodueCoordinator::new(app_data)
///   └─ DirectoryCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub secret_manager: Arc<SecretManager>,
    pub session_ttl: Duration,
    pub user_store: Arc<UserStore>,
    pub session_store: Arc<SessionStore>,
    pub nodue_request_store: Arc<NodueRequestStore>,
    pub faculty_staff_store: Arc<FacultyStaffStore>,
    pub providers: Providers,
}

impl AppData {
    /// Initialize all application data
    ///
    /// Database connections should be initialized and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when secret manager initialization fails
    pub fn init(
        connections: DatabaseConnections,
        env_provider: &dyn EnvironmentProvider,
        settings: &BootstrapSettings,
    ) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        tracing::debug!("Initializing secret manager...");
        let secret_manager = Arc::new(SecretManager::init(env_provider).map_err(|e| {
            InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e))
        })?);
        tracing::debug!("Secret manager initialized");

        let app_data = Self::new(connections, secret_manager, settings.session_ttl());

        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Wire stores and providers around an existing connection and secret
    pub fn new(
        connections: DatabaseConnections,
        secret_manager: Arc<SecretManager>,
        session_ttl: Duration,
    ) -> Self {
        // Step 1: Stores, each holding a handle to the shared pool
        let db = connections.db.clone();
        let user_store = Arc::new(UserStore::new(db.clone()));
        let session_store = Arc::new(SessionStore::new(db.clone()));
        let nodue_request_store = Arc::new(NodueRequestStore::new(db.clone()));
        let faculty_staff_store = Arc::new(FacultyStaffStore::new(db));

        // Step 2: Providers over the stores
        let crypto_provider = Arc::new(CryptoProvider::new());
        let providers = Providers {
            authentication_provider: Arc::new(AuthenticationProvider::new(
                user_store.clone(),
                session_store.clone(),
                crypto_provider.clone(),
                secret_manager.clone(),
                session_ttl,
            )),
            user_provider: Arc::new(UserProvider::new(user_store.clone(), crypto_provider.clone())),
            approval_provider: Arc::new(ApprovalProvider::new(nodue_request_store.clone())),
            directory_provider: Arc::new(DirectoryProvider::new(faculty_staff_store.clone())),
            crypto_provider,
        };

        Self {
            connections,
            secret_manager,
            session_ttl,
            user_store,
            session_store,
            nodue_request_store,
            faculty_staff_store,
            providers,
        }
    }
}
