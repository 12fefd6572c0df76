//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, ProfileCommand, ProfileQuery, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
}

impl HttpState {
    /// Construct state from individual port implementations.
    pub fn new(
        registration: Arc<dyn RegistrationService>,
        login: Arc<dyn LoginService>,
        profile: Arc<dyn ProfileQuery>,
        profile_command: Arc<dyn ProfileCommand>,
    ) -> Self {
        Self {
            registration,
            login,
            profile,
            profile_command,
        }
    }

    /// Route every port to a single service implementing all of them.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use accounts::domain::AccountService;
    /// use accounts::inbound::http::state::HttpState;
    /// use accounts::outbound::memory::InMemoryUserRepository;
    /// use accounts::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};
    ///
    /// let clock = Arc::new(mockable::DefaultClock);
    /// let service = Arc::new(AccountService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(Argon2PasswordHasher::new()),
    ///     Arc::new(JwtTokenIssuer::new(b"0123456789abcdef0123456789abcdef", clock)),
    /// ));
    /// let state = HttpState::from_service(service);
    /// let _login = state.login.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RegistrationService + LoginService + ProfileQuery + ProfileCommand + 'static,
    {
        Self {
            registration: service.clone(),
            login: service.clone(),
            profile: service.clone(),
            profile_command: service,
        }
    }
}
