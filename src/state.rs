use std::fmt;
use std::sync::Arc;

use coursehub_config::{CorsConfig, JwtConfig};

use crate::modules::auth::provider::{AuthProvider, StoreAuthProvider};
use crate::modules::auth::repository::AccountRepository;
use crate::modules::courses::repository::CourseRepository;
use crate::modules::enrollments::repository::EnrollmentRepository;
use crate::modules::students::repository::StudentRepository;

/// A store that backs every repository trait.
pub trait Store:
    StudentRepository + CourseRepository + EnrollmentRepository + AccountRepository + 'static
{
}

impl<T> Store for T where
    T: StudentRepository + CourseRepository + EnrollmentRepository + AccountRepository + 'static
{
}

#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub auth: Arc<dyn AuthProvider>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new<S: Store>(store: Arc<S>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        let accounts: Arc<dyn AccountRepository> = store.clone();
        Self {
            students: store.clone(),
            courses: store.clone(),
            enrollments: store,
            auth: Arc::new(StoreAuthProvider::new(accounts.clone())),
            accounts,
            jwt_config,
            cors_config,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
