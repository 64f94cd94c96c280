//! Router harness over mock repositories for handler tests.

use std::sync::Arc;

use axum_test::TestServer;

use crate::application::services::JwtService;
use crate::domain::entities::User;
use crate::domain::repositories::{MockCommentRepository, MockOfferRepository, MockUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

pub(crate) const TEST_JWT_SECRET: &str = "test-jwt-secret-for-handlers";
pub(crate) const TEST_SALT: &str = "test-salt";

/// One mock per repository; set expectations, then build the server.
#[derive(Default)]
pub(crate) struct Mocks {
    pub users: MockUserRepository,
    pub offers: MockOfferRepository,
    pub comments: MockCommentRepository,
}

impl Mocks {
    pub fn state(self) -> AppState {
        AppState::from_repositories(
            Arc::new(self.users),
            Arc::new(self.offers),
            Arc::new(self.comments),
            JwtService::new(TEST_JWT_SECRET, 3600),
            TEST_SALT,
        )
    }

    pub fn server(self) -> TestServer {
        TestServer::new(app_router(self.state())).unwrap()
    }
}

/// Issues a token the test router accepts.
pub(crate) fn token_for(user: &User) -> String {
    JwtService::new(TEST_JWT_SECRET, 3600).issue(user).unwrap()
}
