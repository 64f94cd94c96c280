//! User account service: registration, credential checks and favourites.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Credentials, NewUser, Offer, Registration, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a plaintext password with HMAC-SHA256 keyed by `salt`.
///
/// Returns a 64-character lowercase hex-encoded MAC.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Recomputes the hash of `password` and compares it with `password_hash`
/// in constant time.
pub fn verify_password(password: &str, salt: &str, password_hash: &str) -> bool {
    let Ok(expected) = hex::decode(password_hash) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// Service owning all access to user accounts.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new account, storing the salted hash of its password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create(&self, registration: Registration, salt: &str) -> Result<User, AppError> {
        let new_user = NewUser {
            password_hash: hash_password(&registration.password, salt),
            email: registration.email,
            name: registration.name,
            avatar_url: registration.avatar_url,
            user_type: registration.user_type,
        };

        let user = self.repository.create(new_user).await?;
        tracing::info!(user_id = %user.id, email = %user.email, "New user created");

        Ok(user)
    }

    /// Checks login credentials.
    ///
    /// Returns `None` both for an unknown email and for a wrong password, so
    /// callers cannot tell the two apart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn verify_user(
        &self,
        credentials: &Credentials,
        salt: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = self.repository.find_by_email(&credentials.email).await? else {
            return Ok(None);
        };

        if verify_password(&credentials.password, salt, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.repository.find_by_email(email).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Returns the account registered under the email, creating it if absent.
    ///
    /// An existing account is returned as-is: the supplied password and
    /// profile fields are ignored in that case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_or_create(
        &self,
        registration: Registration,
        salt: &str,
    ) -> Result<User, AppError> {
        if let Some(existing) = self.repository.find_by_email(&registration.email).await? {
            return Ok(existing);
        }

        self.create(registration, salt).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_favorite_offers(&self, user_id: Uuid) -> Result<Vec<Offer>, AppError> {
        self.repository.find_favorite_offers(user_id).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn add_favorite(&self, user_id: Uuid, offer_id: Uuid) -> Result<(), AppError> {
        self.repository.add_favorite(user_id, offer_id).await?;
        tracing::debug!(%user_id, %offer_id, "Offer added to favorites");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn remove_favorite(&self, user_id: Uuid, offer_id: Uuid) -> Result<(), AppError> {
        self.repository.remove_favorite(user_id, offer_id).await?;
        tracing::debug!(%user_id, %offer_id, "Offer removed from favorites");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{UserType, fixtures};
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;
    use std::sync::Mutex;

    const SALT: &str = "test-salt";

    fn registration(email: &str) -> Registration {
        Registration {
            email: email.to_string(),
            name: "Angelina".to_string(),
            password: "secret1".to_string(),
            avatar_url: None,
            user_type: UserType::Pro,
        }
    }

    fn stored(new_user: NewUser) -> User {
        User {
            id: Uuid::new_v4(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            avatar_url: new_user.avatar_url,
            user_type: new_user.user_type,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_hash_password_consistency() {
        let hash1 = hash_password("secret1", SALT);
        let hash2 = hash_password("secret1", SALT);

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_password_salt_matters() {
        assert_ne!(
            hash_password("secret1", "salt-a"),
            hash_password("secret1", "salt-b")
        );
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("secret1", SALT);

        assert!(verify_password("secret1", SALT, &hash));
        assert!(!verify_password("secret2", SALT, &hash));
        assert!(!verify_password("secret1", "other-salt", &hash));
        assert!(!verify_password("secret1", SALT, "not-hex"));
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_plaintext() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .withf(|u| u.password_hash == hash_password("secret1", SALT) && u.email == "a@b.io")
            .times(1)
            .returning(|u| Ok(stored(u)));

        let service = UserService::new(Arc::new(mock_repo));
        let user = service.create(registration("a@b.io"), SALT).await.unwrap();

        assert_ne!(user.password_hash, "secret1");
        assert_eq!(user.user_type, UserType::Pro);
    }

    #[tokio::test]
    async fn test_verify_user_success() {
        let mut mock_repo = MockUserRepository::new();

        let mut user = fixtures::user("a@b.io");
        user.password_hash = hash_password("secret1", SALT);
        let found = user.clone();
        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "a@b.io")
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let service = UserService::new(Arc::new(mock_repo));
        let credentials = Credentials {
            email: "a@b.io".to_string(),
            password: "secret1".to_string(),
        };

        let result = service.verify_user(&credentials, SALT).await.unwrap();
        assert_eq!(result.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_verify_user_wrong_password_and_unknown_email_look_the_same() {
        let mut mock_repo = MockUserRepository::new();

        let mut user = fixtures::user("a@b.io");
        user.password_hash = hash_password("secret1", SALT);
        mock_repo
            .expect_find_by_email()
            .returning(move |email| {
                if email == "a@b.io" {
                    Ok(Some(user.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = UserService::new(Arc::new(mock_repo));

        let wrong_password = Credentials {
            email: "a@b.io".to_string(),
            password: "nope".to_string(),
        };
        let unknown_email = Credentials {
            email: "ghost@b.io".to_string(),
            password: "secret1".to_string(),
        };

        assert!(service.verify_user(&wrong_password, SALT).await.unwrap().is_none());
        assert!(service.verify_user(&unknown_email, SALT).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_or_create_twice_creates_once() {
        let mut mock_repo = MockUserRepository::new();
        let accounts: Arc<Mutex<Vec<User>>> = Arc::new(Mutex::new(Vec::new()));

        let lookup = accounts.clone();
        mock_repo.expect_find_by_email().times(2).returning(move |email| {
            Ok(lookup
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        });

        let store = accounts.clone();
        mock_repo.expect_create().times(1).returning(move |u| {
            let user = stored(u);
            store.lock().unwrap().push(user.clone());
            Ok(user)
        });

        let service = UserService::new(Arc::new(mock_repo));

        let first = service
            .find_or_create(registration("same@b.io"), SALT)
            .await
            .unwrap();
        let second = service
            .find_or_create(registration("same@b.io"), SALT)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(accounts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_favorite_offers_delegates() {
        let mut mock_repo = MockUserRepository::new();
        let user_id = Uuid::new_v4();
        let offer = fixtures::offer(fixtures::user("host@b.io"));

        mock_repo
            .expect_find_favorite_offers()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(vec![offer.clone()]));

        let service = UserService::new(Arc::new(mock_repo));
        let offers = service.find_favorite_offers(user_id).await.unwrap();

        assert_eq!(offers.len(), 1);
    }
}
