//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Behaviour that needs secrets or storage
//! (password hashing, persistence) lives in services and repositories.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`Offer`] - A rental listing
//! - [`Comment`] - A review attached to an offer
//!
//! # Design Pattern
//!
//! Separate structs are used for creation and partial updates:
//! - `NewUser`, `NewOffer`, `NewComment` - For creating new records
//! - `Registration`, `Credentials` - Plaintext sign-up and login input
//! - `OfferPatch` - For partial updates

pub mod comment;
pub mod offer;
pub mod user;

pub use comment::{Comment, NewComment};
pub use offer::{City, Coordinates, Facility, HousingType, NewOffer, Offer, OfferPatch};
pub use user::{Credentials, NewUser, Registration, User, UserType};

#[cfg(test)]
pub mod fixtures;
