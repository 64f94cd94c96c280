//! Entity builders shared by unit tests.

use chrono::Utc;
use uuid::Uuid;

use super::{City, Comment, Coordinates, Facility, HousingType, Offer, User, UserType};

pub fn user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Oliver".to_string(),
        password_hash: String::new(),
        avatar_url: None,
        user_type: UserType::Regular,
        created_at: Utc::now(),
    }
}

pub fn offer(author: User) -> Offer {
    Offer {
        id: Uuid::new_v4(),
        name: "Beautiful studio at great location".to_string(),
        description: "A quiet cozy and picturesque place near the canals".to_string(),
        publication_date: Utc::now(),
        city: City::Amsterdam,
        preview_image: "https://img.example.com/preview.jpg".to_string(),
        images: (1..=6)
            .map(|i| format!("https://img.example.com/{i}.jpg"))
            .collect(),
        is_premium: false,
        is_favorite: false,
        rating: 4.0,
        housing_type: HousingType::Apartment,
        room_count: 2,
        guest_count: 3,
        cost: 120,
        facilities: vec![Facility::Breakfast, Facility::Washer],
        author,
        comments_count: 0,
        coordinates: Coordinates {
            latitude: 52.370216,
            longitude: 4.895168,
        },
    }
}

pub fn comment(offer_id: Uuid, author: User) -> Comment {
    Comment {
        id: Uuid::new_v4(),
        text: "Lovely place, would stay again".to_string(),
        rating: 5,
        author,
        offer_id,
        created_at: Utc::now(),
    }
}
