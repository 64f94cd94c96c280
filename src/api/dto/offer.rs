//! DTOs for offer endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use uuid::Uuid;
use validator::Validate;

use super::user::UserRdo;
use crate::api::middleware::validate_dto::RequiredFields;
use crate::domain::entities::{
    City, Coordinates, Facility, HousingType, NewOffer, Offer, OfferPatch,
};

/// Query parameters for `GET /offers`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct OffersQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Query parameters for `GET /offers/premium`.
///
/// The city is parsed by the handler so an unknown name yields a JSON 400.
#[derive(Debug, Deserialize)]
pub struct PremiumQuery {
    pub city: String,
}

/// Geographic position of an offer.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct CoordinatesDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<CoordinatesDto> for Coordinates {
    fn from(dto: CoordinatesDto) -> Self {
        Coordinates {
            latitude: dto.latitude,
            longitude: dto.longitude,
        }
    }
}

/// Request body for `POST /offers`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferDto {
    #[validate(length(min = 10, max = 100))]
    pub name: String,

    #[validate(length(min = 20, max = 1024))]
    pub description: String,

    /// Defaults to the time of creation.
    pub publication_date: Option<DateTime<Utc>>,

    pub city: City,

    #[validate(length(min = 1))]
    pub preview_image: String,

    #[validate(length(equal = 6, message = "Exactly 6 images are required"))]
    pub images: Vec<String>,

    pub is_premium: bool,

    #[serde(default)]
    pub is_favorite: bool,

    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,

    #[serde(rename = "type")]
    pub housing_type: HousingType,

    #[validate(range(min = 1, max = 8))]
    pub room_count: i32,

    #[validate(range(min = 1, max = 10))]
    pub guest_count: i32,

    #[validate(range(min = 100, max = 100_000))]
    pub cost: i32,

    #[validate(length(min = 1))]
    pub facilities: Vec<Facility>,

    #[validate(nested)]
    pub coordinates: CoordinatesDto,
}

impl RequiredFields for CreateOfferDto {
    const REQUIRED: &'static [&'static str] = &[
        "name",
        "description",
        "city",
        "previewImage",
        "images",
        "isPremium",
        "rating",
        "type",
        "roomCount",
        "guestCount",
        "cost",
        "facilities",
        "coordinates",
    ];
}

impl CreateOfferDto {
    /// Builds the creation record for an offer authored by `author_id`.
    pub fn into_new_offer(self, author_id: Uuid) -> NewOffer {
        NewOffer {
            name: self.name,
            description: self.description,
            publication_date: self.publication_date.unwrap_or_else(Utc::now),
            city: self.city,
            preview_image: self.preview_image,
            images: self.images,
            is_premium: self.is_premium,
            is_favorite: self.is_favorite,
            rating: self.rating,
            housing_type: self.housing_type,
            room_count: self.room_count,
            guest_count: self.guest_count,
            cost: self.cost,
            facilities: self.facilities,
            author_id,
            coordinates: self.coordinates.into(),
        }
    }
}

/// Request body for `PATCH /offers/{offerId}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferDto {
    #[validate(length(min = 10, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 20, max = 1024))]
    pub description: Option<String>,

    pub publication_date: Option<DateTime<Utc>>,

    pub city: Option<City>,

    #[validate(length(min = 1))]
    pub preview_image: Option<String>,

    #[validate(length(equal = 6, message = "Exactly 6 images are required"))]
    pub images: Option<Vec<String>>,

    pub is_premium: Option<bool>,

    pub is_favorite: Option<bool>,

    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: Option<f64>,

    #[serde(rename = "type")]
    pub housing_type: Option<HousingType>,

    #[validate(range(min = 1, max = 8))]
    pub room_count: Option<i32>,

    #[validate(range(min = 1, max = 10))]
    pub guest_count: Option<i32>,

    #[validate(range(min = 100, max = 100_000))]
    pub cost: Option<i32>,

    #[validate(length(min = 1))]
    pub facilities: Option<Vec<Facility>>,

    #[validate(nested)]
    pub coordinates: Option<CoordinatesDto>,
}

impl RequiredFields for UpdateOfferDto {
    const REQUIRED: &'static [&'static str] = &[];
}

impl From<UpdateOfferDto> for OfferPatch {
    fn from(dto: UpdateOfferDto) -> Self {
        OfferPatch {
            name: dto.name,
            description: dto.description,
            publication_date: dto.publication_date,
            city: dto.city,
            preview_image: dto.preview_image,
            images: dto.images,
            is_premium: dto.is_premium,
            is_favorite: dto.is_favorite,
            rating: dto.rating,
            housing_type: dto.housing_type,
            room_count: dto.room_count,
            guest_count: dto.guest_count,
            cost: dto.cost,
            facilities: dto.facilities,
            coordinates: dto.coordinates.map(Into::into),
        }
    }
}

/// Offer as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRdo {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub publication_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    #[serde(rename = "type")]
    pub housing_type: HousingType,
    pub room_count: i32,
    pub guest_count: i32,
    pub cost: i32,
    pub facilities: Vec<Facility>,
    pub author: UserRdo,
    pub comments_count: i32,
    pub coordinates: Coordinates,
}

impl From<Offer> for OfferRdo {
    fn from(offer: Offer) -> Self {
        OfferRdo {
            id: offer.id,
            name: offer.name,
            description: offer.description,
            publication_date: offer.publication_date,
            city: offer.city,
            preview_image: offer.preview_image,
            images: offer.images,
            is_premium: offer.is_premium,
            is_favorite: offer.is_favorite,
            rating: offer.rating,
            housing_type: offer.housing_type,
            room_count: offer.room_count,
            guest_count: offer.guest_count,
            cost: offer.cost,
            facilities: offer.facilities,
            author: offer.author.into(),
            comments_count: offer.comments_count,
            coordinates: offer.coordinates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> serde_json::Value {
        json!({
            "name": "Canal View Prinsengracht",
            "description": "Bright apartment with a view over the canal",
            "city": "Amsterdam",
            "previewImage": "preview.jpg",
            "images": ["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg"],
            "isPremium": true,
            "rating": 4.8,
            "type": "apartment",
            "roomCount": 3,
            "guestCount": 4,
            "cost": 350,
            "facilities": ["Breakfast", "Air conditioning"],
            "coordinates": { "latitude": 52.37, "longitude": 4.89 }
        })
    }

    #[test]
    fn test_create_offer_dto_accepts_valid_body() {
        let dto: CreateOfferDto = serde_json::from_value(valid_body()).unwrap();

        assert!(dto.validate().is_ok());
        assert_eq!(dto.city, City::Amsterdam);
        assert_eq!(dto.facilities[1], Facility::AirConditioning);
        assert!(!dto.is_favorite);
    }

    #[test]
    fn test_create_offer_dto_constraints() {
        let mut body = valid_body();
        body["images"] = json!(["1.jpg"]);
        body["roomCount"] = json!(9);
        body["name"] = json!("Short");

        let dto: CreateOfferDto = serde_json::from_value(body).unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("images"));
        assert!(fields.contains_key("room_count"));
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn test_create_offer_dto_rejects_unknown_city() {
        let mut body = valid_body();
        body["city"] = json!("Berlin");

        assert!(serde_json::from_value::<CreateOfferDto>(body).is_err());
    }

    #[test]
    fn test_into_new_offer_defaults_publication_date() {
        let dto: CreateOfferDto = serde_json::from_value(valid_body()).unwrap();
        let author_id = Uuid::new_v4();

        let before = Utc::now();
        let new_offer = dto.into_new_offer(author_id);

        assert_eq!(new_offer.author_id, author_id);
        assert!(new_offer.publication_date >= before);
        assert_eq!(new_offer.coordinates.latitude, 52.37);
    }

    #[test]
    fn test_update_offer_dto_validates_present_fields_only() {
        let dto: UpdateOfferDto = serde_json::from_value(json!({ "cost": 500 })).unwrap();
        assert!(dto.validate().is_ok());

        let patch = OfferPatch::from(dto);
        assert_eq!(patch.cost, Some(500));
        assert!(patch.name.is_none());

        let dto: UpdateOfferDto = serde_json::from_value(json!({ "cost": 5 })).unwrap();
        assert!(dto.validate().is_err());
    }
}
