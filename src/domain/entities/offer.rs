//! Offer entity: a rental listing and its enumerated attributes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// Cities the service lists offers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum City {
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

impl City {
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Paris => "Paris",
            City::Cologne => "Cologne",
            City::Brussels => "Brussels",
            City::Amsterdam => "Amsterdam",
            City::Hamburg => "Hamburg",
            City::Dusseldorf => "Dusseldorf",
        }
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paris" => Ok(City::Paris),
            "Cologne" => Ok(City::Cologne),
            "Brussels" => Ok(City::Brussels),
            "Amsterdam" => Ok(City::Amsterdam),
            "Hamburg" => Ok(City::Hamburg),
            "Dusseldorf" => Ok(City::Dusseldorf),
            other => Err(format!("unknown city '{other}'")),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HousingType {
    Apartment,
    House,
    Room,
    Hotel,
}

impl HousingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HousingType::Apartment => "apartment",
            HousingType::House => "house",
            HousingType::Room => "room",
            HousingType::Hotel => "hotel",
        }
    }
}

impl FromStr for HousingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apartment" => Ok(HousingType::Apartment),
            "house" => Ok(HousingType::House),
            "room" => Ok(HousingType::Room),
            "hotel" => Ok(HousingType::Hotel),
            other => Err(format!("unknown housing type '{other}'")),
        }
    }
}

/// Amenities an offer can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facility {
    Breakfast,
    #[serde(rename = "Air conditioning")]
    AirConditioning,
    #[serde(rename = "Laptop friendly workspace")]
    LaptopFriendlyWorkspace,
    #[serde(rename = "Baby seat")]
    BabySeat,
    Washer,
    Towels,
    Fridge,
}

impl Facility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facility::Breakfast => "Breakfast",
            Facility::AirConditioning => "Air conditioning",
            Facility::LaptopFriendlyWorkspace => "Laptop friendly workspace",
            Facility::BabySeat => "Baby seat",
            Facility::Washer => "Washer",
            Facility::Towels => "Towels",
            Facility::Fridge => "Fridge",
        }
    }
}

impl FromStr for Facility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(Facility::Breakfast),
            "Air conditioning" => Ok(Facility::AirConditioning),
            "Laptop friendly workspace" => Ok(Facility::LaptopFriendlyWorkspace),
            "Baby seat" => Ok(Facility::BabySeat),
            "Washer" => Ok(Facility::Washer),
            "Towels" => Ok(Facility::Towels),
            "Fridge" => Ok(Facility::Fridge),
            other => Err(format!("unknown facility '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A rental listing together with its author.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
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
    pub housing_type: HousingType,
    pub room_count: i32,
    pub guest_count: i32,
    pub cost: i32,
    pub facilities: Vec<Facility>,
    pub author: User,
    pub comments_count: i32,
    pub coordinates: Coordinates,
}

/// Input data for creating an offer.
///
/// `author_id` comes from the authenticated user, never from the request body.
#[derive(Debug, Clone)]
pub struct NewOffer {
    pub name: String,
    pub description: String,
    pub publication_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    pub housing_type: HousingType,
    pub room_count: i32,
    pub guest_count: i32,
    pub cost: i32,
    pub facilities: Vec<Facility>,
    pub author_id: Uuid,
    pub coordinates: Coordinates,
}

/// Partial update for an existing offer. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct OfferPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub city: Option<City>,
    pub preview_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub is_premium: Option<bool>,
    pub is_favorite: Option<bool>,
    pub rating: Option<f64>,
    pub housing_type: Option<HousingType>,
    pub room_count: Option<i32>,
    pub guest_count: Option<i32>,
    pub cost: Option<i32>,
    pub facilities: Option<Vec<Facility>>,
    pub coordinates: Option<Coordinates>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_parses_storage_names() {
        assert_eq!("Amsterdam".parse::<City>().unwrap(), City::Amsterdam);
        assert!("amsterdam".parse::<City>().is_err());
    }

    #[test]
    fn test_facility_storage_name_matches_json_name() {
        let json = serde_json::to_value(Facility::LaptopFriendlyWorkspace).unwrap();
        assert_eq!(json, Facility::LaptopFriendlyWorkspace.as_str());
        assert_eq!(
            "Air conditioning".parse::<Facility>().unwrap(),
            Facility::AirConditioning
        );
    }

    #[test]
    fn test_housing_type_json_is_lowercase() {
        let json = serde_json::to_value(HousingType::Hotel).unwrap();
        assert_eq!(json, "hotel");
        assert_eq!("hotel".parse::<HousingType>().unwrap(), HousingType::Hotel);
    }

    #[test]
    fn test_offer_patch_default_changes_nothing() {
        let patch = OfferPatch::default();
        assert!(patch.name.is_none());
        assert!(patch.coordinates.is_none());
        assert!(patch.facilities.is_none());
    }
}
