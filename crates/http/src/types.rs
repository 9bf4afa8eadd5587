//! Wire types for the PawHaven REST backend
//!
//! Field names follow the backend's snake_case JSON. Most fields are optional
//! because list and detail serializers expose different subsets.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub use pawhaven_core::pagination::{PageQuery, Paginated};

// ---------------------------------------------------------------------------
// Auth

/// Token refresh request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token refresh response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Login form, including the captcha answer and its id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub captcha: String,
    pub uid: String,
}

/// Issued token pair; `refresh` is omitted by some backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password1: String,
    /// Email verification code
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub tokens: Option<LoginResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfirm {
    pub email: String,
    pub code: String,
    pub new_password: String,
    pub re_new_password: String,
}

/// Captcha challenge: an id and a base64 image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaResponse {
    pub uid: String,
    pub image: String,
}

/// Current user's profile and adoption preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_age_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_age_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_experience: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_situation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_yard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_pets: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

/// Partial profile update; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_yard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

/// User reference that the backend sends either as a bare id or as an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(u64),
    User {
        #[serde(default)]
        id: Option<u64>,
        #[serde(default)]
        username: Option<String>,
    },
}

impl UserRef {
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::User { id, .. } => *id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::User { username, .. } => username.as_deref(),
        }
    }
}

/// Minimal public view of another user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub username: String,
}

// ---------------------------------------------------------------------------
// Adoption

/// Adoptable pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub age_months: Option<u32>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address_display: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `AVAILABLE`, `PENDING`, `ADOPTED`, `LOST`, `DRAFT`, `ARCHIVED`, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub add_date: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub address_lat: Option<f64>,
    #[serde(default)]
    pub address_lon: Option<f64>,
}

/// Filters for the pet list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub species: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub ordering: Option<String>,
}

/// Fields for creating or editing a pet listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdoptionApplyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionApplyResponse {
    pub ok: bool,
    pub application_id: u64,
}

// ---------------------------------------------------------------------------
// Blog

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub parent: Option<u64>,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub add_date: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub add_date: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub article_count: Option<u64>,
}

/// Full article, including rendered content and table of contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub toc: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// View count
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub add_date: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub is_favorited: Option<bool>,
}

/// Article as it appears in lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub add_date: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub is_favorited: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub category: Option<u64>,
    pub tags: Option<u64>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

/// New article or partial edit; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticlePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
}

/// Articles published in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub year: i32,
    pub month: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub parent: Option<u64>,
    pub user: UserSummary,
    #[serde(default)]
    pub add_date: Option<String>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
}

/// Location of an uploaded blog image, plus markdown alt text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    #[serde(default)]
    pub text: String,
}

// ---------------------------------------------------------------------------
// Addresses

/// Structured address sent inline with shelters, donations and lost reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: u64,
    pub name: String,
    pub country: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    pub name: String,
    pub region: u64,
}

/// Stored address record, referencing country/region/city by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub country: Option<u64>,
    #[serde(default)]
    pub region: Option<u64>,
    #[serde(default)]
    pub city: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressSearchResponse {
    #[serde(default)]
    pub results: Vec<Address>,
}

// ---------------------------------------------------------------------------
// Shelters

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<u64>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub building_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub current_animals: u32,
    #[serde(default)]
    pub available_capacity: Option<u32>,
    #[serde(default)]
    pub occupancy_rate: Option<f64>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub created_by: Option<u64>,
    #[serde(default)]
    pub created_by_username: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelterListParams {
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

// ---------------------------------------------------------------------------
// Tickets

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `open`, `in_progress`, `closed`, `resolved`
    #[serde(default)]
    pub status: Option<String>,
    /// `low`, `medium`, `high`, `urgent`
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// New ticket or partial edit; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Lost and found

/// Address of a lost report: an id, a display string, or an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LostAddress {
    Id(u64),
    Text(String),
    Detail {
        #[serde(default)]
        id: Option<u64>,
        #[serde(default)]
        full: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LostPet {
    pub id: u64,
    #[serde(default)]
    pub pet_name: Option<String>,
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// `male` or `female`
    pub sex: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub address: Option<LostAddress>,
    pub lost_time: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reward: Option<JsonValue>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// `open`, `found`, `closed`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reporter: Option<u64>,
    #[serde(default)]
    pub reporter_username: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LostListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub ordering: Option<String>,
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Notifications

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Reply,
    Mention,
    FriendRequest,
    System,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub notification_type: NotificationType,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub from_user: Option<UserSummary>,
    #[serde(default)]
    pub comment_content: Option<String>,
    #[serde(default)]
    pub friendship_id: Option<u64>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub read_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    #[serde(default)]
    pub unread_count: u64,
}

// ---------------------------------------------------------------------------
// Holiday family

/// Photo attached to a holiday family application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyPhoto {
    pub id: u64,
    pub photo: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Foster ("holiday family") application as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayFamilyApplication {
    pub id: u64,
    #[serde(default)]
    pub user: Option<u64>,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub pet_count: u32,
    #[serde(default)]
    pub can_take_dogs: bool,
    #[serde(default)]
    pub can_take_cats: bool,
    #[serde(default)]
    pub can_take_rabbits: bool,
    #[serde(default)]
    pub can_take_others: String,
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub id_document: Option<String>,
    #[serde(default)]
    pub family_photos: Vec<FamilyPhoto>,
    #[serde(default)]
    pub terms_agreed: bool,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub review_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Admin list response: a page envelope or a bare array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplicationList {
    Page(Paginated<HolidayFamilyApplication>),
    Plain(Vec<HolidayFamilyApplication>),
}

impl ApplicationList {
    pub fn into_vec(self) -> Vec<HolidayFamilyApplication> {
        match self {
            Self::Page(page) => page.results,
            Self::Plain(list) => list,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_ref_accepts_id_or_object() {
        let id: UserRef = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(id.id(), Some(7));

        let user: UserRef = serde_json::from_value(json!({"id": 3, "username": "ola"})).unwrap();
        assert_eq!(user.id(), Some(3));
        assert_eq!(user.username(), Some("ola"));
    }

    #[test]
    fn lost_address_variants() {
        let pet: LostPet = serde_json::from_value(json!({
            "id": 1,
            "species": "cat",
            "sex": "female",
            "lost_time": "2024-05-01T10:00",
            "address": {"id": 4, "full": "Krakow, Rynek 1"},
            "reward": "100.00"
        }))
        .unwrap();
        assert_eq!(
            pet.address,
            Some(LostAddress::Detail {
                id: Some(4),
                full: Some("Krakow, Rynek 1".into())
            })
        );

        let text: LostAddress = serde_json::from_value(json!("Warsaw")).unwrap();
        assert_eq!(text, LostAddress::Text("Warsaw".into()));
    }

    #[test]
    fn unknown_notification_types_are_tolerated() {
        let n: Notification = serde_json::from_value(json!({
            "id": 9,
            "notification_type": "adoption_update",
            "title": "Hi",
            "is_read": false
        }))
        .unwrap();
        assert_eq!(n.notification_type, NotificationType::Other);
    }

    #[test]
    fn application_list_accepts_both_shapes() {
        let app = json!({"id": 1, "full_name": "Ann", "status": "pending"});
        let page: ApplicationList = serde_json::from_value(
            json!({"count": 1, "next": null, "previous": null, "results": [app.clone()]}),
        )
        .unwrap();
        assert_eq!(page.into_vec().len(), 1);

        let plain: ApplicationList = serde_json::from_value(json!([app])).unwrap();
        assert_eq!(plain.into_vec()[0].status, ApplicationStatus::Pending);
    }
}
