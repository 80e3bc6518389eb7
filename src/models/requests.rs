use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{NewProvider, SearchQuery};

/// Request to search for nearby providers
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(max = 100))]
    #[serde(alias = "service_type", rename = "serviceType", default)]
    pub service_type: Option<String>,
}

impl From<SearchRequest> for SearchQuery {
    fn from(req: SearchRequest) -> Self {
        SearchQuery {
            latitude: req.latitude,
            longitude: req.longitude,
            service_type: req.service_type,
        }
    }
}

/// Request to register a new provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProviderRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub services: Vec<String>,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    #[serde(alias = "postal_code", rename = "postalCode")]
    pub postal_code: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: Option<f64>,
    #[validate(range(min = 0))]
    #[serde(alias = "review_count", rename = "reviewCount", default)]
    pub review_count: i32,
    #[validate(range(min = 0))]
    #[serde(alias = "years_experience", rename = "yearsExperience", default)]
    pub years_experience: Option<i32>,
}

impl From<CreateProviderRequest> for NewProvider {
    fn from(req: CreateProviderRequest) -> Self {
        NewProvider {
            name: req.name,
            services: req.services,
            phone: req.phone,
            email: req.email,
            website: req.website,
            address: req.address,
            city: req.city,
            state: req.state,
            postal_code: req.postal_code,
            latitude: req.latitude,
            longitude: req.longitude,
            description: req.description,
            rating: req.rating,
            review_count: req.review_count,
            years_experience: req.years_experience,
        }
    }
}
