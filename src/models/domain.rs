use serde::{Deserialize, Serialize};

/// Identifier assigned to a provider on creation
pub type ProviderId = i32;

/// Legal service provider listed in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub services: Vec<String>,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "reviewCount", default)]
    pub review_count: i32,
    #[serde(rename = "yearsExperience", default)]
    pub years_experience: Option<i32>,
}

/// Provider fields supplied on creation, before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProvider {
    pub name: String,
    pub services: Vec<String>,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "reviewCount", default)]
    pub review_count: i32,
    #[serde(rename = "yearsExperience", default)]
    pub years_experience: Option<i32>,
}

impl NewProvider {
    pub fn into_provider(self, id: ProviderId) -> Provider {
        Provider {
            id,
            name: self.name,
            services: self.services,
            phone: self.phone,
            email: self.email,
            website: self.website,
            address: self.address,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description,
            rating: self.rating,
            review_count: self.review_count,
            years_experience: self.years_experience,
        }
    }
}

/// Already-validated search point plus optional category filter
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub service_type: Option<String>,
}

impl SearchQuery {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            service_type: None,
        }
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// The category filter, or `None` when it is absent, blank or `"all"`
    ///
    /// Unlike an exact comparison against the literal `"all"`, the value is
    /// trimmed and the sentinel is matched ignoring case: `" ALL "` disables
    /// filtering and `" tax "` filters as `"tax"`.
    pub fn category_filter(&self) -> Option<&str> {
        self.service_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
    }
}

/// Provider paired with its distance from the query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub provider: Provider,
    /// Distance in kilometers
    pub distance: f64,
}

/// Which radius tier produced a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    Primary,
    Fallback,
}

/// Final ranked result of a search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub results: Vec<ScoredCandidate>,
    pub radius_used: u16,
    pub tier: SearchTier,
}

/// Scoring weights
///
/// The defaults are the tuned ranking constants:
/// score = (proximity_base - km)
///       + stars * rating
///       + min(reviews, review_cap) / review_divisor
///       + years * experience
///       + category_bonus (filter active and matched)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub proximity_base: f64,
    pub rating: f64,
    pub review_cap: i32,
    pub review_divisor: f64,
    pub experience: f64,
    pub category_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            proximity_base: 100.0,
            rating: 10.0,
            review_cap: 100,
            review_divisor: 5.0,
            experience: 2.0,
            category_bonus: 30.0,
        }
    }
}

/// Radius tiers and result cap for the fallback search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRadii {
    pub primary_km: u16,
    pub fallback_km: u16,
    pub max_results: usize,
}

impl Default for SearchRadii {
    fn default() -> Self {
        Self {
            primary_km: 30,
            fallback_km: 60,
            max_results: 3,
        }
    }
}

/// Entry in the catalog of service types offered to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceType {
    pub value: &'static str,
    pub label: &'static str,
}

pub const SERVICE_TYPES: &[ServiceType] = &[
    ServiceType { value: "all", label: "All Legal Services" },
    ServiceType { value: "family", label: "Family Law" },
    ServiceType { value: "criminal", label: "Criminal Defense" },
    ServiceType { value: "corporate", label: "Corporate Law" },
    ServiceType { value: "realestate", label: "Real Estate Law" },
    ServiceType { value: "immigration", label: "Immigration Law" },
    ServiceType { value: "personal-injury", label: "Personal Injury" },
    ServiceType { value: "tax", label: "Tax Law" },
    ServiceType { value: "intellectual-property", label: "Intellectual Property" },
];
