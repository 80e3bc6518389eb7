use crate::models::NewProvider;

/// Sample providers used to seed an empty store
///
/// Three Salem firms within a few kilometers of each other, plus one each in
/// Chennai, Coimbatore and Tiruchirappalli, all well over 100km from Salem.
pub fn sample_providers() -> Vec<NewProvider> {
    vec![
        NewProvider {
            name: "Capital Law Associates".to_string(),
            services: labels(&["Family Law", "Corporate Law", "Real Estate Law"]),
            phone: "(0427) 255-6789".to_string(),
            email: "info@capitallawassociates.com".to_string(),
            website: Some("capitallawassociates.com".to_string()),
            address: "42 Anna Salai".to_string(),
            city: "Salem".to_string(),
            state: "Tamil Nadu".to_string(),
            postal_code: "636007".to_string(),
            latitude: 11.6528,
            longitude: 78.1585,
            description: "A premier legal firm specializing in corporate and family law with over 20 years of experience serving clients throughout Tamil Nadu.".to_string(),
            rating: Some(5.0),
            review_count: 38,
            years_experience: Some(22),
        },
        NewProvider {
            name: "Kumar & Associates".to_string(),
            services: labels(&["Family Law", "Divorce Proceedings", "Child Custody"]),
            phone: "(0427) 223-4567".to_string(),
            email: "contact@kumarassociates.com".to_string(),
            website: Some("kumarassociates.com".to_string()),
            address: "15 Gandhi Road".to_string(),
            city: "Salem".to_string(),
            state: "Tamil Nadu".to_string(),
            postal_code: "636008".to_string(),
            latitude: 11.6572,
            longitude: 78.1452,
            description: "Boutique law firm focused on divorce cases and family disputes with personalized client service approach.".to_string(),
            rating: Some(4.0),
            review_count: 24,
            years_experience: Some(15),
        },
        NewProvider {
            name: "Jayakumar Legal Solutions".to_string(),
            services: labels(&["Family Law", "Divorce Proceedings", "Property Division"]),
            phone: "(0427) 298-7654".to_string(),
            email: "info@jayakumarlegal.com".to_string(),
            website: Some("jayakumarlegal.com".to_string()),
            address: "78 Fairlands Road".to_string(),
            city: "Salem".to_string(),
            state: "Tamil Nadu".to_string(),
            postal_code: "636016".to_string(),
            latitude: 11.6712,
            longitude: 78.1392,
            description: "Trusted family law practice specialized in handling complex divorce cases and child custody matters with compassion.".to_string(),
            rating: Some(3.0),
            review_count: 15,
            years_experience: Some(8),
        },
        NewProvider {
            name: "Madras Legal Consultants".to_string(),
            services: labels(&["Criminal Defense", "Personal Injury", "Immigration Law"]),
            phone: "(0427) 321-8765".to_string(),
            email: "contact@madraslegal.com".to_string(),
            website: Some("madraslegal.com".to_string()),
            address: "25 Mount Road".to_string(),
            city: "Chennai".to_string(),
            state: "Tamil Nadu".to_string(),
            postal_code: "600002".to_string(),
            latitude: 13.0836,
            longitude: 80.2703,
            description: "Full-service legal firm with expertise in criminal defense and personal injury cases.".to_string(),
            rating: Some(4.2),
            review_count: 45,
            years_experience: Some(18),
        },
        NewProvider {
            name: "Coimbatore Law Group".to_string(),
            services: labels(&["Corporate Law", "Tax Law", "Intellectual Property"]),
            phone: "(0422) 432-9876".to_string(),
            email: "info@clgroup.com".to_string(),
            website: Some("clgroup.com".to_string()),
            address: "56 DP Road".to_string(),
            city: "Coimbatore".to_string(),
            state: "Tamil Nadu".to_string(),
            postal_code: "641004".to_string(),
            latitude: 11.0162,
            longitude: 76.9626,
            description: "Specialized in business law with a focus on tax management and intellectual property protection.".to_string(),
            rating: Some(4.7),
            review_count: 32,
            years_experience: Some(12),
        },
        NewProvider {
            name: "Tiruchirappalli Legal Advocates".to_string(),
            services: labels(&["Real Estate Law", "Family Law", "Corporate Law"]),
            phone: "(0431) 543-2198".to_string(),
            email: "contact@tla.com".to_string(),
            website: Some("tla.com".to_string()),
            address: "12 Cantonment Road".to_string(),
            city: "Tiruchirappalli".to_string(),
            state: "Tamil Nadu".to_string(),
            postal_code: "620001".to_string(),
            latitude: 10.7905,
            longitude: 78.7047,
            description: "Expert real estate legal team specializing in property disputes and land documentation issues.".to_string(),
            rating: Some(4.3),
            review_count: 28,
            years_experience: Some(16),
        },
    ]
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
