use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub url: Option<String>,
}

impl Asset {
    pub fn url(asset: &Option<Asset>) -> Option<&str> {
        asset
            .as_ref()
            .and_then(|a| a.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    pub heading: Option<String>,
    pub subtitle: Option<String>,
    pub primary_cta_text: Option<String>,
    pub primary_cta_link: Option<String>,
    pub secondary_cta_text: Option<String>,
    pub secondary_cta_link: Option<String>,
    pub background_image: Option<Asset>,
}

/// 社會證明與成果區共用的數字統計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatValue {
    pub value: Option<f64>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhyStagingSection {
    pub eyebrow: Option<String>,
    pub heading: Option<String>,
    pub paragraphs: Option<Vec<String>>,
    pub bullet_points: Option<Vec<String>>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub image: Option<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub label: Option<String>,
    pub before_image: Option<Asset>,
    pub after_image: Option<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsSection {
    pub eyebrow: Option<String>,
    pub heading: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HowItWorksStep {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub quote: Option<String>,
    pub author_name: Option<String>,
    pub author_role: Option<String>,
    pub stars: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutSection {
    pub eyebrow: Option<String>,
    pub heading: Option<String>,
    pub paragraphs: Option<Vec<String>>,
    pub credentials: Option<Vec<String>>,
    pub image: Option<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub region: Option<String>,
    pub areas: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub eyebrow: Option<String>,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub pinterest_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: Option<String>,
    pub tagline: Option<String>,
    pub footer_description: Option<String>,
    pub form_response_note: Option<String>,
}

/// 聚合查詢的 `data` 欄位。缺少的集合為 `None`，單例集合仍是單元素列表。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub hero_sections: Option<Vec<HeroSection>>,
    pub social_proof_stats: Option<Vec<StatValue>>,
    pub why_staging_sections: Option<Vec<WhyStagingSection>>,
    pub services: Option<Vec<Service>>,
    pub portfolio_items: Option<Vec<PortfolioItem>>,
    pub results_sections: Option<Vec<ResultsSection>>,
    pub result_stats: Option<Vec<StatValue>>,
    pub how_it_works_steps: Option<Vec<HowItWorksStep>>,
    pub testimonials: Option<Vec<Testimonial>>,
    pub about_sections: Option<Vec<AboutSection>>,
    pub service_areas: Option<Vec<ServiceArea>>,
    pub faqs: Option<Vec<Faq>>,
    pub contact_infos: Option<Vec<ContactInfo>>,
    pub site_settings_entries: Option<Vec<SiteSettings>>,
}

fn first<T>(list: &Option<Vec<T>>) -> Option<&T> {
    list.as_ref().and_then(|items| items.first())
}

fn decode_collection<T: DeserializeOwned>(
    data: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<Vec<T>> {
    match data.remove(key)? {
        serde_json::Value::Null => None,
        value => match serde_json::from_value(value) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!("⚠️ Skipping malformed collection {}: {}", key, e);
                None
            }
        },
    }
}

impl SiteContent {
    pub fn from_data(data: serde_json::Map<String, serde_json::Value>) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::Value::Object(data))
    }

    /// Decodes each collection on its own. A collection that fails to decode is
    /// logged and left as `None`, so the other sections still hydrate.
    pub fn from_data_lenient(mut data: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            hero_sections: decode_collection(&mut data, "heroSections"),
            social_proof_stats: decode_collection(&mut data, "socialProofStats"),
            why_staging_sections: decode_collection(&mut data, "whyStagingSections"),
            services: decode_collection(&mut data, "services"),
            portfolio_items: decode_collection(&mut data, "portfolioItems"),
            results_sections: decode_collection(&mut data, "resultsSections"),
            result_stats: decode_collection(&mut data, "resultStats"),
            how_it_works_steps: decode_collection(&mut data, "howItWorksSteps"),
            testimonials: decode_collection(&mut data, "testimonials"),
            about_sections: decode_collection(&mut data, "aboutSections"),
            service_areas: decode_collection(&mut data, "serviceAreas"),
            faqs: decode_collection(&mut data, "faqs"),
            contact_infos: decode_collection(&mut data, "contactInfos"),
            site_settings_entries: decode_collection(&mut data, "siteSettingsEntries"),
        }
    }

    pub fn hero(&self) -> Option<&HeroSection> {
        first(&self.hero_sections)
    }

    pub fn why_staging(&self) -> Option<&WhyStagingSection> {
        first(&self.why_staging_sections)
    }

    pub fn results(&self) -> Option<&ResultsSection> {
        first(&self.results_sections)
    }

    pub fn about(&self) -> Option<&AboutSection> {
        first(&self.about_sections)
    }

    pub fn contact(&self) -> Option<&ContactInfo> {
        first(&self.contact_infos)
    }

    pub fn site_settings(&self) -> Option<&SiteSettings> {
        first(&self.site_settings_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_collections_decode_as_none() {
        let data = json!({
            "faqs": [{"question": "Q1", "answer": "A1"}],
            "heroSections": []
        });
        let serde_json::Value::Object(map) = data else {
            unreachable!()
        };

        let content = SiteContent::from_data(map).unwrap();
        assert!(content.testimonials.is_none());
        assert_eq!(content.faqs.as_ref().unwrap().len(), 1);
        assert!(content.hero().is_none());
    }

    #[test]
    fn test_null_fields_decode_as_none() {
        let hero: HeroSection = serde_json::from_value(json!({
            "heading": "Sell Faster",
            "subtitle": null,
            "backgroundImage": null
        }))
        .unwrap();

        assert_eq!(hero.heading.as_deref(), Some("Sell Faster"));
        assert!(hero.subtitle.is_none());
        assert!(Asset::url(&hero.background_image).is_none());
    }

    #[test]
    fn test_malformed_collection_is_skipped_without_dropping_others() {
        let data = json!({
            "testimonials": [{"quote": "Great", "authorName": "Ann", "stars": -1}],
            "faqs": [{"question": "Q1", "answer": "A1"}],
            "contactInfos": null
        });
        let serde_json::Value::Object(map) = data else {
            unreachable!()
        };

        assert!(SiteContent::from_data(map.clone()).is_err());

        let content = SiteContent::from_data_lenient(map);
        assert!(content.testimonials.is_none());
        assert!(content.contact().is_none());
        assert_eq!(content.faqs.as_ref().unwrap()[0].question.as_deref(), Some("Q1"));
    }
}
