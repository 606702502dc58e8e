use crate::utils::error::{CmsError, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// 最多一筆，以 `first: 1` 查詢
    Singleton,
    /// 以 `order` 欄位遞增排序
    OrderedList,
}

/// Fixed resize/crop applied by the CMS image service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTransform {
    pub width: u32,
    pub height: u32,
}

impl ImageTransform {
    pub const HERO_BACKGROUND: ImageTransform = ImageTransform { width: 1920, height: 1080 };
    pub const SECTION_PORTRAIT: ImageTransform = ImageTransform { width: 600, height: 750 };
    pub const SERVICE_CARD: ImageTransform = ImageTransform { width: 600, height: 400 };
    pub const PORTFOLIO: ImageTransform = ImageTransform { width: 800, height: 600 };

    pub fn url_selection(&self) -> String {
        format!(
            "url(transformation: {{image: {{resize: {{width: {}, height: {}, fit: crop}}}}}})",
            self.width, self.height
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    HeroSection,
    SocialProofStat,
    WhyStagingSection,
    Service,
    PortfolioItem,
    ResultsSection,
    ResultStat,
    HowItWorksStep,
    Testimonial,
    AboutSection,
    ServiceArea,
    Faq,
    ContactInfo,
    SiteSettings,
}

impl Collection {
    pub const ALL: [Collection; 14] = [
        Collection::HeroSection,
        Collection::SocialProofStat,
        Collection::WhyStagingSection,
        Collection::Service,
        Collection::PortfolioItem,
        Collection::ResultsSection,
        Collection::ResultStat,
        Collection::HowItWorksStep,
        Collection::Testimonial,
        Collection::AboutSection,
        Collection::ServiceArea,
        Collection::Faq,
        Collection::ContactInfo,
        Collection::SiteSettings,
    ];

    /// Top-level key in the query response and in the snapshot file.
    pub fn api_name(&self) -> &'static str {
        match self {
            Collection::HeroSection => "heroSections",
            Collection::SocialProofStat => "socialProofStats",
            Collection::WhyStagingSection => "whyStagingSections",
            Collection::Service => "services",
            Collection::PortfolioItem => "portfolioItems",
            Collection::ResultsSection => "resultsSections",
            Collection::ResultStat => "resultStats",
            Collection::HowItWorksStep => "howItWorksSteps",
            Collection::Testimonial => "testimonials",
            Collection::AboutSection => "aboutSections",
            Collection::ServiceArea => "serviceAreas",
            Collection::Faq => "faqs",
            Collection::ContactInfo => "contactInfos",
            Collection::SiteSettings => "siteSettingsEntries",
        }
    }

    pub fn kind(&self) -> CollectionKind {
        match self {
            Collection::HeroSection
            | Collection::WhyStagingSection
            | Collection::ResultsSection
            | Collection::AboutSection
            | Collection::ContactInfo
            | Collection::SiteSettings => CollectionKind::Singleton,
            _ => CollectionKind::OrderedList,
        }
    }

    pub fn scalar_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::HeroSection => &[
                "heading",
                "subtitle",
                "primaryCtaText",
                "primaryCtaLink",
                "secondaryCtaText",
                "secondaryCtaLink",
            ],
            Collection::SocialProofStat => &["value", "suffix", "prefix", "label"],
            Collection::WhyStagingSection => &[
                "eyebrow",
                "heading",
                "paragraphs",
                "bulletPoints",
                "ctaText",
                "ctaLink",
            ],
            Collection::Service => &["title", "description"],
            Collection::PortfolioItem => &["label"],
            Collection::ResultsSection => &["eyebrow", "heading"],
            Collection::ResultStat => &["value", "suffix", "prefix", "label", "description"],
            Collection::HowItWorksStep => &["title", "description"],
            Collection::Testimonial => &["quote", "authorName", "authorRole", "stars"],
            Collection::AboutSection => &["eyebrow", "heading", "paragraphs", "credentials"],
            Collection::ServiceArea => &["region", "areas"],
            Collection::Faq => &["question", "answer"],
            Collection::ContactInfo => &[
                "eyebrow",
                "heading",
                "description",
                "phone",
                "email",
                "address",
                "instagramUrl",
                "facebookUrl",
                "pinterestUrl",
            ],
            Collection::SiteSettings => &["siteName", "tagline", "footerDescription", "formResponseNote"],
        }
    }

    pub fn image_fields(&self) -> &'static [(&'static str, ImageTransform)] {
        match self {
            Collection::HeroSection => &[("backgroundImage", ImageTransform::HERO_BACKGROUND)],
            Collection::WhyStagingSection => &[("image", ImageTransform::SECTION_PORTRAIT)],
            Collection::Service => &[("image", ImageTransform::SERVICE_CARD)],
            Collection::PortfolioItem => &[
                ("beforeImage", ImageTransform::PORTFOLIO),
                ("afterImage", ImageTransform::PORTFOLIO),
            ],
            Collection::AboutSection => &[("image", ImageTransform::SECTION_PORTRAIT)],
            _ => &[],
        }
    }

    pub fn arguments(&self) -> &'static str {
        match self.kind() {
            CollectionKind::Singleton => "first: 1, stage: PUBLISHED",
            CollectionKind::OrderedList => "stage: PUBLISHED, orderBy: order_ASC",
        }
    }

    /// 單一集合的查詢片段，例如 `faqs(stage: PUBLISHED, orderBy: order_ASC) { question answer }`
    pub fn selection(&self) -> String {
        let mut fields: Vec<String> = self
            .scalar_fields()
            .iter()
            .map(|f| f.to_string())
            .collect();
        for (name, transform) in self.image_fields() {
            fields.push(format!("{} {{ {} }}", name, transform.url_selection()));
        }

        format!(
            "{}({}) {{ {} }}",
            self.api_name(),
            self.arguments(),
            fields.join(" ")
        )
    }
}

/// A self-contained query over a subset of collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryChunk {
    collections: Vec<Collection>,
}

impl QueryChunk {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self { collections }
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn document(&self) -> String {
        let selections: Vec<String> = self
            .collections
            .iter()
            .map(|c| format!("  {}", c.selection()))
            .collect();
        format!("{{\n{}\n}}", selections.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    chunks: Vec<QueryChunk>,
}

impl QueryPlan {
    pub fn new(chunks: Vec<QueryChunk>) -> Result<Self> {
        let plan = Self { chunks };
        plan.validate()?;
        Ok(plan)
    }

    /// 預設的六個分塊，每塊可被 CDN 獨立快取
    pub fn chunked() -> Self {
        use Collection::*;
        Self {
            chunks: vec![
                QueryChunk::new(vec![HeroSection, SocialProofStat]),
                QueryChunk::new(vec![WhyStagingSection, Service]),
                QueryChunk::new(vec![PortfolioItem, ResultsSection, ResultStat]),
                QueryChunk::new(vec![HowItWorksStep, Testimonial]),
                QueryChunk::new(vec![AboutSection, ServiceArea]),
                QueryChunk::new(vec![Faq, ContactInfo, SiteSettings]),
            ],
        }
    }

    /// Every collection in a single round trip.
    pub fn aggregate() -> Self {
        Self {
            chunks: vec![QueryChunk::new(Collection::ALL.to_vec())],
        }
    }

    pub fn chunks(&self) -> &[QueryChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for collection in self.chunks.iter().flat_map(|c| c.collections()) {
            if !seen.insert(*collection) {
                return Err(CmsError::DuplicateCollection {
                    name: collection.api_name().to_string(),
                });
            }
        }
        Ok(())
    }
}
