use crate::admin::escape_literal;
use crate::core::client::interpret_response;
use crate::domain::ports::GraphqlTransport;
use crate::utils::error::{CmsError, Result};
use serde_json::{Map, Value};
use std::time::Duration;

pub const MIGRATION_MAX_ATTEMPTS: u32 = 15;
pub const MIGRATION_PAUSE: Duration = Duration::from_millis(4000);
pub const CONNECTION_TEST: &str = "{ viewer { __typename } }";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    StringList,
    Int,
    Asset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub api_id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDef {
    pub api_id: &'static str,
    pub api_id_plural: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldDef],
}

const fn field(
    api_id: &'static str,
    display_name: &'static str,
    description: &'static str,
    field_type: FieldType,
    required: bool,
) -> FieldDef {
    FieldDef {
        api_id,
        display_name,
        description,
        field_type,
        required,
    }
}

use FieldType::{Asset, Int, String as Str, StringList};

/// 網站的 14 個內容模型
pub const SCHEMA: &[ModelDef] = &[
    ModelDef {
        api_id: "HeroSection",
        api_id_plural: "HeroSections",
        display_name: "Hero Section",
        description: "Main hero banner",
        fields: &[
            field("heading", "Heading", "Main hero headline", Str, true),
            field("subtitle", "Subtitle", "Subheading text", Str, false),
            field("primaryCtaText", "Primary Button Text", "", Str, false),
            field("primaryCtaLink", "Primary Button Link", "", Str, false),
            field("secondaryCtaText", "Secondary Button Text", "", Str, false),
            field("secondaryCtaLink", "Secondary Button Link", "", Str, false),
            field("backgroundImage", "Background Image", "Hero background photo", Asset, false),
        ],
    },
    ModelDef {
        api_id: "SocialProofStat",
        api_id_plural: "SocialProofStats",
        display_name: "Social Proof Stat",
        description: "Stats shown in the social proof bar",
        fields: &[
            field("value", "Number Value", "The numeric value", Int, true),
            field("prefix", "Prefix", "Text before the number", Str, false),
            field("suffix", "Suffix", "Text after the number", Str, false),
            field("label", "Label", "Description below the number", Str, true),
            field("order", "Display Order", "Order of appearance", Int, false),
        ],
    },
    ModelDef {
        api_id: "WhyStagingSection",
        api_id_plural: "WhyStagingSections",
        display_name: "Why Staging Section",
        description: "The \"Why Staging Matters\" section",
        fields: &[
            field("eyebrow", "Eyebrow Text", "Small text above heading", Str, false),
            field("heading", "Heading", "", Str, true),
            field("paragraphs", "Paragraphs", "Body text paragraphs", StringList, false),
            field("bulletPoints", "Bullet Points", "Checkmark bullet points", StringList, false),
            field("ctaText", "CTA Text", "Link text at the bottom", Str, false),
            field("ctaLink", "CTA Link", "Link URL", Str, false),
            field("image", "Section Image", "Image beside the text", Asset, false),
        ],
    },
    ModelDef {
        api_id: "Service",
        api_id_plural: "Services",
        display_name: "Service",
        description: "Individual service offerings",
        fields: &[
            field("title", "Service Title", "", Str, true),
            field("description", "Description", "Short description", Str, true),
            field("image", "Service Image", "", Asset, false),
            field("order", "Display Order", "", Int, false),
        ],
    },
    ModelDef {
        api_id: "PortfolioItem",
        api_id_plural: "PortfolioItems",
        display_name: "Portfolio Item",
        description: "Before/after portfolio comparisons",
        fields: &[
            field("label", "Project Label", "e.g. \"Yorkville Condo, Living Room\"", Str, true),
            field("beforeImage", "Before Image", "", Asset, false),
            field("afterImage", "After Image", "", Asset, false),
            field("order", "Display Order", "", Int, false),
        ],
    },
    ModelDef {
        api_id: "ResultsSection",
        api_id_plural: "ResultsSections",
        display_name: "Results Section",
        description: "The \"Numbers Don't Lie\" section",
        fields: &[
            field("eyebrow", "Eyebrow Text", "", Str, false),
            field("heading", "Heading", "", Str, true),
        ],
    },
    ModelDef {
        api_id: "ResultStat",
        api_id_plural: "ResultStats",
        display_name: "Result Stat",
        description: "Individual stat in the Results section",
        fields: &[
            field("value", "Number Value", "", Int, true),
            field("prefix", "Prefix", "", Str, false),
            field("suffix", "Suffix", "", Str, false),
            field("label", "Label", "", Str, true),
            field("description", "Description", "Additional context", Str, false),
            field("order", "Display Order", "", Int, false),
        ],
    },
    ModelDef {
        api_id: "HowItWorksStep",
        api_id_plural: "HowItWorksSteps",
        display_name: "How It Works Step",
        description: "Steps in the \"How It Works\" section",
        fields: &[
            field("title", "Step Title", "", Str, true),
            field("description", "Step Description", "", Str, true),
            field("order", "Step Number", "1, 2, 3, or 4", Int, true),
        ],
    },
    ModelDef {
        api_id: "Testimonial",
        api_id_plural: "Testimonials",
        display_name: "Testimonial",
        description: "Client testimonials",
        fields: &[
            field("quote", "Quote", "The testimonial text", Str, true),
            field("authorName", "Author Name", "", Str, true),
            field("authorRole", "Author Role", "", Str, true),
            field("stars", "Star Rating", "Rating out of 5", Int, false),
            field("order", "Display Order", "", Int, false),
        ],
    },
    ModelDef {
        api_id: "AboutSection",
        api_id_plural: "AboutSections",
        display_name: "About Section",
        description: "The About / Team section",
        fields: &[
            field("eyebrow", "Eyebrow Text", "", Str, false),
            field("heading", "Heading", "", Str, true),
            field("paragraphs", "Paragraphs", "Body paragraphs", StringList, false),
            field("credentials", "Credentials", "List of credentials", StringList, false),
            field("image", "Team Photo", "", Asset, false),
        ],
    },
    ModelDef {
        api_id: "ServiceArea",
        api_id_plural: "ServiceAreas",
        display_name: "Service Area",
        description: "Geographic regions served",
        fields: &[
            field("region", "Region Name", "e.g. \"Toronto\"", Str, true),
            field("areas", "Areas", "Neighborhoods in this region", StringList, false),
            field("order", "Display Order", "", Int, false),
        ],
    },
    ModelDef {
        api_id: "Faq",
        api_id_plural: "Faqs",
        display_name: "FAQ",
        description: "Frequently Asked Questions",
        fields: &[
            field("question", "Question", "", Str, true),
            field("answer", "Answer", "", Str, true),
            field("order", "Display Order", "", Int, false),
        ],
    },
    ModelDef {
        api_id: "ContactInfo",
        api_id_plural: "ContactInfos",
        display_name: "Contact Info",
        description: "Contact section content",
        fields: &[
            field("eyebrow", "Eyebrow Text", "", Str, false),
            field("heading", "Heading", "", Str, false),
            field("description", "Description", "", Str, false),
            field("phone", "Phone Number", "", Str, false),
            field("email", "Email Address", "", Str, false),
            field("address", "Address", "", Str, false),
            field("instagramUrl", "Instagram URL", "", Str, false),
            field("facebookUrl", "Facebook URL", "", Str, false),
            field("pinterestUrl", "Pinterest URL", "", Str, false),
        ],
    },
    ModelDef {
        api_id: "SiteSettings",
        api_id_plural: "SiteSettingsEntries",
        display_name: "Site Settings",
        description: "Global site settings",
        fields: &[
            field("siteName", "Site Name", "", Str, false),
            field("tagline", "Tagline", "", Str, false),
            field("footerDescription", "Footer Description", "", Str, false),
            field("formResponseNote", "Form Response Note", "", Str, false),
        ],
    },
];

impl ModelDef {
    pub fn create_mutation(&self, environment_id: &str) -> String {
        format!(
            r#"mutation {{
  createModel(data: {{
    environmentId: "{}"
    apiId: "{}"
    apiIdPlural: "{}"
    displayName: "{}"
    description: "{}"
  }}) {{
    migration {{ id }}
  }}
}}"#,
            environment_id,
            self.api_id,
            self.api_id_plural,
            escape_literal(self.display_name),
            escape_literal(self.description)
        )
    }
}

impl FieldDef {
    pub fn create_mutation(&self, model_id: &str, asset_model_id: &str) -> String {
        let common = format!(
            r#"modelId: "{}"
    apiId: "{}"
    displayName: "{}"
    description: "{}""#,
            model_id,
            self.api_id,
            escape_literal(self.display_name),
            escape_literal(self.description)
        );

        match self.field_type {
            FieldType::Asset => format!(
                r#"mutation {{
  createRelationalField(data: {{
    {}
    type: ASSET
    isList: false
    isRequired: false
    reverseSide: {{ modelId: "{}" }}
  }}) {{
    migration {{ id }}
  }}
}}"#,
                common, asset_model_id
            ),
            simple => {
                let (kind, is_list) = match simple {
                    FieldType::Int => ("INT", false),
                    FieldType::StringList => ("STRING", true),
                    _ => ("STRING", false),
                };
                format!(
                    r#"mutation {{
  createSimpleField(data: {{
    {}
    type: {}
    isRequired: {}
    isUnique: false
    isList: {}
    isLocalized: false
  }}) {{
    migration {{ id }}
  }}
}}"#,
                    common, kind, self.required, is_list
                )
            }
        }
    }
}

pub fn model_id_query() -> &'static str {
    r#"{
  viewer {
    ... on TokenViewer {
      project {
        environment(name: "master") {
          contentModel {
            models { id apiId }
          }
        }
      }
    }
  }
}"#
}

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    Applied(Map<String, Value>),
    AlreadyExists,
}

/// Management API client. Unlike content fetches, schema mutations wait out
/// pending migrations rather than rate limits.
pub struct ManagementClient<T: GraphqlTransport> {
    transport: T,
    max_attempts: u32,
    pause: Duration,
}

impl<T: GraphqlTransport> ManagementClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_attempts: MIGRATION_MAX_ATTEMPTS,
            pause: MIGRATION_PAUSE,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub async fn query(&self, query: &str) -> Result<Map<String, Value>> {
        let response = self.transport.post(query).await?;
        interpret_response(&response)
    }

    pub async fn execute_migration(&self, mutation: &str) -> Result<MigrationOutcome> {
        for attempt in 1..=self.max_attempts {
            match self.query(mutation).await {
                Ok(data) => return Ok(MigrationOutcome::Applied(data)),
                Err(CmsError::GraphQl { messages }) if messages.contains("pending migration") => {
                    tracing::info!(
                        "⏳ Waiting for migration to complete (attempt {}/{})",
                        attempt,
                        self.max_attempts
                    );
                    tokio::time::sleep(self.pause).await;
                }
                Err(CmsError::GraphQl { messages })
                    if messages.contains("already exists") || messages.contains("duplicate") =>
                {
                    tracing::info!("⏭️ Already exists, skipping");
                    return Ok(MigrationOutcome::AlreadyExists);
                }
                Err(e) => return Err(e),
            }
        }

        Err(CmsError::MigrationTimeout {
            attempts: self.max_attempts,
        })
    }

    pub async fn model_id(&self, api_id: &str) -> Result<Option<String>> {
        let data = self.query(model_id_query()).await?;
        let models = data
            .get("viewer")
            .and_then(|v| v.pointer("/project/environment/contentModel/models"))
            .and_then(Value::as_array);

        Ok(models.and_then(|models| {
            models
                .iter()
                .find(|m| m.get("apiId").and_then(Value::as_str) == Some(api_id))
                .and_then(|m| m.get("id").and_then(Value::as_str))
                .map(str::to_string)
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub models_created: usize,
    pub models_existing: usize,
    pub models_skipped: Vec<String>,
    pub fields_created: usize,
    pub fields_existing: usize,
}

pub struct SchemaInstaller<T: GraphqlTransport> {
    client: ManagementClient<T>,
    environment_id: String,
    asset_model_id: String,
    settle: Duration,
    models: &'static [ModelDef],
}

impl<T: GraphqlTransport> SchemaInstaller<T> {
    pub fn new(
        client: ManagementClient<T>,
        environment_id: impl Into<String>,
        asset_model_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            environment_id: environment_id.into(),
            asset_model_id: asset_model_id.into(),
            settle: Duration::from_millis(3000),
            models: SCHEMA,
        }
    }

    pub fn with_settle_delay(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_models(mut self, models: &'static [ModelDef]) -> Self {
        self.models = models;
        self
    }

    pub async fn test_connection(&self) -> Result<()> {
        self.client.query(CONNECTION_TEST).await?;
        tracing::info!("🔗 Connected to Management API");
        Ok(())
    }

    pub async fn install(&self) -> Result<InstallReport> {
        self.test_connection().await?;

        let mut report = InstallReport::default();
        for model in self.models {
            tracing::info!("📦 Creating model: {}", model.display_name);
            match self
                .client
                .execute_migration(&model.create_mutation(&self.environment_id))
                .await?
            {
                MigrationOutcome::Applied(_) => report.models_created += 1,
                MigrationOutcome::AlreadyExists => report.models_existing += 1,
            }
            tokio::time::sleep(self.settle).await;

            let Some(model_id) = self.client.model_id(model.api_id).await? else {
                tracing::error!("❌ Could not find model id for {}, skipping fields", model.api_id);
                report.models_skipped.push(model.api_id.to_string());
                continue;
            };

            for field in model.fields {
                tracing::debug!("  Adding field: {} ({:?})", field.api_id, field.field_type);
                match self
                    .client
                    .execute_migration(&field.create_mutation(&model_id, &self.asset_model_id))
                    .await?
                {
                    MigrationOutcome::Applied(_) => report.fields_created += 1,
                    MigrationOutcome::AlreadyExists => report.fields_existing += 1,
                }
                tokio::time::sleep(self.settle).await;
            }
        }

        tracing::info!(
            "✅ Schema setup complete: {} models created, {} already existed",
            report.models_created,
            report.models_existing
        );
        Ok(report)
    }
}
