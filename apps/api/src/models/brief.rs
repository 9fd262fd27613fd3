use serde::{Deserialize, Serialize};

/// A structured campaign request. Immutable for the duration of matching and generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub brand: String,
    pub industry: String,
    #[serde(default)]
    pub target_audience: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub emotional_appeal: Vec<String>,
    #[serde(default)]
    pub campaign_style: Option<CampaignStyle>,
    #[serde(default)]
    pub persona: Option<Persona>,
    #[serde(default)]
    pub brand_personality: Option<String>,
    #[serde(default)]
    pub differentiator: Option<String>,
    #[serde(default)]
    pub cultural_insights: Option<String>,
    #[serde(default)]
    pub additional_constraints: Option<String>,
}

impl Brief {
    /// Rejects briefs that cannot drive matching or prompting at all.
    pub fn validate(&self) -> Result<(), String> {
        if self.brand.trim().is_empty() {
            return Err("brand cannot be empty".to_string());
        }
        if self.industry.trim().is_empty() {
            return Err("industry cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Requested execution style. Drives the style dimension of similarity scoring
/// and the style line of the generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampaignStyle {
    Digital,
    Experiential,
    Social,
    Influencer,
    Guerrilla,
    #[serde(alias = "UGC")]
    Ugc,
    BrandActivism,
    BrandedEntertainment,
    RetailActivation,
    ProductPlacement,
    DataPersonalization,
    RealTime,
    EventBased,
    OohAmbient,
    AiGenerated,
    CoCreation,
    StuntMarketing,
    ArVr,
    Performance,
    LoyaltyCommunity,
    Stunt,
}

impl CampaignStyle {
    /// Human-readable description used in the generation prompt.
    pub fn description(&self) -> &'static str {
        match self {
            CampaignStyle::Digital => {
                "Digital-first approach with highly shareable, interactive content"
            }
            CampaignStyle::Experiential => {
                "Experiential marketing focused on real-world brand immersion"
            }
            CampaignStyle::Social => "Social-led approach optimized for engagement and virality",
            CampaignStyle::Influencer => {
                "Influencer-driven marketing leveraging creators and personalities"
            }
            CampaignStyle::Guerrilla => "Unexpected, disruptive guerrilla marketing activation",
            CampaignStyle::Ugc => {
                "User-generated content strategy encouraging consumer participation"
            }
            CampaignStyle::BrandActivism => {
                "Brand activism focused on social or environmental causes"
            }
            CampaignStyle::BrandedEntertainment => {
                "Branded entertainment, storytelling through content"
            }
            CampaignStyle::RetailActivation => {
                "Retail activation with in-store experiences, pop-ups and interactive retail moments"
            }
            CampaignStyle::ProductPlacement => {
                "Product placement and integration, subtle advertising in media"
            }
            CampaignStyle::DataPersonalization => {
                "Data-driven personalization, tailored messaging based on user data"
            }
            CampaignStyle::RealTime => {
                "Real-time and reactive marketing capitalizing on trending topics"
            }
            CampaignStyle::EventBased => "Event-based, tied to concerts, sports or cultural events",
            CampaignStyle::OohAmbient => {
                "OOH and ambient: billboards, murals and unexpected placements"
            }
            CampaignStyle::AiGenerated => "Campaign created or enhanced by AI tools",
            CampaignStyle::CoCreation => {
                "Co-creation and collabs with artists, designers or other brands"
            }
            CampaignStyle::StuntMarketing => {
                "Stunt marketing, one-time bold activations to grab attention"
            }
            CampaignStyle::ArVr => {
                "Interactive digital experiences using augmented or virtual reality"
            }
            CampaignStyle::Performance => {
                "Performance-driven, focused on measurable conversions and ROI"
            }
            CampaignStyle::LoyaltyCommunity => {
                "Loyalty and community-building around exclusivity and brand affinity"
            }
            CampaignStyle::Stunt => "Attention-grabbing PR stunt designed to generate buzz",
        }
    }
}

/// Strategist persona that frames the generation prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    #[default]
    UnfilteredDirector,
    StrategicPlanner,
    CultureHacker,
    TechInnovator,
}
