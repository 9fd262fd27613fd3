use tracing::info;

use crate::bravery::scorer::assess_campaign;
use crate::models::campaign::GeneratedCampaign;

/// Raw bravery score at or above which a campaign is left untouched.
pub const ENHANCE_THRESHOLD: f64 = 6.0;

const LOCATIONS: &[(&str, &str)] = &[
    ("tech", "Apple Store"),
    ("finance", "bank branch"),
    ("fashion", "luxury boutique"),
];
const DEFAULT_LOCATION: &str = "public square";

const AUTHORITIES: &[(&str, &str)] = &[
    ("tech", "Big Tech"),
    ("education", "school systems"),
    ("finance", "traditional banks"),
    ("food", "health regulators"),
    ("fashion", "beauty standards"),
    ("travel", "border control"),
];
const DEFAULT_AUTHORITY: &str = "the status quo";

fn lookup(table: &[(&str, &'static str)], value: &str) -> Option<&'static str> {
    let value = value.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| value.contains(keyword))
        .map(|(_, v)| *v)
}

/// Public-space location for a brand's intervention. Brand keywords win;
/// the industry is the fallback before a generic public square.
pub fn location_for(brand: &str, industry: &str) -> &'static str {
    lookup(LOCATIONS, brand)
        .or_else(|| lookup(LOCATIONS, industry))
        .unwrap_or(DEFAULT_LOCATION)
}

pub fn authority_for(industry: &str) -> &'static str {
    lookup(AUTHORITIES, industry).unwrap_or(DEFAULT_AUTHORITY)
}

/// Pushes a timid campaign towards the missing bravery categories.
///
/// Adds a public-space intervention when nothing physical happens and calls out
/// an authority in the key message when nothing institutional is challenged.
pub fn enhance_bravery(
    mut campaign: GeneratedCampaign,
    brand: &str,
    industry: &str,
) -> GeneratedCampaign {
    let assessment = assess_campaign(&campaign);
    if assessment.score >= ENHANCE_THRESHOLD {
        return campaign;
    }

    if !assessment.breakdown.physical_intervention {
        campaign.execution_plan.push(format!(
            "Stage a {} intervention in public space ({})",
            brand,
            location_for(brand, industry)
        ));
    }

    if !assessment.breakdown.institutional_challenge {
        campaign.key_message = format!(
            "{} This directly challenges {}",
            campaign.key_message.trim_end(),
            authority_for(industry)
        );
    }

    info!(
        "Bravery enhanced for {} (score was {:.1})",
        campaign.campaign_name, assessment.score
    );
    campaign
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::campaign::fixtures::campaign;

    #[test]
    fn test_timid_campaign_gets_both_enhancements() {
        let c = campaign("Soft", "Be kind.", &["Instagram filters"]);
        let enhanced = enhance_bravery(c, "Acme", "Finance");

        assert_eq!(
            enhanced.execution_plan.last().unwrap(),
            "Stage a Acme intervention in public space (bank branch)"
        );
        assert_eq!(
            enhanced.key_message,
            "Be kind. This directly challenges traditional banks"
        );
    }

    #[test]
    fn test_brave_campaign_untouched() {
        let c = campaign(
            "Loud",
            "The government hides the pay gap",
            &["Occupy the ministry lobby"],
        );
        let before = c.clone();
        assert_eq!(enhance_bravery(c, "Acme", "Finance"), before);
    }

    #[test]
    fn test_existing_physical_intervention_not_duplicated() {
        let c = campaign("Mid", "Rest matters", &["Occupy a rooftop overnight"]);
        let enhanced = enhance_bravery(c, "Acme", "Travel");
        assert_eq!(enhanced.execution_plan.len(), 1);
        assert!(enhanced.key_message.ends_with("border control"));
    }

    #[test]
    fn test_enhancement_lifts_score() {
        let c = campaign("Soft", "Be kind.", &[]);
        let before = assess_campaign(&c).score;
        let after = assess_campaign(&enhance_bravery(c, "Acme", "Retail")).score;
        assert!(after > before);
    }

    #[test]
    fn test_lookups_and_defaults() {
        assert_eq!(location_for("TechCorp", "Retail"), "Apple Store");
        assert_eq!(location_for("Acme", "Fashion"), "luxury boutique");
        assert_eq!(location_for("Acme", "Retail"), "public square");
        assert_eq!(authority_for("Fast Food"), "health regulators");
        assert_eq!(authority_for("Healthcare"), "the status quo");
    }
}
