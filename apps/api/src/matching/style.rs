//! Style classification: scores how strongly a catalog entry's strategy and key
//! message read like the requested campaign style.
//!
//! Each style owns a family of lexical cues. The number of distinct cues found
//! in the text maps onto a 0–10 score through fixed thresholds:
//!
//! | distinct cue hits | score |
//! |-------------------|-------|
//! | 0                 | 0     |
//! | 1                 | 4     |
//! | 2                 | 7     |
//! | 3 or more         | 10    |

use crate::models::brief::CampaignStyle;

pub const STYLE_SCORE_ONE_CUE: u32 = 4;
pub const STYLE_SCORE_TWO_CUES: u32 = 7;
pub const STYLE_SCORE_MAX: u32 = 10;

/// Lexical cue family for a style. Matched as lowercase substrings.
pub fn style_cues(style: CampaignStyle) -> &'static [&'static str] {
    match style {
        CampaignStyle::Digital => &["digital", "online", "website", "app", "interactive"],
        CampaignStyle::Experiential => {
            &["experience", "immersive", "installation", "pop-up", "physical", "touring"]
        }
        CampaignStyle::Social => &["social", "share", "viral", "hashtag", "tiktok", "instagram"],
        CampaignStyle::Influencer => &["influencer", "creator", "celebrity", "athlete", "ambassador"],
        CampaignStyle::Guerrilla => {
            &["guerrilla", "overnight", "unexpected", "hijack", "hack", "street", "ambush"]
        }
        CampaignStyle::Ugc => &["user", "crowdsourc", "submitted", "participat", "everyday", "photos"],
        CampaignStyle::BrandActivism => {
            &["activism", "protest", "inequality", "policy", "law", "rights", "stance", "tax"]
        }
        CampaignStyle::BrandedEntertainment => {
            &["film", "documentary", "series", "story", "episode", "entertainment"]
        }
        CampaignStyle::RetailActivation => {
            &["store", "retail", "checkout", "in-store", "pop-up", "shop"]
        }
        CampaignStyle::ProductPlacement => &["placement", "integrat", "show", "tv", "game"],
        CampaignStyle::DataPersonalization => {
            &["data", "personali", "tailored", "algorithm", "geofenc"]
        }
        CampaignStyle::RealTime => &["real-time", "live", "reactive", "trending", "news"],
        CampaignStyle::EventBased => &["event", "concert", "festival", "match", "race", "tour"],
        CampaignStyle::OohAmbient => {
            &["billboard", "ooh", "outdoor", "sculpture", "statue", "mural", "ambient"]
        }
        CampaignStyle::AiGenerated => &["ai", "artificial", "generated", "machine", "synthetic"],
        CampaignStyle::CoCreation => {
            &["co-creat", "collab", "partner", "artist", "designer", "together"]
        }
        CampaignStyle::StuntMarketing | CampaignStyle::Stunt => {
            &["stunt", "overnight", "shock", "dramati", "one-day", "spectacle"]
        }
        CampaignStyle::ArVr => &["ar", "vr", "augmented", "virtual", "3d", "scan"],
        CampaignStyle::Performance => {
            &["download", "conversion", "sales", "roi", "subscription", "sold"]
        }
        CampaignStyle::LoyaltyCommunity => {
            &["community", "loyal", "member", "exclusive", "club", "belong"]
        }
    }
}

/// Scores already-lowercased campaign text (`strategy + " " + keyMessage`) against a style.
pub fn score_campaign_style(campaign_text: &str, style: CampaignStyle) -> u32 {
    let hits = style_cues(style)
        .iter()
        .filter(|cue| contains_cue(campaign_text, cue))
        .count();

    match hits {
        0 => 0,
        1 => STYLE_SCORE_ONE_CUE,
        2 => STYLE_SCORE_TWO_CUES,
        _ => STYLE_SCORE_MAX,
    }
}

/// Short cues (≤ 3 chars, e.g. "ar", "ai", "tv") only count as whole words;
/// longer cues match anywhere so stems like "personali" work.
fn contains_cue(text: &str, cue: &str) -> bool {
    if cue.len() > 3 {
        return text.contains(cue);
    }
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == cue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cues_scores_zero() {
        assert_eq!(
            score_campaign_style("a quiet print ad about savings", CampaignStyle::Guerrilla),
            0
        );
    }

    #[test]
    fn test_single_cue_scores_four() {
        assert_eq!(
            score_campaign_style("an unexpected gesture", CampaignStyle::Guerrilla),
            STYLE_SCORE_ONE_CUE
        );
    }

    #[test]
    fn test_two_cues_score_seven() {
        assert_eq!(
            score_campaign_style("an overnight street takeover", CampaignStyle::Guerrilla),
            STYLE_SCORE_TWO_CUES
        );
    }

    #[test]
    fn test_three_or_more_cues_cap_at_ten() {
        let text = "hack the city overnight with an unexpected street ambush";
        assert_eq!(
            score_campaign_style(text, CampaignStyle::Guerrilla),
            STYLE_SCORE_MAX
        );
    }

    #[test]
    fn test_short_cues_require_whole_words() {
        // "ar" must not match inside "car" or "share"
        assert_eq!(
            score_campaign_style("share the car", CampaignStyle::ArVr),
            0
        );
        assert_eq!(
            score_campaign_style("crowdsourced ar scanning", CampaignStyle::ArVr),
            STYLE_SCORE_TWO_CUES
        );
    }

    #[test]
    fn test_stunt_aliases_share_cues() {
        assert_eq!(
            style_cues(CampaignStyle::Stunt),
            style_cues(CampaignStyle::StuntMarketing)
        );
    }
}
