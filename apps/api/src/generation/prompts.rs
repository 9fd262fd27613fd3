// Prompt templates for the campaign generation pipeline.
// Placeholders are `{name}` and are filled with `str::replace` by each pass.

// ────────────────────────────────────────────────────────────────────────────
// Insight pass
// ────────────────────────────────────────────────────────────────────────────

pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"### Cultural Tension Mapper + Insight Builder

You are a strategist working on a campaign in {year}. First name ONE cultural tension affecting the target audience at a macro level. Then write 3 sharp insights derived from that tension that can fuel creative ideas.

**Target Audience:** {audience}
**Brand:** {brand}
**Industry:** {industry}
**Campaign Objectives:** {objectives}
**Emotional Appeal to Tap Into:** {emotions}

#### Step 1: Cultural Tension
One sentence about something happening in the world (social, economic, digital or generational) that shapes this audience's worldview. Example:
- "We're more connected than ever, but lonelier than ever."

#### Step 2: 3 Creative Insights
Based on that tension, write 3 audience insights. Each must be specific and emotionally grounded, and show a contradiction, a behavior or an unmet need.

### Format:
{
  "tension": "Macro tension here",
  "insights": ["Insight 1", "Insight 2", "Insight 3"]
}"#;

// ────────────────────────────────────────────────────────────────────────────
// Campaign pass
// ────────────────────────────────────────────────────────────────────────────

pub const CAMPAIGN_PROMPT_TEMPLATE: &str = r#"### Generate a groundbreaking marketing campaign with the following:

{persona}

#### Brand & Strategy
- Brand: {brand}
- Industry: {industry}
- Target Audience: {audience}
- Personality: {personality}
- Differentiator: {differentiator}
- Market Trends: {trends}
- Emotional Appeal: {emotions}
{insights}
### Award-Winning Headline Patterns to Inspire Naming
- "The [Unexpected Mechanism] That [Human Outcome]"
- "We Didn't [Do X], We [Did Y Instead]"
- "Turning [Problem] Into [Cultural Power]"
- "When [Group] Meets [World/Context]"
- "The Campaign That [Media Reaction]"

### Creative Provocation
Ask yourself what would make people stop scrolling, what brands are afraid to say but should, and where the uncomfortable truth is.
Push for tension, contradiction or irony. The idea should spark instant conversation.

### Execution Spike Reminder
Your execution plan must include at least one brave or controversial move, a genre-defying medium, or a bold channel hack.
At least one execution must punch above the brief.

#### Campaign Format
- Objective: {objectives}
- Style: {style}
- Constraints: {constraints}

#### Award-Winning Inspiration
Use these real-world awarded campaigns for inspiration. Study their emotional appeal, cultural angle and structure, but do not copy:
{references}

### Response Requirements (in JSON format):
{
  "campaignName": "Bold Campaign Name",
  "keyMessage": "Sharp, emotional one-liner",
  "creativeStrategy": ["Tactic 1", "Tactic 2", "Tactic 3"],
  "executionPlan": ["Execution 1", "Execution 2", "Execution 3", "Execution 4", "Execution 5"],
  "viralHook": "What makes it spread",
  "consumerInteraction": "How people participate",
  "expectedOutcomes": ["Outcome 1", "Outcome 2", "Outcome 3", "Outcome 4"],
  "viralElement": "One specific viral moment",
  "prHeadline": "Witty PR headline used in press releases and earned media",
  "callToAction": "Clear audience prompt",
  "creativeInsights": ["Used Insight 1", "Used Insight 2"]
}

Your campaign should challenge norms and feel inevitable in hindsight. Don't just meet the brief, bend it into something iconic."#;

pub const INSIGHTS_BLOCK_TEMPLATE: &str = r#"
#### Creative Insights
These human truths should shape your concept:
{insights}
Use at least one insight. Ground your story in emotion.
"#;

/// Appended to the campaign prompt when the first draft scored as timid.
pub const BRAVERY_FEEDBACK_TEMPLATE: &str = r#"

### Bravery Feedback
Your previous draft "{campaign_name}" scored {score}/10 for creative bravery. It is too safe.
{suggestions}
Rewrite the campaign. Keep the brief, raise the stakes."#;

// ────────────────────────────────────────────────────────────────────────────
// Refinement passes
// ────────────────────────────────────────────────────────────────────────────

pub const CREATIVE_DIRECTOR_PROMPT_TEMPLATE: &str = r#"You are a Cannes Lions-winning Creative Director. Improve this campaign with:
- Sharper naming and messaging
- Heightened cultural tension
- Emotional storytelling hooks
- 1 disruptive element

Keep the same JSON structure and return the full improved campaign.

Campaign:
{campaign}"#;

pub const DISRUPTIVE_PROMPT_TEMPLATE: &str = r#"You're a disruptive creative director. Take this campaign and inject ONE creative twist that makes it impossible to ignore: a reversal, a provocation or a cultural hijack.

Only return the fields you change, using these keys: keyMessage, prHeadline, viralHook, viralElement, callToAction, consumerInteraction.

Campaign:
{campaign}"#;

pub const STORYTELLING_PROMPT_TEMPLATE: &str = r#"Write the script for a 2025 Cannes Lions case film voiceover about this campaign for {brand}.

Campaign name: {campaign_name}
Key message: {key_message}
Executions:
{executions}

150 to 200 words. Plain text only. Open with the human problem, reveal the idea, end on the result."#;

pub const NARRATIVE_ANCHOR_PROMPT_TEMPLATE: &str = r#"This campaign needs a human-centered anchor: one real person whose story carries the idea.

Campaign name: {campaign_name}
Key message: {key_message}
Current story:
{storytelling}

Write a first-person or close third-person moment of struggle, max 80 words.
Return JSON: { "narrative": "..." }"#;

// ────────────────────────────────────────────────────────────────────────────
// Evaluation pass
// ────────────────────────────────────────────────────────────────────────────

pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are reviewing a marketing campaign. Score it like a Cannes Lions juror: sharp, opinionated and honest.
Judge the creative bravery, the emotional power and the originality of the execution.
Do NOT reward safe or familiar formats, gimmicky tech without depth, or generic feel-good messaging.

-- CAMPAIGN TO EVALUATE --
Brand: {brand}
Industry: {industry}
{campaign}

-- SIMILAR REFERENCE CAMPAIGNS --
{references}

Return JSON, every score from 1 to 10:
{
  "insightSharpness": 0,
  "ideaOriginality": 0,
  "executionPotential": 0,
  "awardPotential": 0,
  "finalVerdict": "One bold, witty sentence that sums up your creative POV."
}"#;

// ────────────────────────────────────────────────────────────────────────────
// Cultural trends
// ────────────────────────────────────────────────────────────────────────────

pub const TREND_PROMPT_TEMPLATE: &str = r#"You're a sharp cultural strategist decoding emerging shifts in youth behavior.

Based on the following headlines, identify {count} cultural or behavioral trends that matter to youth audiences. Focus on shifts in thinking, behavior and identity.

Each trend must include:
- title: short, specific and original. Do not start with "Inside" or use generic formats like "The Rise of", "Trend", "Phenomenon" or "Revolution"
- description: a 1-2 sentence cultural insight based on observed behavior
- category: one of ["Belonging & Identity", "Digital Life", "Sustainability", "Mental Health", "Social Fads", "Finance", "Innovation"]
- platformTags: 2-3 platforms where this trend would surface (e.g. TikTok, Twitter, Reddit, Discord)

Headlines:
{headlines}

Return only a valid JSON array:
[
  {
    "title": "Sample Trend",
    "description": "Cultural or behavioral shift explained.",
    "category": "Digital Life",
    "platformTags": ["TikTok", "Twitter"]
  }
]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_carry_their_placeholders() {
        assert!(INSIGHT_PROMPT_TEMPLATE.contains("{audience}"));
        assert!(CAMPAIGN_PROMPT_TEMPLATE.contains("{references}"));
        assert!(CAMPAIGN_PROMPT_TEMPLATE.contains("{persona}"));
        assert!(BRAVERY_FEEDBACK_TEMPLATE.contains("{suggestions}"));
        assert!(CREATIVE_DIRECTOR_PROMPT_TEMPLATE.contains("{campaign}"));
        assert!(STORYTELLING_PROMPT_TEMPLATE.contains("{executions}"));
        assert!(EVALUATION_PROMPT_TEMPLATE.contains("{campaign}"));
        assert!(TREND_PROMPT_TEMPLATE.contains("{headlines}"));
        assert!(TREND_PROMPT_TEMPLATE.contains("{count}"));
    }

    #[test]
    fn test_pass_markers_are_distinct() {
        // Each pass must be identifiable from its prompt text alone.
        let markers = [
            (INSIGHT_PROMPT_TEMPLATE, "Cultural Tension Mapper"),
            (CAMPAIGN_PROMPT_TEMPLATE, "Generate a groundbreaking"),
            (CREATIVE_DIRECTOR_PROMPT_TEMPLATE, "Cannes Lions-winning"),
            (DISRUPTIVE_PROMPT_TEMPLATE, "disruptive creative director"),
            (STORYTELLING_PROMPT_TEMPLATE, "case film voiceover"),
            (NARRATIVE_ANCHOR_PROMPT_TEMPLATE, "human-centered anchor"),
            (EVALUATION_PROMPT_TEMPLATE, "Cannes Lions juror"),
            (TREND_PROMPT_TEMPLATE, "sharp cultural strategist"),
        ];
        for (i, (_, marker)) in markers.iter().enumerate() {
            for (j, (template, _)) in markers.iter().enumerate() {
                assert_eq!(template.contains(marker), i == j, "marker {marker:?}");
            }
        }
    }
}
