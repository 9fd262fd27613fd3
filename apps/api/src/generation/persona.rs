//! Strategist personas: who "writes" the campaign.

use crate::models::brief::{Brief, Persona};

/// Picks a persona from the brief's industry, emotions and objectives.
///
/// Rules, first match wins:
/// 1. tech or AI industry → tech innovator
/// 2. rebellion / urgency emotions, or a "break rules" objective → unfiltered director
/// 3. movement / culture objectives, or belonging → culture hacker
/// 4. conversion / data objectives, or trust → strategic planner
/// 5. otherwise unfiltered director
pub fn infer_persona(brief: &Brief) -> Persona {
    let objectives = brief.objectives.join(" ").to_lowercase();
    let emotion = brief.emotional_appeal.join(" ").to_lowercase();
    let industry = brief.industry.to_lowercase();

    let industry_is_tech = industry.contains("tech")
        || industry
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == "ai");

    if industry_is_tech {
        return Persona::TechInnovator;
    }
    if emotion.contains("rebellion") || emotion.contains("urgency") || objectives.contains("break rules")
    {
        return Persona::UnfilteredDirector;
    }
    if objectives.contains("movement") || objectives.contains("culture") || emotion.contains("belonging")
    {
        return Persona::CultureHacker;
    }
    if objectives.contains("conversion") || objectives.contains("data") || emotion.contains("trust") {
        return Persona::StrategicPlanner;
    }
    Persona::UnfilteredDirector
}

/// The persona requested in the brief, or the inferred one.
pub fn resolve_persona(brief: &Brief) -> Persona {
    brief.persona.unwrap_or_else(|| infer_persona(brief))
}

pub fn persona_instructions(persona: Persona) -> &'static str {
    match persona {
        Persona::UnfilteredDirector => {
            "### Strategist Persona: Unfiltered Creative Director
As an award-winning creative director, your job is not to play it safe.
- Avoid cliché tech gimmicks like \"AI influencers\" or \"AR filters\" unless used subversively.
- Start from real human behavior and surprising insights.
- Challenge the brief if it's boring and bend it into something unforgettable.
- Channel emotion, tension, chaos, humor, rebellion. Anything but mediocrity.
- If the idea could have been done five years ago, it's dead on arrival."
        }
        Persona::StrategicPlanner => {
            "### Strategist Persona: Strategic Planner
As a meticulous strategic planner, your job is to build campaigns on data-driven insight.
- Start with audience research and behavioral economics principles.
- Focus on measurable outcomes and clear customer journeys.
- Every creative element must serve a strategic purpose.
- Map precise touchpoints and conversion paths.
- Balance emotional appeal with rational drivers of behavior."
        }
        Persona::CultureHacker => {
            "### Strategist Persona: Culture Hacker
As a culture hacker, your job is to turn brands into cultural phenomena.
- Spot emerging cultural tensions before they hit the mainstream.
- Subvert expectations and start genuine conversation.
- Use internet phenomena, creators and community dynamics.
- Make ideas that feel more like movements than campaigns.
- Favor participation over passive consumption."
        }
        Persona::TechInnovator => {
            "### Strategist Persona: Tech Innovator
As a tech innovator, your job is to use emerging technology to solve brand problems.
- Focus on real utility, not gimmicks.
- Use technology to enhance human experiences.
- Consider how AI, AR, connected devices or data visualization can apply.
- Create memorable firsts that demonstrate technological leadership.
- Balance innovation with accessibility and practical implementation."
        }
    }
}
