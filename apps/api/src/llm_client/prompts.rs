// Shared prompt fragments. Each pipeline pass keeps its own prompt text next to
// it in generation/prompts.rs; only cross-cutting pieces live here.

/// System prompt for every pass that must answer in JSON.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON payload. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text passes such as storytelling.
pub const CREATIVE_SYSTEM: &str = "You are an award-winning creative director and copywriter. \
    Write vivid, specific, human prose. No bullet points, no headings.";

/// Appended to prompts whose output must be a JSON object.
pub const JSON_OBJECT_INSTRUCTION: &str =
    "Return ONLY a single JSON object. No markdown, no commentary.";
