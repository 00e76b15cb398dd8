//! Prompt templates for the text and image models.
//!
//! The uppercase labels in the text prompt are the anchors [`super::LabeledSectionParser`]
//! looks for; changing them here means changing the parser's label table too.

/// Style suffix used when the caller does not pick one.
pub const DEFAULT_IMAGE_STYLE: &str =
    "dreamlike, ethereal, surreal, vibrant colors, highly detailed, digital art";

const PROMPT_HEAD: &str = "\
You are an expert dream analyst who draws on psychology and symbolism. Interpret the dream below.

Instructions:
1. Give an overall interpretation of what the dream means.
2. Identify 3-5 key symbols from the dream and explain the meaning of each one.
3. Describe the emotional themes of the dream and what they reveal about the dreamer.
4. Offer practical, actionable advice based on the dream.

Dream:
\"\"\"
";

const PROMPT_TAIL: &str = "
\"\"\"

Respond using exactly this format, with each section label on its own line:

INTERPRETATION:
<overall interpretation>

SYMBOLS:
<symbol> | <meaning>
<symbol> | <meaning>
<symbol> | <meaning>

EMOTIONS:
<emotional themes>

ADVICE:
<actionable advice>
";

/// Builds the interpretation prompt. `dream_text` is embedded verbatim; callers reject empty
/// text before getting here.
pub fn build_prompt(dream_text: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEAD.len() + dream_text.len() + PROMPT_TAIL.len());
    prompt.push_str(PROMPT_HEAD);
    prompt.push_str(dream_text);
    prompt.push_str(PROMPT_TAIL);
    prompt
}

/// Cuts `s` to at most `max` chars, ending in `...` when cut. Char-boundary safe.
fn truncate_chars(s: &str, max: usize) -> String {
    const SUFFIX: &str = "...";
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= SUFFIX.len() {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - SUFFIX.len()).collect();
    out.push_str(SUFFIX);
    out
}

/// Short prompt for the image model: the description capped to `max_len` chars, then the
/// style (or [`DEFAULT_IMAGE_STYLE`]).
pub fn build_image_prompt(description: &str, style: Option<&str>, max_len: usize) -> String {
    let excerpt = truncate_chars(description.trim(), max_len);
    let style = style
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_IMAGE_STYLE);
    format!("{}, {}", excerpt, style)
}
