//! Model prompt construction for the semantic extractor

/// Builds the extraction prompt around a (possibly truncated) document text
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + OUTPUT_FORMAT_REMINDER.len() + self.text.len() + 64,
        );

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Input text:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters
///
/// Always cuts on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are an expert technical data extractor.
Analyze the following text from a product datasheet and extract the product specification.

1. Identify the product name.
2. Extract every technical characteristic listed (Frequency, Gain, VSWR, Dimensions, Weight, Mass, Connector, etc.) as label/value pairs.
3. Make sure "Weight" or "Mass" is extracted if present, with its value and unit exactly as written.

Copy values verbatim from the text. Do not convert units and do not invent values."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (a single JSON object, no additional text):
{
  "name": "Product Name",
  "characteristics": [
    {"label": "Frequency", "value": "2.4 GHz"},
    {"label": "Weight", "value": "50 g"}
  ]
}"#;
