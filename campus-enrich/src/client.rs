//! Chat-completion enrichment client.
//!
//! The request pins a system instruction that constrains output to JSON
//! and a low fixed temperature; the completion text itself is then parsed
//! as the strict three-field object. The upstream values are trusted
//! verbatim — no gazetteer check on country or continent.

use serde::{Deserialize, Serialize};

use crate::error::{request_err, EnrichError};
use crate::usage::Usage;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that provides geographic and phone \
number information. Always respond with valid JSON only.";

/// The geography triple returned for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub country: String,
    pub continent: String,
    pub phone_corrected: String,
}

impl Enrichment {
    /// Degraded triple used when the service cannot be reached or answers
    /// garbage: geography unknown, phone passed through unchanged.
    pub fn fallback(phone: &str) -> Self {
        Self {
            country: "Unknown".to_owned(),
            continent: "Unknown".to_owned(),
            phone_corrected: phone.to_owned(),
        }
    }
}

/// Seam the orchestrator enriches through.
pub trait Enricher {
    /// One blocking call for one record.
    fn enrich(&self, city: &str, phone: &str) -> Result<(Enrichment, Usage), EnrichError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`Enricher`] backed by a chat-completion REST endpoint.
#[derive(Debug, Clone)]
pub struct ChatEnricher {
    agent: ureq::Agent,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl ChatEnricher {
    /// `base_url` is the API root up to and including the version segment,
    /// e.g. `https://api.openai.com/v1`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            agent: ureq::agent(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            model: model.into(),
            temperature,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// User prompt embedding the record's city and raw phone value.
pub(crate) fn build_prompt(city: &str, phone: &str) -> String {
    format!(
        "Given the following information:\n\
         City: {city}\n\
         Phone: {phone}\n\
         \n\
         Please provide a JSON response with:\n\
         1. country: The country name for this city\n\
         2. continent: The continent name\n\
         3. phone_corrected: The phone number with proper country code \
         (if missing, add it based on the country)\n\
         \n\
         Format the response as valid JSON only, no additional text:\n\
         {{\n\
             \"country\": \"country name\",\n\
             \"continent\": \"continent name\",\n\
             \"phone_corrected\": \"phone with country code\"\n\
         }}"
    )
}

/// Parse the completion text as the strict three-field object.
pub(crate) fn parse_enrichment(content: &str) -> Result<Enrichment, EnrichError> {
    serde_json::from_str(content.trim()).map_err(|source| EnrichError::Schema {
        content: content.to_owned(),
        source,
    })
}

impl Enricher for ChatEnricher {
    fn enrich(&self, city: &str, phone: &str) -> Result<(Enrichment, Usage), EnrichError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_owned(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(city, phone),
                },
            ],
            temperature: self.temperature,
        };

        let url = self.completions_url();
        tracing::debug!("POST {url} (city={city:?})");
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request)
            .map_err(request_err)?;

        let parsed: ChatResponse = response
            .into_json()
            .map_err(|e| EnrichError::Body { source: e })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(EnrichError::MissingContent)?;

        let enrichment = parse_enrichment(&content)?;
        Ok((enrichment, parsed.usage.unwrap_or_default()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_city_and_phone() {
        let prompt = build_prompt("Nairobi", "0711 000 111");
        assert!(prompt.contains("City: Nairobi"));
        assert!(prompt.contains("Phone: 0711 000 111"));
        assert!(prompt.contains("phone_corrected"));
    }

    #[test]
    fn parses_strict_completion() {
        let content = r#"{"country":"Kenya","continent":"Africa","phone_corrected":"+254711000111"}"#;
        let enrichment = parse_enrichment(content).unwrap();
        assert_eq!(enrichment.country, "Kenya");
        assert_eq!(enrichment.continent, "Africa");
        assert_eq!(enrichment.phone_corrected, "+254711000111");
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let content = "\n  {\"country\":\"India\",\"continent\":\"Asia\",\"phone_corrected\":\"+91 90000 3355\"}  \n";
        assert!(parse_enrichment(content).is_ok());
    }

    #[test]
    fn prose_completion_is_a_schema_error() {
        let err = parse_enrichment("The country is Kenya.").unwrap_err();
        assert!(matches!(err, EnrichError::Schema { .. }), "got: {err}");
    }

    #[test]
    fn envelope_without_choices_is_missing_content() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[],"usage":{"total_tokens":5}}"#).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);
        assert!(content.is_none());
    }

    #[test]
    fn envelope_deserializes_with_usage() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{}"}}],
            "usage": {"prompt_tokens": 80, "completion_tokens": 20, "total_tokens": 100}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.usage.unwrap().total_tokens, 100);
        assert_eq!(parsed.choices.len(), 1);
    }

    #[test]
    fn request_serializes_model_and_temperature() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "system",
                content: "x".to_owned(),
            }],
            temperature: 0.3,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4o-mini\""));
        assert!(json.contains("\"temperature\":0.3"));
    }

    #[test]
    fn fallback_keeps_the_input_phone() {
        let fallback = Enrichment::fallback("0711-000-111");
        assert_eq!(fallback.country, "Unknown");
        assert_eq!(fallback.continent, "Unknown");
        assert_eq!(fallback.phone_corrected, "0711-000-111");
    }
}
