use crate::error::Result;
use crate::models::cv::ParsedCv;
use anyhow::Context as _;
use reqwest::Client;
use serde_json::Value as JsonValue;

const EXTRACTION_SYSTEM_PROMPT: &str = "You are an expert at parsing resumes and extracting \
structured information. Always return valid JSON.";

/// Wrapper over the LLM chat-completion boundary that turns free-text CV
/// content into a structured skill/experience/education record. Failures here
/// surface as a CV parse failure on the owning record, never as a fatal error.
#[derive(Clone)]
pub struct ExtractService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExtractService {
    pub fn new(api_key: String, base_url: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    pub async fn parse_resume(&self, resume_text: &str) -> Result<ParsedCv> {
        let user_prompt = format!(
            "Parse the following resume and return a JSON object with this exact shape:\n\
            {{\n\
              \"skills\": {{\"technical\": [\"...\"], \"soft\": [\"...\"]}},\n\
              \"experience\": [{{\"title\": \"...\", \"company\": \"...\", \"duration\": \"...\"}}],\n\
              \"education\": [{{\"degree\": \"...\", \"institution\": \"...\", \"year\": \"...\"}}],\n\
              \"certifications\": [\"...\"],\n\
              \"years_of_experience\": 0\n\
            }}\n\n\
            Resume text:\n{}",
            resume_text
        );

        let payload = serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": EXTRACTION_SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt}
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.3
        });

        let content = self.chat_completion(payload).await?;
        let parsed: ParsedCv =
            serde_json::from_str(strip_code_fences(&content)).context("resume parse failed")?;
        Ok(parsed)
    }

    /// Narrative summary of a candidate-to-role match, for the HR review view.
    pub async fn summarize_match(
        &self,
        parsed_cv: &ParsedCv,
        role_title: &str,
        role_description: &str,
        match_score: f64,
    ) -> Result<String> {
        let user_prompt = format!(
            "Candidate data:\n{}\n\nRole: {}\n{}\n\nMatch score: {:.1}/100\n\n\
            Write a 150-word summary for HR covering strengths, gaps and an overall \
            recommendation. Return JSON: {{\"summary\": \"...\"}}",
            serde_json::to_string_pretty(parsed_cv)?,
            role_title,
            role_description,
            match_score
        );

        let payload = serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "You are an expert HR analyst providing candidate assessments."},
                {"role": "user", "content": user_prompt}
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.5
        });

        let content = self.chat_completion(payload).await?;
        let value: JsonValue = serde_json::from_str(strip_code_fences(&content))
            .context("match summary parse failed")?;
        Ok(value
            .get("summary")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }

    async fn chat_completion(&self, payload: JsonValue) -> Result<String> {
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = resp.status();
        let txt = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(
                anyhow::anyhow!("chat completion status {}: {}", status.as_u16(), txt).into(),
            );
        }

        let parsed: JsonValue = serde_json::from_str(&txt).context("chat response parse failed")?;
        let content = parsed["choices"][0]["message"]["content"]
            .as_str()
            .context("chat response missing content")?;
        Ok(content.to_string())
    }
}

/// Models occasionally wrap JSON output in markdown fences despite the
/// response_format hint.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }

    #[test]
    fn parsed_cv_tolerates_missing_fields() {
        let parsed: ParsedCv = serde_json::from_str("{\"skills\":{\"technical\":[\"Rust\"]}}")
            .expect("lenient parse");
        assert_eq!(parsed.skills.technical, vec!["Rust"]);
        assert!(parsed.certifications.is_empty());
        assert!(parsed.years_of_experience.is_none());
    }
}
