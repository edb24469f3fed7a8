use crate::error::Result;
use crate::models::embedding::EMBEDDING_DIM;
use anyhow::Context as _;
use reqwest::Client;

/// Wrapper over the embedding-model boundary: text in, 384-dimension vector
/// out.
#[derive(Clone)]
pub struct EmbedService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl EmbedService {
    pub fn new(api_key: String, base_url: String, model: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_texts(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| anyhow::anyhow!("embeddings response was empty").into())
    }

    pub async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        #[derive(serde::Serialize)]
        struct EmbReq<'a> {
            model: &'a str,
            input: &'a [String],
            dimensions: usize,
        }
        #[derive(serde::Deserialize)]
        struct EmbData {
            embedding: Vec<f32>,
        }
        #[derive(serde::Deserialize)]
        struct EmbResp {
            data: Vec<EmbData>,
        }

        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let body = EmbReq {
            model: &self.model,
            input: texts,
            dimensions: EMBEDDING_DIM,
        };
        let resp = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("embeddings request failed")?;

        let status = resp.status();
        let txt = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(anyhow::anyhow!("embeddings status {}: {}", status.as_u16(), txt).into());
        }
        let parsed: EmbResp = serde_json::from_str(&txt).context("embeddings parse failed")?;
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    pub fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
        let mut dot = 0f32;
        let mut na = 0f32;
        let mut nb = 0f32;
        for (x, y) in a.iter().zip(b.iter()) {
            dot += x * y;
            na += x * x;
            nb += y * y;
        }
        if na == 0.0 || nb == 0.0 {
            0.0
        } else {
            dot / (na.sqrt() * nb.sqrt())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_sim_of_identical_vectors_is_one() {
        let v = vec![0.5f32, 0.5, 0.1];
        assert!((EmbedService::cosine_sim(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_sim_of_orthogonal_vectors_is_zero() {
        assert_eq!(
            EmbedService::cosine_sim(&[1.0, 0.0], &[0.0, 1.0]),
            0.0
        );
    }

    #[test]
    fn cosine_sim_handles_zero_vector() {
        assert_eq!(EmbedService::cosine_sim(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
