use std::path::Path;
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};

use crate::app_config::SpeechConfig;
use crate::errors::SynthesisError;
use crate::speech::SpeechSynthesizer;

/// Client for the Azure Cognitive Services text-to-speech REST API
#[derive(Debug)]
pub struct AzureSpeech {
    /// HTTP client for API requests
    client: Client,
    /// Subscription key
    api_key: String,
    /// Full synthesis endpoint URL
    endpoint: String,
    /// Voice name, e.g. `zh-CN-XiaochenMultilingualNeural`
    voice: String,
    /// SSML `xml:lang`
    language: String,
    /// Value of the `X-Microsoft-OutputFormat` header
    output_format: String,
}

impl AzureSpeech {
    /// Create a new client from the speech configuration
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.get_endpoint(),
            voice: config.voice.clone(),
            language: config.language.clone(),
            output_format: config.output_format.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request audio for `text` and return the encoded bytes
    pub async fn request_audio(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        if self.api_key.is_empty() {
            return Err(SynthesisError::Configuration("missing subscription key".to_string()));
        }

        let ssml = build_ssml(&self.voice, &self.language, text);
        debug!("Requesting {} characters of speech from {}", text.chars().count(), self.endpoint);

        let response = self.client.post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .header("User-Agent", "graded-reader")
            .body(ssml)
            .send()
            .await
            .map_err(|e| SynthesisError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Speech API error ({}): {}", status, error_text);
            return Err(classify_status(status, error_text));
        }

        let audio = response.bytes().await
            .map_err(|e| SynthesisError::Request(format!("Failed to read audio response: {}", e)))?;

        Ok(audio.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureSpeech {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<(), SynthesisError> {
        let audio = self.request_audio(text).await?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(output_path, &audio).await?;

        debug!("Wrote {} bytes of audio to {}", audio.len(), output_path.display());
        Ok(())
    }
}

/// Map a non-success HTTP status to a synthesis error
pub fn classify_status(status: StatusCode, message: String) -> SynthesisError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SynthesisError::Authentication(format!("{} (check the speech key and region)", message))
        }
        StatusCode::TOO_MANY_REQUESTS => SynthesisError::RateLimited(message),
        _ => SynthesisError::Api {
            status_code: status.as_u16(),
            message,
        },
    }
}

/// Wrap text in the SSML document expected by the service
pub fn build_ssml(voice: &str, language: &str, text: &str) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
        escape_xml(language),
        escape_xml(voice),
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
