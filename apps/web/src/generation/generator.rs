//! Résumé generation: prompt → model → cleanup.
//!
//! Flow: format_resume_prompt → TextGenerator::generate (time-bounded) →
//!       clean_generated_text → cleaned résumé text.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::cleaner::clean_generated_text;
use crate::generation::prompts::format_resume_prompt;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::ResumeFields;

/// Anything that can turn a prompt into raw generated text.
///
/// The production implementation is [`LlmClient`]; tests swap in canned generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate_text(prompt, PLAIN_TEXT_SYSTEM).await
    }
}

/// Generates and cleans résumé text for the submitted fields.
///
/// The model call is abandoned after `timeout`; the request then fails with
/// `AppError::GenerationTimeout` instead of hanging.
pub async fn generate_resume_text(
    generator: &dyn TextGenerator,
    fields: &ResumeFields,
    timeout: Duration,
) -> Result<String, AppError> {
    let prompt = format_resume_prompt(fields);
    let started = Instant::now();

    let raw = match tokio::time::timeout(timeout, generator.generate(&prompt)).await {
        Ok(result) => result.map_err(|e| AppError::Llm(format!("Resume generation failed: {e}")))?,
        Err(_) => {
            warn!("Resume generation exceeded {}s", timeout.as_secs());
            return Err(AppError::GenerationTimeout(timeout.as_secs()));
        }
    };

    let cleaned = clean_generated_text(&raw);
    info!(
        "Resume generated in {}ms: raw_chars={}, cleaned_chars={}",
        started.elapsed().as_millis(),
        raw.chars().count(),
        cleaned.chars().count()
    );

    Ok(cleaned)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::sync::Mutex;

    /// Returns a fixed reply and remembers the last prompt it saw.
    pub(crate) struct CannedGenerator {
        reply: String,
        pub(crate) last_prompt: Mutex<Option<String>>,
    }

    impl CannedGenerator {
        pub(crate) fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    /// Never answers within any reasonable timeout.
    pub(crate) struct StalledGenerator;

    #[async_trait]
    impl TextGenerator for StalledGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    pub(crate) fn sample_fields() -> ResumeFields {
        ResumeFields {
            name: "Ada Lovelace".to_string(),
            experience: "Wrote the first published algorithm".to_string(),
            skills: "Mathematics, analysis".to_string(),
            education: "Tutored by Augustus De Morgan".to_string(),
            age: "36".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generation_output_is_cleaned() {
        let generator = CannedGenerator::new("Name:\nAda\n\n\nAda\n- Algorithms   \n- Algorithms\n");
        let text = generate_resume_text(&generator, &sample_fields(), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(text, "Name:\nAda\n- Algorithms");
    }

    #[tokio::test]
    async fn test_generation_sends_formatted_prompt() {
        let generator = CannedGenerator::new("ok");
        let fields = sample_fields();
        generate_resume_text(&generator, &fields, Duration::from_secs(5))
            .await
            .unwrap();
        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert_eq!(prompt, format_resume_prompt(&fields));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_times_out() {
        let result =
            generate_resume_text(&StalledGenerator, &sample_fields(), Duration::from_secs(2)).await;
        assert!(matches!(result, Err(AppError::GenerationTimeout(2))));
    }

    #[tokio::test]
    async fn test_generation_failure_maps_to_llm_error() {
        let result =
            generate_resume_text(&FailingGenerator, &sample_fields(), Duration::from_secs(5)).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
