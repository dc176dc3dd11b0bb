// Assessment content generation: yes/no/maybe questions, multiple-choice
// questions, the writing scenario and the final report.
// All model calls go through llm_client::GenerationClient; nothing here talks HTTP.

pub mod prompts;
pub mod questions;
pub mod report;
pub mod scenario;

use chrono::Utc;
use tracing::info;

use crate::errors::GenerationError;
use crate::generation::prompts::{
    build_mcq_prompt, build_report_prompt, build_scenario_prompt, build_yes_no_prompt,
};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PLAIN_TEXT_SYSTEM};
use crate::llm_client::GenerationClient;
use crate::locale::Language;
use crate::models::answers::AnswerSet;
use crate::models::profile::Profile;
use crate::models::question::{McqQuestion, YesNoQuestion};
use crate::models::report::Report;

/// Everything the report prompt needs, borrowed from the session.
pub struct AssessmentResponses<'a> {
    pub yes_no_questions: &'a [YesNoQuestion],
    pub mcq_questions: &'a [McqQuestion],
    pub scenario: &'a str,
    pub answers: &'a AnswerSet,
}

/// The four generators. Each one builds its prompt, makes one resilient
/// call and decodes the reply against its contract.
pub struct ContentGenerator {
    client: GenerationClient,
}

impl ContentGenerator {
    pub fn new(client: GenerationClient) -> Self {
        Self { client }
    }

    pub async fn yes_no_questions(
        &self,
        profile: &Profile,
        language: Language,
    ) -> Result<Vec<YesNoQuestion>, GenerationError> {
        let prompt = build_yes_no_prompt(profile, language);
        let raw = self.client.complete(&prompt, JSON_ONLY_SYSTEM).await?;
        let questions = questions::decode_yes_no(&raw)?;
        info!("Generated {} yes/no/maybe questions ({language})", questions.len());
        Ok(questions)
    }

    pub async fn mcq_questions(
        &self,
        profile: &Profile,
        language: Language,
    ) -> Result<Vec<McqQuestion>, GenerationError> {
        let prompt = build_mcq_prompt(profile, language);
        let raw = self.client.complete(&prompt, JSON_ONLY_SYSTEM).await?;
        let questions = questions::decode_mcq(&raw)?;
        info!("Generated {} multiple-choice questions ({language})", questions.len());
        Ok(questions)
    }

    pub async fn scenario(
        &self,
        profile: &Profile,
        language: Language,
    ) -> Result<String, GenerationError> {
        let prompt = build_scenario_prompt(profile, language);
        let raw = self.client.complete(&prompt, PLAIN_TEXT_SYSTEM).await?;
        let scenario = scenario::decode_scenario(&raw)?;
        info!("Generated writing scenario ({} chars)", scenario.chars().count());
        Ok(scenario)
    }

    pub async fn report(
        &self,
        profile: &Profile,
        responses: &AssessmentResponses<'_>,
        language: Language,
    ) -> Result<Report, GenerationError> {
        let prompt = build_report_prompt(profile, responses, language);
        let raw = self.client.complete(&prompt, JSON_ONLY_SYSTEM).await?;
        let report = report::decode_report(&raw, language, Utc::now())?;
        info!("Generated report: overall score {:.1}", report.overall_score);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::questions::fixtures::{mcq_reply, yes_no_reply};
    use super::report::fixtures::report_reply;
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::RetryPolicy;
    use crate::models::profile::sample_form;

    fn generator_with(script: Arc<ScriptedGenerator>) -> ContentGenerator {
        ContentGenerator::new(GenerationClient::without_probe(
            script,
            RetryPolicy::immediate(3),
        ))
    }

    fn profile() -> Profile {
        sample_form().validate(Language::En).unwrap()
    }

    #[tokio::test]
    async fn test_yes_no_generation_sends_personalized_prompt() {
        let script = Arc::new(ScriptedGenerator::default());
        script.push_ok(yes_no_reply(7));
        let generator = generator_with(script.clone());

        let questions = generator
            .yes_no_questions(&profile(), Language::En)
            .await
            .unwrap();

        assert_eq!(questions.len(), 7);
        let prompts = script.prompts();
        assert!(prompts[0].contains("Amina"));
        assert!(prompts[0].contains("in English language only"));
    }

    #[tokio::test]
    async fn test_contract_violation_is_not_retried() {
        let script = Arc::new(ScriptedGenerator::default());
        script.push_ok(yes_no_reply(6));
        script.push_ok(yes_no_reply(7));
        let generator = generator_with(script.clone());

        let result = generator.yes_no_questions(&profile(), Language::En).await;

        assert!(matches!(result, Err(GenerationError::Validation { .. })));
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test]
    async fn test_mcq_generation_uses_arabic_directive() {
        let script = Arc::new(ScriptedGenerator::default());
        script.push_ok(mcq_reply(7));
        let generator = generator_with(script.clone());

        let questions = generator.mcq_questions(&profile(), Language::Ar).await.unwrap();

        assert!(questions.iter().all(|q| q.options.len() == 4));
        assert!(script.prompts()[0].contains("in Arabic language only"));
    }

    #[tokio::test]
    async fn test_scenario_generation_retries_blank_reply() {
        let script = Arc::new(ScriptedGenerator::default());
        script.push_ok("   ".to_string());
        script.push_ok(scenario::sample_scenario());
        let generator = generator_with(script.clone());

        let text = generator.scenario(&profile(), Language::En).await.unwrap();

        assert_eq!(text, scenario::sample_scenario());
        assert_eq!(script.calls(), 2);
    }

    #[tokio::test]
    async fn test_report_generation_includes_answers_in_prompt() {
        let script = Arc::new(ScriptedGenerator::default());
        script.push_ok(report_reply(Language::En));
        let generator = generator_with(script.clone());

        let yes_no = questions::decode_yes_no(&yes_no_reply(7)).unwrap();
        let mcq = questions::decode_mcq(&mcq_reply(7)).unwrap();
        let mut answers = AnswerSet::default();
        answers.record_scenario("I would start with one-on-ones.".to_string());
        let scenario_text = scenario::sample_scenario();
        let responses = AssessmentResponses {
            yes_no_questions: &yes_no,
            mcq_questions: &mcq,
            scenario: &scenario_text,
            answers: &answers,
        };

        let report = generator
            .report(&profile(), &responses, Language::En)
            .await
            .unwrap();

        assert_eq!(report.pillars.len(), 6);
        assert!(script.prompts()[0].contains("I would start with one-on-ones."));
    }
}
