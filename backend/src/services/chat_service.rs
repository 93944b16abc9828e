//! Conversation orchestration
//!
//! The dispatcher decides, per request, what reaches the completion
//! provider: detected language, mode persona, structured lookups from the
//! static tables, and the bounded recent window of session history.

use std::sync::Arc;

use crate::models::ChatMode;
use crate::utils::ApiResult;

use super::dataset::FoodEntry;
use super::disease_matcher::DiseaseMatcher;
use super::food_matcher::FoodMatcher;
use super::language::{Language, detect_language};
use super::llm::{ChatMessage, CompletionBackend, prompts};
use super::session::{SessionStore, Turn, recent_turns};

/// Disclaimer carried by every symptom-mode context block
pub const SYMPTOM_DISCLAIMER: &str =
    "This is not a medical diagnosis. Consult a professional.";

pub struct ChatService {
    backend: Arc<dyn CompletionBackend>,
    diseases: Arc<DiseaseMatcher>,
    foods: Arc<FoodMatcher>,
    sessions: SessionStore,
}

impl ChatService {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        diseases: Arc<DiseaseMatcher>,
        foods: Arc<FoodMatcher>,
    ) -> Self {
        Self { backend, diseases, foods, sessions: SessionStore::new() }
    }

    /// Produce the reply for one chat request.
    pub async fn respond(
        &self,
        session_id: &str,
        prompt: &str,
        mode: ChatMode,
    ) -> ApiResult<String> {
        let lang = detect_language(prompt);
        tracing::debug!(
            "Dispatching session={} mode={} lang={}",
            session_id,
            mode.as_str(),
            lang
        );

        match mode {
            ChatMode::Food => self.food_reply(prompt, lang).await,
            ChatMode::Explore => self.explore_reply(prompt, lang).await,
            ChatMode::Symptom => {
                let augmented = format!(
                    "{}\n{}",
                    self.symptom_context(prompt),
                    prompt
                );
                self.chat_reply(session_id, augmented, mode, lang).await
            }
            ChatMode::Qa | ChatMode::General => {
                self.chat_reply(session_id, prompt.to_string(), mode, lang).await
            }
        }
    }

    // --- FOOD MODE -------------------------------------------------------

    async fn food_reply(&self, user_input: &str, lang: Language) -> ApiResult<String> {
        let mut query = user_input.trim().to_string();

        // The nutrition table is keyed in English; fuzzy matching against
        // Arabic terms cannot work, so translate first.
        if lang == Language::Arabic {
            query = self.translate_food_name(&query).await?;
        }

        if let Some(entry) = self.foods.lookup(&query) {
            return Ok(format_nutrition(entry));
        }

        Ok(food_not_found_message(user_input, lang))
    }

    async fn translate_food_name(&self, text: &str) -> ApiResult<String> {
        let prompt = format!(
            "Translate the following food name to English:\n\n{}\n\nJust one word in English.",
            text.trim()
        );
        let reply = self
            .backend
            .complete(vec![
                ChatMessage::system(prompts::TRANSLATION_PROMPT),
                ChatMessage::user(prompt),
            ])
            .await?;
        Ok(reply.trim().to_lowercase())
    }

    // --- EXPLORE MODE ----------------------------------------------------

    async fn explore_reply(&self, user_input: &str, lang: Language) -> ApiResult<String> {
        let raw = user_input.trim();

        // Structured disease data is English-only; for other languages go
        // straight to the completion service with a localized request.
        if lang != Language::English {
            let prompt = format!(
                "Please provide a concise overview of '{}': definition, symptoms, \
                 treatments, and red flags. Respond in {}.",
                raw, lang
            );
            let reply = self
                .backend
                .complete(vec![
                    ChatMessage::system("You are a knowledgeable doctor assistant."),
                    ChatMessage::user(prompt),
                ])
                .await?;
            return Ok(reply);
        }

        if let Some(resolved) = self.diseases.resolve(raw) {
            return Ok(format!("**{}**\n\n{}", resolved.title, resolved.explanation));
        }

        let prompt = format!(
            "Provide a concise overview of '{}': definition, symptoms, treatments, \
             and red flags. Respond in English.",
            raw
        );
        let reply = self
            .backend
            .complete(vec![
                ChatMessage::system("You are a helpful medical assistant."),
                ChatMessage::user(prompt),
            ])
            .await?;
        Ok(reply)
    }

    // --- SYMPTOM MODE ----------------------------------------------------

    /// Disclaimer-bearing context block prepended to the user's raw input.
    fn symptom_context(&self, symptom_text: &str) -> String {
        let probable = self.diseases.probable_diseases(symptom_text);
        let lines: Vec<String> = probable
            .iter()
            .map(|d| {
                format!("**{} ({})**\n- {}", d.disease, d.probability.as_str(), d.reason)
            })
            .collect();

        format!(
            "Based on your symptoms, the most probable conditions are:\n\n{}\n\n{}",
            lines.join("\n"),
            SYMPTOM_DISCLAIMER
        )
    }

    // --- GENERIC CHAT PATH -----------------------------------------------

    async fn chat_reply(
        &self,
        session_id: &str,
        user_input: String,
        mode: ChatMode,
        lang: Language,
    ) -> ApiResult<String> {
        let system_prompt = format!("{}\nRespond in {}.", prompts::base_prompt(mode), lang);

        // Holding the session lock across the completion call serializes
        // requests to one session; other sessions proceed in parallel.
        let handle = self.sessions.session(session_id);
        let mut history = handle.lock().await;

        history.push(Turn::user(user_input));

        let mut messages = Vec::with_capacity(1 + super::session::RECENT_WINDOW);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(recent_turns(&history).iter().map(|turn| ChatMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        }));

        let reply = self.backend.complete(messages).await?;
        history.push(Turn::assistant(reply.clone()));
        Ok(reply)
    }
}

/// Fixed nutrition summary template, values per 100g
fn format_nutrition(entry: &FoodEntry) -> String {
    format!(
        "**{}** per 100g:\n\
         - Calories: {} kcal\n\
         - Fat: {} g (Sat: {} g)\n\
         - Carbs: {} g (Sugars: {} g)\n\
         - Protein: {} g\n\
         - Fiber: {} g",
        entry.name,
        entry.calories,
        entry.fat_g,
        entry.saturated_fat_g,
        entry.carbs_g,
        entry.sugars_g,
        entry.protein_g,
        entry.fiber_g
    )
}

/// Canned not-found message in the detected language. The map is total over
/// the supported languages; English is the default for anything else.
fn food_not_found_message(user_input: &str, lang: Language) -> String {
    match lang {
        Language::English => format!(
            "Sorry, I don't have data on '{}'. Try another food.",
            user_input
        ),
        Language::French => format!(
            "Désolé, pas de données sur '{}'. Essayez un autre aliment.",
            user_input
        ),
        Language::Arabic => {
            format!("عذرًا، لا توجد بيانات عن '{}'. حاول اسمًا آخر.", user_input)
        }
    }
}
