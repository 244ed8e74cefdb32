use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::{collections::BTreeSet, sync::Arc};

use crate::{
    constants::prompts::{render, ANSWER_VARIANTS_PROMPT},
    errors::AppResult,
    services::{
        completion_service::{CompletionClient, CompletionOptions},
        text_normalizer::normalize_answer,
    },
};

static JSON_ARRAY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[\s\S]*\]").expect("JSON_ARRAY_REGEX is a valid regex pattern"));

/// Candidate variants recovered from a model reply, tagged with how they
/// were recovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedVariants {
    /// Elements of a JSON array found in the reply.
    Structured(Vec<String>),
    /// One candidate per non-blank line of the reply.
    Fallback(Vec<String>),
}

impl ParsedVariants {
    pub fn into_candidates(self) -> Vec<String> {
        match self {
            ParsedVariants::Structured(v) | ParsedVariants::Fallback(v) => v,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedVariants::Structured(_))
    }
}

fn json_element_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a free-text reply into normalized candidates.
///
/// The outermost `[...]` span is decoded as JSON first; if there is no such
/// span or it does not decode to an array, every non-blank line is taken as
/// a candidate instead.
pub fn parse_variants(reply: &str) -> ParsedVariants {
    if let Some(span) = JSON_ARRAY_REGEX.find(reply) {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(span.as_str()) {
            return ParsedVariants::Structured(
                items
                    .into_iter()
                    .filter_map(json_element_text)
                    .map(|s| normalize_answer(&s))
                    .collect(),
            );
        }
        log::debug!("Reply contained a bracketed span that is not a JSON array, using line fallback");
    }

    ParsedVariants::Fallback(
        reply
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(normalize_answer)
            .collect(),
    )
}

/// Merge candidates with the original answer into the final variant set.
///
/// The result is never empty and always holds the normalized answer.
pub fn build_variant_set(parsed: ParsedVariants, answer: &str) -> BTreeSet<String> {
    let original = normalize_answer(answer);

    let mut variants: BTreeSet<String> = parsed
        .into_candidates()
        .into_iter()
        .filter(|candidate| !candidate.is_empty())
        .collect();
    variants.insert(original.clone());
    variants.retain(|v| !v.is_empty());

    if variants.is_empty() {
        return BTreeSet::from([original]);
    }
    variants
}

pub struct AnswerVariantService {
    completion: Arc<dyn CompletionClient>,
    options: CompletionOptions,
}

impl AnswerVariantService {
    pub fn new(completion: Arc<dyn CompletionClient>, options: CompletionOptions) -> Self {
        Self {
            completion,
            options,
        }
    }

    pub async fn extract_variants(&self, question: &str, answer: &str) -> AppResult<BTreeSet<String>> {
        let prompt = render(ANSWER_VARIANTS_PROMPT, question, answer);
        let reply = self.completion.complete(&prompt, &self.options).await?;

        let parsed = parse_variants(&reply);
        if !parsed.is_structured() {
            log::warn!("No JSON array in variant reply for '{}', parsed line by line", answer);
        }

        Ok(build_variant_set(parsed, answer))
    }
}
