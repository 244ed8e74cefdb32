use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const EXPLANATION_PROMPT: &str = "Explain the following Jeopardy question and answer.

Question: {question}
Answer: {answer}

The user would like to learn more about this topic. You do not need to rewrite the question and answer.

Please write it across a few concise paragraphs.";

pub const ANSWER_VARIANTS_PROMPT: &str = r#"Given the Jeopardy question "{question}" and answer "{answer}", provide a list of alternative ways a contestant might phrase this answer that should be considered correct.
Include variations that:
- exclude articles (a, an, the). So if the correct answer is "The Appalachians", we should also consider "Appalachians".
- If the answer is plural, include the singular and vice versa.
- Use abbreviations or full names where applicable
- Account for common misspellings or typos
- Include partial answers that capture a part of the correct response
- A version of the answer without parentheses

Examples below:
- if the answer is "Franklin Delano Roosevelt", you should return a list of possible answers like: ["franklin delano roosevelt", "fdr", "roosevelt", "franklin roosevelt"].
- if the correct answer is "The Appalachians", we should also consider "Appalachians", "Appalachian" as correct answers.
- if the correct answer is "Jumping Jacks" we should also consider "Jumping Jack" to be a correct answer
- if the correct answer is "The emancipation proclamation" we should also consider "emancipation proclamation" to be a correct answer

Provide the list as a JSON array of strings"#;

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(question|answer)\}").expect("PLACEHOLDER_REGEX is a valid regex pattern")
});

/// Fill the `{question}` and `{answer}` placeholders of a prompt template.
///
/// Substitution is a single pass, so placeholder text inside the inserted
/// values is kept as written.
pub fn render(template: &str, question: &str, answer: &str) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "question" => question,
            _ => answer,
        })
        .into_owned()
}
