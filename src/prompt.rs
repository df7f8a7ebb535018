//! Deterministic prompt assembly for grounded generation.
//!
//! The human/assistant turn markers are part of the downstream completion
//! model's wire contract; changing them breaks generation, so they live here
//! as fixed constants.

use crate::document::RetrievedReference;

/// Opening marker of the human turn.
const HUMAN_OPEN: &str = "<human>";

/// Closing marker of the human turn, followed by an empty assistant turn
/// the model completes.
const HUMAN_CLOSE: &str = "</human>\n\n<assistant>";

/// Fixed sentence introducing the grounding context blocks.
const CONTEXT_INTRO: &str = "Here is information relevant to the question:\n\n";

/// Build a grounded question-answering prompt.
///
/// With non-empty `context`, the prompt contains the introductory sentence
/// followed by one `Document [n]:` block per reference in input order, each
/// separated by a blank line, then the literal question. With empty
/// `context` the prompt is the bare question. Pure and deterministic:
/// identical inputs produce byte-identical output.
pub fn rag_prompt(query: &str, context: &[RetrievedReference]) -> String {
    let mut prompt = String::from(HUMAN_OPEN);

    if !context.is_empty() {
        prompt.push_str(CONTEXT_INTRO);
        for (i, reference) in context.iter().enumerate() {
            prompt.push_str(&format!("Document [{}]:\n{}\n\n", i + 1, reference.content));
        }
    }

    prompt.push_str(&format!("Question: {query}"));
    prompt.push_str(HUMAN_CLOSE);

    prompt
}

/// Build a summarization prompt with a fixed instructional template.
///
/// `target_chars` is the approximate summary length requested from the
/// model. Input-length capping is the caller's responsibility.
pub fn summary_prompt(text: &str, target_chars: usize) -> String {
    format!(
        "{HUMAN_OPEN}Summarize the following text in approximately {target_chars} characters. \
         Return only the summary.\n\n{text}{HUMAN_CLOSE}"
    )
}
