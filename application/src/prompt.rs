/// The phrase the model must answer with when the documents do not
/// contain the answer.
pub const FALLBACK_PHRASE: &str = "Please contact agent.";

/// Build the instruction prompt from the retrieved context and the question.
pub fn build_prompt(context_text: &str, question: &str) -> String {
    format!(
        "You are a helpful computer troubleshooting assistant.\n\n\
Using ONLY the DOCUMENTS provided below, answer the user's question clearly and step-by-step.\n\
Do NOT copy documents verbatim.\n\n\
If the answer cannot be found in the documents, respond exactly with:\n\
\"{FALLBACK_PHRASE}\"\n\n\
DOCUMENTS:\n\
{context_text}\n\n\
USER QUESTION:\n\
{question}\n"
    )
}
