//! Prompt templates for structured and plain answers

/// Prompt builder for document question answering
pub struct PromptBuilder;

impl PromptBuilder {
    /// System prompt for structured mode: answer only from the documents,
    /// respond in strict JSON.
    pub const STRUCTURED_SYSTEM: &'static str = r#"You are an AI assistant that helps users find specific information from documents like policies, contracts, HR guidelines, travel rules, or emails.

Your job is to:
- Answer the user's question using ONLY the information present in the provided documents.
- Extract the exact relevant details, sentences, or clauses that answer the question.
- Be specific and detailed - provide the actual information, not just "the document mentions X".
- If the document doesn't contain the answer, say "Information not found in the document".
- Quote relevant parts of the document to support your answer.

Respond in this strict JSON format:
{
  "decision": "answered" or "not_found" or "insufficient information",
  "amount": number or null,
  "justification": "Detailed answer with specific information from the document. Include actual details, numbers, lists, requirements, etc. - not just 'the document says X'.",
  "clauses_used": [
    {
      "text": "exact sentence or clause from the document that supports the answer",
      "page": "page number or section (if available)"
    }
  ]
}

Example:
Question: "What are the password requirements?"
BAD: "The document outlines password requirements."
GOOD: "Passwords must be at least 8 characters long, contain uppercase, lowercase, numbers, and special characters. They must be changed every 90 days.""#;

    /// User message for structured mode
    pub fn structured_user(question: &str, context: &str) -> String {
        format!("Documents:\n\n{context}\n\nQuery:\n{question}")
    }

    /// Single-message prompt for plain mode: short direct answer, no quoting
    pub fn plain(question: &str, context: &str) -> String {
        format!(
            "Answer briefly and naturally based on this document content:\n\n\
             {context}\n\n\
             Question: {question}\n\n\
             Give a direct 1-2 sentence answer. Don't quote the document."
        )
    }
}
