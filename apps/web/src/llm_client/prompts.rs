// Shared prompt fragments. Each feature that needs the model keeps its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// System prompt that keeps the model to plain résumé text.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an AI that writes professional resumes. \
    Respond with the resume text only, in plain text. \
    Do NOT use markdown formatting. \
    Do NOT add greetings, explanations, or closing remarks.";
