// Prompt text for résumé generation.
// The system prompt comes from llm_client::prompts.

use crate::models::ResumeFields;

/// Fixed instruction placed ahead of the user's fields.
pub const RESUME_INSTRUCTION: &str = "You are an AI that writes professional resumes.
Write a clean, professional resume in plain text. Include:

- Short summary paragraph at the top.
- Bullet points for each experience and skill.
- Sections with clear headings: Name, Summary, Experience, Skills, Education, Age.
- Do not include any unrelated text, commentary, or ads.";

/// Builds the generation prompt: the fixed instruction followed by every field verbatim.
///
/// Field text is interpolated in one pass, so a value that happens to look like
/// a placeholder is never substituted again.
pub fn format_resume_prompt(fields: &ResumeFields) -> String {
    format!(
        "{RESUME_INSTRUCTION}\n\nName: {}\nExperience: {}\nSkills: {}\nEducation: {}\nAge: {}\n",
        fields.name, fields.experience, fields.skills, fields.education, fields.age
    )
}
