//! HTML pages for the résumé form and the generated preview.
//!
//! Every interpolated value goes through `escape_html`.

use crate::models::ResumeFields;

const STYLE: &str = "body{font-family:sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:1rem;font-weight:bold}\
input,textarea{width:100%;box-sizing:border-box;padding:.4rem}\
textarea{min-height:6rem}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:1rem;border-radius:4px}\
.actions{margin-top:1.5rem;display:flex;gap:1rem}";

/// Form pre-filled with `fields`, posting to `/generate/`. `None` renders an empty form.
pub fn form_page(fields: Option<&ResumeFields>) -> String {
    let value = |pick: fn(&ResumeFields) -> &str| escape_html(fields.map(pick).unwrap_or(""));

    let body = format!(
        r#"<h1>Resume Builder</h1>
<form method="post" action="/generate/">
  <label for="name">Name</label>
  <input id="name" name="name" type="text" value="{name}">
  <label for="experience">Experience</label>
  <textarea id="experience" name="experience">{experience}</textarea>
  <label for="skills">Skills</label>
  <textarea id="skills" name="skills">{skills}</textarea>
  <label for="education">Education</label>
  <textarea id="education" name="education">{education}</textarea>
  <label for="age">Age</label>
  <input id="age" name="age" type="text" value="{age}">
  <div class="actions"><button type="submit">Generate resume</button></div>
</form>"#,
        name = value(|f| f.name.as_str()),
        experience = value(|f| f.experience.as_str()),
        skills = value(|f| f.skills.as_str()),
        education = value(|f| f.education.as_str()),
        age = value(|f| f.age.as_str()),
    );
    layout("Resume Builder", &body)
}

/// Preview of the cleaned résumé with a link to the PDF download.
pub fn preview_page(resume_text: &str) -> String {
    let body = format!(
        r#"<h1>Your Resume</h1>
<pre>{text}</pre>
<div class="actions">
  <a href="/download/">Download PDF</a>
  <a href="/">Edit details</a>
</div>"#,
        text = escape_html(resume_text),
    );
    layout("Resume Preview", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
