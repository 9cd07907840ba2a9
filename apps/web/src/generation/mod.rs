// Résumé generation: prompt formatting, model call, text cleanup, and the
// form/preview/download handlers built on top of them.
// All model calls go through the TextGenerator trait; no direct HTTP calls here.

pub mod cleaner;
pub mod generator;
pub mod handlers;
pub mod prompts;
