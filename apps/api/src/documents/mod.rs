// Document collaborators: text in (PDF résumés), text out (downloadable letter).
// Neither touches the LLM.

pub mod handlers;
pub mod pdf;
pub mod render;
