//! Prompt template for feedback review.

use folio_core::error::{FolioError, Result};
use folio_core::review::ReviewRequest;
use minijinja::{Environment, context};

const REVIEW_TEMPLATE: &str = r#"You are reviewing feedback a visitor left on a personal portfolio website.

Feedback:
"""
{{ feedback_text }}
"""

Analyze the feedback and respond with a JSON object containing exactly these fields:
- "sentiment": one of {% for s in sentiments %}"{{ s }}"{% if not loop.last %}, {% endif %}{% endfor %}
- "summary": one sentence summarizing the feedback
- "suggestedAction": one sentence describing what the site owner should do next

IMPORTANT: Output ONLY valid JSON, no markdown formatting or code blocks."#;

pub(crate) fn render_review_prompt(request: &ReviewRequest) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("review", REVIEW_TEMPLATE)
        .map_err(|e| FolioError::internal(format!("Invalid review template: {e}")))?;

    let template = env
        .get_template("review")
        .map_err(|e| FolioError::internal(format!("Missing review template: {e}")))?;

    template
        .render(context! {
            feedback_text => request.feedback_text.trim(),
            sentiments => ["Positive", "Neutral", "Negative"],
        })
        .map_err(|e| FolioError::internal(format!("Failed to render review prompt: {e}")))
}
