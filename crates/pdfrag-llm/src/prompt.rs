//! Retrieval-QA prompt template.

use pdfrag_core::Error;

/// The default retrieval-QA prompt.
pub const DEFAULT_TEMPLATE: &str = "\
Answer the question based only on the context below. If the context does not \
contain the answer, say that you don't know.

<context>
{context}
</context>

Question: {question}";

/// Separator between context segments in the rendered prompt.
const CONTEXT_JOINER: &str = "\n\n";

/// An explicit prompt template with `{context}` and `{question}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a template, validating that both placeholders are present.
    pub fn new(template: impl Into<String>) -> Result<Self, Error> {
        let template = template.into();
        for placeholder in ["{context}", "{question}"] {
            if !template.contains(placeholder) {
                return Err(Error::Config(format!(
                    "prompt template is missing the {placeholder} placeholder"
                )));
            }
        }
        Ok(Self { template })
    }

    /// The raw template string.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the template over retrieved segment texts and a question.
    #[must_use]
    pub fn render(&self, context_texts: &[&str], question: &str) -> String {
        let context = context_texts.join(CONTEXT_JOINER);
        self.template
            .replace("{context}", &context)
            .replace("{question}", question)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        // The default template is validated by tests
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}
