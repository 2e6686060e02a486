/// Prompt used for per-chunk summarization and keyword extraction
pub const SUMMARY_TEMPLATE: &str = "使用中文{query_str}:\n{context_str}\n";

/// Prompt used to answer a question from retrieved passages
pub const QA_TEMPLATE: &str = "基于以下已知信息，简洁和专业的来回答用户的问题。
如果无法从中得到答案，请说 \"根据已知信息无法回答该问题\" 或 \"没有提供足够的相关信息\"，不允许在答案中添加编造成分，答案请使用中文。

已知内容:
{context_str}

问题:
{query_str}
";

/// A prompt with `{query_str}` and `{context_str}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn summary() -> Self {
        Self::new(SUMMARY_TEMPLATE)
    }

    pub fn question_answering() -> Self {
        Self::new(QA_TEMPLATE)
    }

    /// Character count of the raw template, placeholders included
    pub fn char_count(&self) -> usize {
        self.template.chars().count()
    }

    pub fn render(&self, query: &str, context: &str) -> String {
        self.template
            .replace("{context_str}", context)
            .replace("{query_str}", query)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::summary()
    }
}
