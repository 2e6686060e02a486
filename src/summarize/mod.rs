mod keywords;
mod strategy;

#[cfg(test)]
mod tests;

pub use keywords::{KEYWORD_LEAD_IN, KeywordSet, compose_keyword_prompt, extract_keyword_set};
pub use strategy::{Strategy, SummaryTrace, summarize_chunks};

/// Separator between partial outputs in a joined summary
pub const SUMMARY_SEPARATOR: &str = "\n\n\n";

/// Default prompt for per-chunk summaries
pub const DEFAULT_SUMMARY_PROMPT: &str = "生成以下内容的摘要:";

/// Default prompt for keyword extraction
pub const DEFAULT_KEYWORD_PROMPT: &str = "抽取以下内容的人物和地点:";
