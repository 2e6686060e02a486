use super::*;
use crate::generate::{GenerateError, Generator};
use std::cell::RefCell;

/// Deterministic generator that records every call
struct Recorder {
    calls: RefCell<Vec<(String, String)>>,
    respond: fn(&str) -> String,
    fail_on: Option<usize>,
}

impl Recorder {
    fn new(respond: fn(&str) -> String) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            respond,
            fail_on: None,
        }
    }

    fn failing_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Generator for Recorder {
    fn generate(&self, prompt: &str, content: &str, _max_length: usize) -> Result<String, GenerateError> {
        let call = self.call_count();
        self.calls
            .borrow_mut()
            .push((prompt.to_string(), content.to_string()));

        if self.fail_on == Some(call) {
            return Err(GenerateError::Backend("model crashed".to_string()));
        }
        Ok((self.respond)(content))
    }
}

fn wrap(content: &str) -> String {
    format!("S({content})")
}

#[test]
fn test_recursive_accumulates_summary() {
    let generator = Recorder::new(wrap);
    let chunks = ["chunk0", "chunk1", "chunk2"];

    let trace = summarize_chunks(&generator, &chunks, Strategy::Recursive, "摘要", 128).unwrap();

    assert_eq!(trace.len(), 3);
    assert_eq!(trace.outputs[0], "S(chunk0)");
    assert_eq!(trace.outputs[1], "S(chunk1)");
    assert_eq!(trace.outputs[2], "S(S(chunk1)\nchunk2)");
    assert_eq!(trace.last(), Some("S(S(chunk1)\nchunk2)"));
}

#[test]
fn test_recursive_carries_through_long_sequences() {
    let generator = Recorder::new(wrap);
    let chunks = ["a", "b", "c", "d"];

    let trace = summarize_chunks(&generator, &chunks, Strategy::Recursive, "p", 128).unwrap();

    assert_eq!(trace.outputs[3], "S(S(S(b)\nc)\nd)");
    let calls = generator.calls.borrow();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|(prompt, _)| prompt == "p"));
    assert_eq!(calls[2].1, "S(b)\nc");
}

#[test]
fn test_subsection_is_independent() {
    let generator = Recorder::new(wrap);
    let chunks = vec!["one".to_string(), "two".to_string(), "three".to_string()];

    let trace = summarize_chunks(&generator, &chunks, Strategy::Subsection, "p", 128).unwrap();

    assert_eq!(trace.outputs, vec!["S(one)", "S(two)", "S(three)"]);
    assert_eq!(trace.joined(), "S(one)\n\n\nS(two)\n\n\nS(three)");

    let contents: Vec<String> = generator.calls.borrow().iter().map(|(_, c)| c.clone()).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
}

#[test]
fn test_single_chunk_recursive() {
    let generator = Recorder::new(wrap);
    let trace = summarize_chunks(&generator, &["only"], Strategy::Recursive, "p", 8).unwrap();
    assert_eq!(trace.outputs, vec!["S(only)"]);
}

#[test]
fn test_empty_chunks_produce_empty_trace() {
    let generator = Recorder::new(wrap);
    let chunks: Vec<&str> = Vec::new();

    let trace = summarize_chunks(&generator, &chunks, Strategy::Recursive, "p", 8).unwrap();

    assert!(trace.is_empty());
    assert_eq!(trace.joined(), "");
    assert_eq!(generator.call_count(), 0);
}

#[test]
fn test_generation_failure_aborts_run() {
    let generator = Recorder::new(wrap).failing_on(1);
    let chunks = ["a", "b", "c"];

    let result = summarize_chunks(&generator, &chunks, Strategy::Subsection, "p", 8);

    assert!(matches!(result, Err(GenerateError::Backend(_))));
    // No further calls after the failure
    assert_eq!(generator.call_count(), 2);
}

#[test]
fn test_strategy_parsing() {
    assert_eq!("subsection".parse::<Strategy>().unwrap(), Strategy::Subsection);
    assert_eq!("Recursive".parse::<Strategy>().unwrap(), Strategy::Recursive);
    assert!("rolling".parse::<Strategy>().is_err());
    assert_eq!(Strategy::Subsection.to_string(), "subsection");
}

#[test]
fn test_keyword_set_dedups_across_chunks() {
    let generator = Recorder::new(|content| match content {
        "first" => "张三 北京  李四".to_string(),
        "second" => " 北京\n张三\t上海 ".to_string(),
        _ => String::new(),
    });

    let keywords =
        extract_keyword_set(&generator, &["first", "second", "third"], "抽取", 64).unwrap();

    assert_eq!(keywords.len(), 4);
    for keyword in ["张三", "李四", "北京", "上海"] {
        assert!(keywords.contains(keyword), "missing {}", keyword);
    }
    assert_eq!(generator.call_count(), 3);
}

#[test]
fn test_keyword_prompt_composition() {
    let mut keywords = KeywordSet::new();
    keywords.extend_from_output("beta alpha beta");

    let prompt = compose_keyword_prompt(&keywords, "生成以下内容的摘要:");
    assert_eq!(prompt, "保留关键信息:\"alpha beta,生成以下内容的摘要:\"");

    let empty = compose_keyword_prompt(&KeywordSet::new(), "总结");
    assert_eq!(empty, "保留关键信息:\",总结\"");
}

#[test]
fn test_keyword_extraction_failure_propagates() {
    let generator = Recorder::new(wrap).failing_on(0);
    let result = extract_keyword_set(&generator, &["a", "b"], "抽取", 8);

    assert!(result.is_err());
    assert_eq!(generator.call_count(), 1);
}

#[test]
fn test_outputs_are_deterministic() {
    let chunks = ["x", "y", "z"];
    let run = || {
        let generator = Recorder::new(wrap);
        let trace = summarize_chunks(&generator, &chunks, Strategy::Recursive, "p", 8).unwrap();
        let keywords = extract_keyword_set(&generator, &chunks, "k", 8).unwrap();
        (trace, compose_keyword_prompt(&keywords, "s"))
    };

    assert_eq!(run(), run());
}
