use super::*;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

fn build_docx(document_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();

    writer.finish().unwrap().into_inner()
}

// ========================================================================
// Plain text
// ========================================================================

#[test]
fn test_text_loader_trims_and_drops_blanks() {
    let lines = TextLoader.load("a.txt", b"  first line \n\n   \nsecond\r\n").unwrap();
    assert_eq!(lines, vec!["first line", "second"]);
}

#[test]
fn test_text_loader_invalid_utf8_is_lossy() {
    let lines = TextLoader.load("a.txt", &[b'o', b'k', 0xFF, b'\n']).unwrap();
    assert_eq!(lines, vec!["ok\u{FFFD}"]);
}

// ========================================================================
// Markdown
// ========================================================================

#[test]
fn test_markdown_loader_strips_markup() {
    let source = b"# Title\n\nSome **bold** and `code` text.\n\n- item one\n- item two\n";
    let lines = MarkdownLoader.load("doc.md", source).unwrap();
    assert_eq!(
        lines,
        vec!["Title", "Some bold and code text.", "item one", "item two"]
    );
}

#[test]
fn test_markdown_loader_empty() {
    assert!(MarkdownLoader.load("empty.md", b"").unwrap().is_empty());
}

// ========================================================================
// DOCX
// ========================================================================

#[test]
fn test_docx_loader_paragraphs() {
    let xml = concat!(
        r#"<w:document><w:body>"#,
        r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>第一段</w:t></w:r><w:r><w:t xml:space="preserve">，继续。</w:t></w:r></w:p>"#,
        r#"<w:p/>"#,
        r#"<w:p w:rsidR="00AB"><w:r><w:t>   </w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>A&amp;B</w:t><w:tab/><w:t>&lt;tag&gt;</w:t></w:r></w:p>"#,
        r#"</w:body></w:document>"#,
    );
    let bytes = build_docx(xml);

    let lines = DocxLoader.load("report.docx", &bytes).unwrap();
    assert_eq!(lines, vec!["第一段，继续。", "A&B\t<tag>"]);
}

#[test]
fn test_docx_loader_numeric_references() {
    let xml = concat!(
        r#"<w:p><w:r><w:t>&#x4E2D;&#25991;&#160;版</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>&#xD800;&amp;#65;</w:t></w:r></w:p>"#,
    );
    let bytes = build_docx(xml);

    let lines = DocxLoader.load("refs.docx", &bytes).unwrap();
    // Surrogates stay as written; escaped ampersands are decoded once
    assert_eq!(lines, vec!["中文\u{a0}版", "&#xD800;&#65;"]);
}

#[test]
fn test_docx_loader_missing_document_part() {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("other.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"<x/>").unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let err = DocxLoader.load("broken.docx", &bytes).unwrap_err();
    assert!(matches!(err, LoadError::MissingPart(ref part) if part == "word/document.xml"));
}

#[test]
fn test_docx_loader_rejects_non_zip() {
    let err = DocxLoader.load("fake.docx", b"not a zip archive").unwrap_err();
    assert!(matches!(err, LoadError::Archive(_)));
}

// ========================================================================
// PDF line merging
// ========================================================================

#[test]
fn test_merge_page_lines_joins_until_stop_char() {
    let page = "  自然语言处理是\n人工智能的分支。\n\n第二段没有结束\n";
    assert_eq!(
        merge_page_lines(page),
        vec!["自然语言处理是人工智能的分支。", "第二段没有结束"]
    );
}

#[test]
fn test_merge_page_lines_latin_and_brackets() {
    let page = "The method (see\nAppendix A)\nworks well.\nDone";
    assert_eq!(
        merge_page_lines(page),
        vec!["The method (seeAppendix A)", "works well.", "Done"]
    );
    assert!(merge_page_lines("   \n").is_empty());
}

#[test]
fn test_passages_do_not_span_pages() {
    let pages = ["第一页的段落没有结束\n", "第二页接着写。\n新段落"];
    assert_eq!(
        passages_from_pages(&pages),
        vec!["第一页的段落没有结束", "第二页接着写。", "新段落"]
    );
    assert!(passages_from_pages::<&str>(&[]).is_empty());
}

// ========================================================================
// Registry
// ========================================================================

#[test]
fn test_registry_defaults() {
    let registry = LoaderRegistry::new();
    assert_eq!(registry.loader_count(), 4);

    // Unknown extensions fall back to plain text
    let lines = registry.select("notes.xyz").load("notes.xyz", b"a\nb").unwrap();
    assert_eq!(lines, vec!["a", "b"]);

    // Extension matching is case-insensitive
    let lines = registry
        .select("README.MD")
        .load("README.MD", b"# Head\n")
        .unwrap();
    assert_eq!(lines, vec!["Head"]);
}

#[test]
fn test_registry_custom_loader() {
    struct Upper;
    impl Loader for Upper {
        fn load(&self, _path: &str, bytes: &[u8]) -> Result<Vec<String>, LoadError> {
            Ok(vec![String::from_utf8_lossy(bytes).to_uppercase()])
        }
    }

    let mut registry = LoaderRegistry::empty();
    registry.register("UP", Upper);
    assert_eq!(registry.loader_count(), 1);
    assert_eq!(registry.select("x.up").load("x.up", b"abc").unwrap(), vec!["ABC"]);
}

#[test]
fn test_load_document_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.txt");
    std::fs::write(&path, "第一行。\n\n第二行。\n").unwrap();

    let document = load_document(&path).unwrap();
    assert_eq!(document.extension, "txt");
    assert_eq!(document.lines, vec!["第一行。", "第二行。"]);
    assert_eq!(document.text(), "第一行。\n第二行。");
    // Blank lines survive in the preprocessing input of plain text
    assert_eq!(document.raw_text, "第一行。\n\n第二行。\n");
    assert_eq!(document.bytes.len(), std::fs::metadata(&path).unwrap().len() as usize);
}

#[test]
fn test_load_docx_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memo.DOCX");
    std::fs::write(&path, build_docx("<w:p><w:r><w:t>备忘</w:t></w:r></w:p>")).unwrap();

    let document = load_document(&path).unwrap();
    assert_eq!(document.extension, "docx");
    assert_eq!(document.lines, vec!["备忘"]);
    assert_eq!(document.raw_text, "备忘");
}

#[test]
fn test_load_missing_file() {
    let err = load_document("/no/such/file.txt").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}
