use super::{LoadError, Loader};
use regex::{Captures, Regex};
use std::io::{Cursor, Read};
use std::sync::OnceLock;
use zip::ZipArchive;
use zip::result::ZipError;

const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX loader: one line per non-empty paragraph
pub struct DocxLoader;

impl Loader for DocxLoader {
    fn load(&self, _path: &str, bytes: &[u8]) -> Result<Vec<String>, LoadError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|err| match err {
                ZipError::FileNotFound => LoadError::MissingPart(DOCUMENT_PART.to_string()),
                other => LoadError::Archive(other),
            })?
            .read_to_string(&mut xml)?;

        Ok(paragraphs(&xml))
    }
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:p[ >].*?</w:p>").expect("valid paragraph pattern"))
}

fn run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:(tab|br|cr)\b[^>]*/>")
            .expect("valid run pattern")
    })
}

/// Paragraph texts of a WordprocessingML body, trimmed, empties dropped
fn paragraphs(xml: &str) -> Vec<String> {
    paragraph_re()
        .find_iter(xml)
        .map(|p| paragraph_text(p.as_str()))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

fn paragraph_text(paragraph: &str) -> String {
    let mut text = String::new();

    for caps in run_re().captures_iter(paragraph) {
        if let Some(run) = caps.get(1) {
            text.push_str(&decode_entities(run.as_str()));
        } else if caps.get(2).is_some_and(|m| m.as_str() == "tab") {
            text.push('\t');
        } else {
            text.push('\n');
        }
    }

    text
}

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(?:#x([0-9A-Fa-f]+)|#([0-9]+)|(lt|gt|quot|apos|amp));")
            .expect("valid entity pattern")
    })
}

/// Decode predefined XML entities and numeric character references.
/// References to invalid code points are left as written.
fn decode_entities(text: &str) -> String {
    entity_re()
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str().parse().ok().and_then(char::from_u32)
            } else {
                caps.get(3).map(|name| match name.as_str() {
                    "lt" => '<',
                    "gt" => '>',
                    "quot" => '"',
                    "apos" => '\'',
                    _ => '&',
                })
            };

            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
