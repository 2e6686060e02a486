/// Terminal punctuation closing a sentence unit (CJK and Latin)
pub const STOP_CHARS: &[char] = &[
    '.', '!', '?', '。', '！', '？', '…', ';', '；', ':', '：', '”', '’', '）', '】', '》', '」', '』',
    '〕', '〉', '〗', '〞', '〟', '»', '"', '\'', ')', ']', '}',
];

pub fn is_stop_char(c: char) -> bool {
    STOP_CHARS.contains(&c)
}

/// Whether the last character of `text` is a stop character
pub fn ends_with_stop_char(text: &str) -> bool {
    text.chars().last().is_some_and(is_stop_char)
}

/// Split a line into sentence units.
///
/// Each unit ends at a stop character; a trailing remainder without one
/// becomes the final unit. Concatenating the units reproduces the line.
pub fn split_sentences(line: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;

    for (idx, c) in line.char_indices() {
        if is_stop_char(c) {
            let end = idx + c.len_utf8();
            units.push(&line[start..end]);
            start = end;
        }
    }

    if start < line.len() {
        units.push(&line[start..]);
    }

    units
}
