//! Server-side include directives inside markup.
//!
//! Recognises `<!--#include file="..."-->` and `<!--#include virtual="..."-->`.
//! The keywords match in any case; the path is kept verbatim.

/// Which form of include a directive uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    File,
    Virtual,
}

impl IncludeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IncludeKind::File => "file",
            IncludeKind::Virtual => "virtual",
        }
    }
}

/// A directive located inside a markup chunk. `start..end` are byte
/// offsets covering the whole directive text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub kind: IncludeKind,
    pub path: String,
    pub start: usize,
    pub end: usize,
}

/// A piece of a markup chunk after splitting out include directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Markup(&'a str),
    Include(IncludeDirective),
}

/// The fixed textual form an include is emitted in.
pub fn render(kind: IncludeKind, path: &str) -> String {
    format!("<!--#include {}=\"{path}\"-->", kind.as_str())
}

/// Split a markup chunk into markup and include segments. Empty markup
/// between or around directives is dropped; a chunk with no directives
/// comes back as a single (possibly empty) markup segment.
pub fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(directive) = find(text, pos) {
        if directive.start > pos {
            segments.push(Segment::Markup(&text[pos..directive.start]));
        }
        pos = directive.end;
        segments.push(Segment::Include(directive));
    }

    if pos < text.len() || segments.is_empty() {
        segments.push(Segment::Markup(&text[pos..]));
    }
    segments
}

/// Find the first well-formed directive at or after byte offset `from`.
pub fn find(text: &str, from: usize) -> Option<IncludeDirective> {
    text[from..]
        .match_indices("<!--")
        .find_map(|(offset, _)| match_at(text, from + offset))
}

/// Match a directive starting exactly at `start`.
fn match_at(text: &str, start: usize) -> Option<IncludeDirective> {
    let bytes = text.as_bytes();

    let mut i = expect(bytes, start, "<!--")?;
    i = skip_blanks(bytes, i);
    i = expect(bytes, i, "#include")?;
    let after_keyword = skip_blanks(bytes, i);
    if after_keyword == i {
        return None;
    }
    i = after_keyword;

    let (kind, next) = if let Some(next) = expect(bytes, i, "file") {
        (IncludeKind::File, next)
    } else {
        (IncludeKind::Virtual, expect(bytes, i, "virtual")?)
    };
    i = skip_blanks(bytes, next);
    i = expect(bytes, i, "=")?;
    i = skip_blanks(bytes, i);
    i = expect(bytes, i, "\"")?;

    let path_start = i;
    let path_end = path_start + text[path_start..].find('"')?;
    i = skip_blanks(bytes, path_end + 1);
    let end = expect(bytes, i, "-->")?;

    Some(IncludeDirective {
        kind,
        path: text[path_start..path_end].to_string(),
        start,
        end,
    })
}

/// If `bytes[at..]` starts with `pat` (ASCII, any case), return the offset after it.
fn expect(bytes: &[u8], at: usize, pat: &str) -> Option<usize> {
    let end = at + pat.len();
    bytes
        .get(at..end)
        .filter(|window| window.eq_ignore_ascii_case(pat.as_bytes()))
        .map(|_| end)
}

fn skip_blanks(bytes: &[u8], mut at: usize) -> usize {
    while bytes.get(at).is_some_and(u8::is_ascii_whitespace) {
        at += 1;
    }
    at
}
