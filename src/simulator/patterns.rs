//! Recognizers for the statement shapes that need more than a prefix check.
//!
//! Each returns `None` when the line only looks like the statement; the
//! dispatcher then moves on to the next rule. All of them scan every
//! occurrence of their keyword, so the shape may appear anywhere on the line.

/// A parsed `for <var> in range(<a>[, <b>]):` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeHeader<'a> {
    pub var: &'a str,
    pub start: i64,
    pub end: i64,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split a leading run of word characters off `s`. `None` if there is none.
fn take_word(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !is_word_char(c)).unwrap_or(s.len());
    if end == 0 { None } else { Some(s.split_at(end)) }
}

fn take_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// `input("<prompt>")` with a double-quoted prompt.
pub fn input_prompt(line: &str) -> Option<&str> {
    const CALL: &str = "input(\"";
    line.match_indices(CALL).find_map(|(pos, _)| {
        let after = &line[pos + CALL.len()..];
        let close = after.find('"')?;
        after[close..].starts_with("\")").then(|| &after[..close])
    })
}

/// `for <var> in range(<digits>[,][ ]*[<digits>]):`.
///
/// With one number the range is `0..n`, with two it is `a..b`. Only literal
/// non-negative integers are recognized.
pub fn range_header(line: &str) -> Option<RangeHeader<'_>> {
    line.match_indices("for ").find_map(|(pos, kw)| {
        let (var, rest) = take_word(&line[pos + kw.len()..])?;
        let rest = rest.strip_prefix(" in range(")?;
        let (first, rest) = take_digits(rest);
        if first.is_empty() {
            return None;
        }
        let rest = rest.strip_prefix(',').unwrap_or(rest);
        let rest = rest.trim_start();
        let (second, rest) = take_digits(rest);
        rest.strip_prefix("):")?;

        let first: i64 = first.parse().ok()?;
        let (start, end) = if second.is_empty() {
            (0, first)
        } else {
            (first, second.parse().ok()?)
        };
        Some(RangeHeader { var, start, end })
    })
}

/// `def <name>(<params>):`, returning the name and the raw parameter text.
pub fn def_header(line: &str) -> Option<(&str, &str)> {
    line.match_indices("def ").find_map(|(pos, kw)| {
        let (name, rest) = take_word(&line[pos + kw.len()..])?;
        let rest = rest.strip_prefix('(')?;
        let close = rest.rfind("):")?;
        Some((name, &rest[..close]))
    })
}

/// `<name>.append(<item>)`, returning the list name and the item text.
///
/// The item runs up to the last `)` on the line and must not be empty.
pub fn append_call(line: &str) -> Option<(&str, &str)> {
    const CALL: &str = ".append(";
    line.match_indices(CALL).find_map(|(pos, _)| {
        let head = &line[..pos];
        let name_start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_word_char(*c))
            .last()
            .map(|(i, _)| i)?;
        let after = &line[pos + CALL.len()..];
        let close = after.rfind(')')?;
        if close == 0 {
            return None;
        }
        Some((&head[name_start..], &after[..close]))
    })
}
