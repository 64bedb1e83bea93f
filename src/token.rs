use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// Unicode word boundaries: any letter or digit, ASCII or not, glues onto the run
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]+\b").expect("static token pattern"));

/// A variable reference inside an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub name: &'a str,
    pub span: Range<usize>,
}

/// Find every variable token in `text`, in text order.
///
/// A token is a whole-word run of uppercase ASCII letters not immediately
/// followed by `(`, so `FOO(A, B)` references `A` and `B` but not `FOO`.
/// Graph construction and [`substitute`] both go through here.
pub fn extract_tokens(text: &str) -> Vec<Token<'_>> {
    WORD_RE
        .find_iter(text)
        .filter(|m| !text[m.end()..].starts_with('('))
        .map(|m| Token {
            name: m.as_str(),
            span: m.range(),
        })
        .collect()
}

/// Rebuild `text` with each token replaced by whatever `lookup` returns.
///
/// `None` from `lookup` keeps the token text unchanged. The first error aborts
/// the rewrite.
pub fn substitute<E, F>(text: &str, mut lookup: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<Option<String>, E>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for token in extract_tokens(text) {
        out.push_str(&text[last..token.span.start]);
        match lookup(token.name)? {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(token.name),
        }
        last = token.span.end;
    }
    out.push_str(&text[last..]);

    Ok(out)
}
