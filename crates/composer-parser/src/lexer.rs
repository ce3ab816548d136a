//! Lexical analyzer for Composer markup.
//!
//! The lexer walks the source one construct at a time and produces a flat
//! list of childless [`Node`]s. Dispatch is on the first character of the
//! remaining input; every branch consumes at least one character, so the
//! scan always terminates.
//!
//! The lexer never fails. Malformed constructs degrade to `TEXT`:
//! - `%pattern%` with an invalid pattern keeps the raw pattern as text.
//! - `(...)` without `http` is re-emitted as text, parentheses included.
//!
//! Unterminated delimiters run to the end of the input.
//!
//! The public entry point is [`tokenize`].

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{delimited, opt, preceded},
    error::ModalResult,
    stream::Stream as _,
    token::{any, take_till, take_while},
};

use composer_core::{element::ElementType, node::Node};

use crate::macros::MacroContext;

/// Characters that end a text run.
const SYMBOL_CHARS: &str = "\"</>&|#{%}[~]\\`(*)_\n";

type Input<'src> = &'src str;

fn is_symbol(c: char) -> bool {
    SYMBOL_CHARS.contains(c)
}

/// Tokenize Composer source into a flat list of tokens.
///
/// The end-of-input sentinel is not part of the returned list.
pub fn tokenize(source: &str, context: &MacroContext) -> Vec<Node> {
    let tokens: Vec<Node> = Lexer::new(source, context).collect();
    debug!(tokens = tokens.len(); "Tokenized source");
    tokens
}

/// A cursor over Composer source.
///
/// Iterating yields tokens until the end of input. [`Lexer::next_token`]
/// returns the end-of-input sentinel instead of stopping.
pub struct Lexer<'src, 'ctx> {
    input: Input<'src>,
    context: &'ctx MacroContext,
}

impl<'src, 'ctx> Lexer<'src, 'ctx> {
    /// Creates a lexer over `source`, resolving macros against `context`.
    pub fn new(source: &'src str, context: &'ctx MacroContext) -> Self {
        Self {
            input: source,
            context,
        }
    }

    /// Scans the next token, or returns the end-of-input sentinel.
    pub fn next_token(&mut self) -> Node {
        let Some(current) = self.input.chars().next() else {
            return Node::eof();
        };

        let input = &mut self.input;
        let result = match current {
            ' ' | '\n' => whitespace(input),
            '&' | '/' | '_' | '"' | '~' => symbol(input, ElementType::BlockSymbol),
            '[' => symbol(input, ElementType::TableStart),
            ']' => symbol(input, ElementType::TableEnd),
            '|' => symbol(input, ElementType::Pipe),
            '<' => symbol(input, ElementType::ColorStart),
            '>' => symbol(input, ElementType::ColorEnd),
            '=' => Ok(divider(input)),
            '`' => ignore(input),
            '%' => Ok(datetime(input, self.context)),
            '(' => link(input),
            '{' => Ok(code(input, self.context)),
            '#' => header(input),
            '*' => element(input),
            '\\' => escape(input),
            // Closing `)` and `}` without an opener
            c if is_symbol(c) => symbol(input, ElementType::Text),
            _ => text(input),
        };

        let token = result.unwrap_or_else(|err| {
            debug!(error:? = err; "Scanner failed, keeping remaining input as text");
            let remaining = input.len();
            let rest = input.next_slice(remaining);
            Node::new(ElementType::Text, rest)
        });
        trace!(kind:% = token.kind(), literal = token.literal(); "Scanned token");
        token
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}

/// A run of whitespace; `NEWLINE` if it holds a line break.
fn whitespace(input: &mut Input<'_>) -> ModalResult<Node> {
    take_while(1.., char::is_whitespace)
        .map(|run: &str| {
            let kind = if run.contains('\n') {
                ElementType::Newline
            } else {
                ElementType::Whitespace
            };
            Node::new(kind, run)
        })
        .parse_next(input)
}

/// A single character emitted as-is.
fn symbol(input: &mut Input<'_>, kind: ElementType) -> ModalResult<Node> {
    any.map(|c: char| Node::new(kind, c)).parse_next(input)
}

/// A maximal run of non-symbol characters.
fn text(input: &mut Input<'_>) -> ModalResult<Node> {
    take_while(1.., |c: char| !is_symbol(c))
        .map(|run: &str| Node::new(ElementType::Text, run))
        .parse_next(input)
}

/// `` `...` ``: verbatim content, no escapes.
fn ignore(input: &mut Input<'_>) -> ModalResult<Node> {
    delimited('`', take_till(0.., '`'), opt('`'))
        .map(|content: &str| Node::new(ElementType::Ignore, content))
        .parse_next(input)
}

/// `=...=`: divider with trimmed content.
fn divider(input: &mut Input<'_>) -> Node {
    Node::new(ElementType::Divider, same_char_block(input, '='))
}

/// `%...%`: formatted date-time, or the raw pattern as text.
fn datetime(input: &mut Input<'_>, context: &MacroContext) -> Node {
    let pattern = same_char_block(input, '%');
    match context.format(pattern) {
        Ok(formatted) => Node::new(ElementType::DateTime, formatted),
        Err(err) => {
            debug!(pattern = pattern, error:% = err; "Invalid datetime pattern, keeping it as text");
            Node::new(ElementType::Text, pattern)
        }
    }
}

/// Consumes a block opened and closed by `delimiter` and returns its trimmed
/// content. A delimiter preceded by `\` does not close the block.
fn same_char_block<'src>(input: &mut Input<'src>, delimiter: char) -> &'src str {
    let _ = input.next_token();

    let mut previous = None;
    let end = input
        .char_indices()
        .find(|&(_, c)| {
            let closes = c == delimiter && previous != Some('\\');
            previous = Some(c);
            closes
        })
        .map_or(input.len(), |(index, _)| index);

    let content = input.next_slice(end);
    let _ = input.next_token();
    content.trim()
}

/// `(...)`: link, typed embed, or literal text when there is no `http`.
fn link(input: &mut Input<'_>) -> ModalResult<Node> {
    delimited('(', take_till(0.., ')'), opt(')'))
        .map(|content: &str| link_node(content.trim()))
        .parse_next(input)
}

fn link_node(content: &str) -> Node {
    if !content.contains("http") {
        debug!(content = content; "Parenthesized text is not a link");
        return Node::new(ElementType::Text, format!("({content})"));
    }

    match content.split_once('@') {
        Some(("img", url)) => Node::new(ElementType::Image, url),
        Some(("ytb", url)) => Node::new(ElementType::Youtube, url),
        Some(("vid", url)) => Node::new(ElementType::Video, url),
        Some(_) => Node::new(ElementType::HyperLink, content),
        None => Node::new(ElementType::Link, content),
    }
}

/// `{...}`: code block with balanced inner braces and placeholders resolved.
fn code(input: &mut Input<'_>, context: &MacroContext) -> Node {
    let _ = input.next_token();

    let mut depth = 0usize;
    let mut end = input.len();
    for (index, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => {
                end = index;
                break;
            }
            '}' => depth -= 1,
            _ => {}
        }
    }

    let body = input.next_slice(end);
    let _ = input.next_token();
    Node::new(ElementType::Code, context.substitute(body.trim()))
}

/// `#...`: heading marker for `#1`..`#6`, otherwise a color reference.
fn header(input: &mut Input<'_>) -> ModalResult<Node> {
    preceded('#', marker_suffix)
        .map(|suffix| match suffix {
            None => Node::new(ElementType::Text, "#"),
            Some(level @ ("1" | "2" | "3" | "4" | "5" | "6")) => {
                Node::new(ElementType::Header, format!("#{level}"))
            }
            Some(value) => Node::new(ElementType::ColorHex, format!("#{value}")),
        })
        .parse_next(input)
}

/// `*...`: list marker. `*`, `*o` and `*x` are told apart by the tree builder.
fn element(input: &mut Input<'_>) -> ModalResult<Node> {
    preceded('*', marker_suffix)
        .map(|suffix| match suffix {
            None => Node::new(ElementType::Text, "*"),
            Some(value) => Node::new(ElementType::Element, format!("*{value}")),
        })
        .parse_next(input)
}

/// The word glued to a `#` or `*` marker. `None` when the marker ends the input.
fn marker_suffix<'src>(input: &mut Input<'src>) -> ModalResult<Option<&'src str>> {
    if input.is_empty() {
        return Ok(None);
    }
    take_while(0.., |c: char| c != ' ' && !is_symbol(c))
        .map(Some)
        .parse_next(input)
}

/// `\X`: the next character, verbatim. A trailing `\` is kept as text.
fn escape(input: &mut Input<'_>) -> ModalResult<Node> {
    preceded('\\', opt(any))
        .map(|escaped: Option<char>| match escaped {
            Some(c) => Node::new(ElementType::Escape, c),
            None => Node::new(ElementType::Text, "\\"),
        })
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn context() -> MacroContext {
        let now = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap();
        MacroContext::fixed(now, 1_709_647_629_000)
    }

    fn lex(source: &str) -> Vec<Node> {
        tokenize(source, &context())
    }

    fn tok(kind: ElementType, literal: &str) -> Node {
        Node::new(kind, literal)
    }

    #[test]
    fn test_plain_text_and_newlines() {
        let source = "Lorem ipsum dolor sit amet.\n\nLorem ipsum dolor sit amet.";
        assert_eq!(
            lex(source),
            vec![
                tok(ElementType::Text, "Lorem ipsum dolor sit amet."),
                tok(ElementType::Newline, "\n\n"),
                tok(ElementType::Text, "Lorem ipsum dolor sit amet."),
            ]
        );
    }

    #[test]
    fn test_styled_text() {
        assert_eq!(
            lex("this is &bold& text\nthis is /italic/ text"),
            vec![
                tok(ElementType::Text, "this is "),
                tok(ElementType::BlockSymbol, "&"),
                tok(ElementType::Text, "bold"),
                tok(ElementType::BlockSymbol, "&"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "text"),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::Text, "this is "),
                tok(ElementType::BlockSymbol, "/"),
                tok(ElementType::Text, "italic"),
                tok(ElementType::BlockSymbol, "/"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "text"),
            ]
        );
    }

    #[test]
    fn test_underline_strike_quote_symbols() {
        let kinds: Vec<_> = lex("_a_~b~\"c\"").iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementType::BlockSymbol,
                ElementType::Text,
                ElementType::BlockSymbol,
                ElementType::BlockSymbol,
                ElementType::Text,
                ElementType::BlockSymbol,
                ElementType::BlockSymbol,
                ElementType::Text,
                ElementType::BlockSymbol,
            ]
        );
    }

    #[test]
    fn test_divider() {
        assert_eq!(lex("=line="), vec![tok(ElementType::Divider, "line")]);
        assert_eq!(lex("= 24 ="), vec![tok(ElementType::Divider, "24")]);
        assert_eq!(lex("=="), vec![tok(ElementType::Divider, "")]);
    }

    #[test]
    fn test_divider_escaped_delimiter_does_not_close() {
        assert_eq!(lex("=a\\=b="), vec![tok(ElementType::Divider, "a\\=b")]);
    }

    #[test]
    fn test_equals_inside_text_is_plain() {
        assert_eq!(lex("a=b"), vec![tok(ElementType::Text, "a=b")]);
    }

    #[test]
    fn test_ignore_block_is_verbatim() {
        assert_eq!(
            lex("`ignore ~syntax~ here`"),
            vec![tok(ElementType::Ignore, "ignore ~syntax~ here")]
        );
        assert_eq!(
            lex("` kept \\` x"),
            vec![
                tok(ElementType::Ignore, " kept \\"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "x"),
            ]
        );
    }

    #[test]
    fn test_unterminated_ignore_runs_to_end() {
        assert_eq!(
            lex("`never closed &x&"),
            vec![tok(ElementType::Ignore, "never closed &x&")]
        );
    }

    #[test]
    fn test_color_span_tokens() {
        assert_eq!(
            lex("<color this text#FF0000>"),
            vec![
                tok(ElementType::ColorStart, "<"),
                tok(ElementType::Text, "color this text"),
                tok(ElementType::ColorHex, "#FF0000"),
                tok(ElementType::ColorEnd, ">"),
            ]
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            lex("(https://www.google.com)\nSearch (here@http://www.google.com)"),
            vec![
                tok(ElementType::Link, "https://www.google.com"),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::Text, "Search "),
                tok(ElementType::HyperLink, "here@http://www.google.com"),
            ]
        );
    }

    #[test]
    fn test_typed_embeds_keep_only_url() {
        assert_eq!(
            lex("(img@https://picsum.photos/id/67/300/200)\n(ytb@https://youtu.be/x)(vid@http://v/a.mp4)"),
            vec![
                tok(ElementType::Image, "https://picsum.photos/id/67/300/200"),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::Youtube, "https://youtu.be/x"),
                tok(ElementType::Video, "http://v/a.mp4"),
            ]
        );
    }

    #[test]
    fn test_non_link_parentheses_are_text() {
        assert_eq!(
            lex("(just an aside)"),
            vec![tok(ElementType::Text, "(just an aside)")]
        );
        assert_eq!(lex("( spaced )"), vec![tok(ElementType::Text, "(spaced)")]);
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            lex("\\\"this should not show as quote\\\""),
            vec![
                tok(ElementType::Escape, "\""),
                tok(ElementType::Text, "this should not show as quote"),
                tok(ElementType::Escape, "\""),
            ]
        );
    }

    #[test]
    fn test_trailing_backslash_is_text() {
        assert_eq!(
            lex("end\\"),
            vec![tok(ElementType::Text, "end"), tok(ElementType::Text, "\\")]
        );
    }

    #[test]
    fn test_headings() {
        assert_eq!(
            lex("#1 heading 1\n#2 heading 2"),
            vec![
                tok(ElementType::Header, "#1"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "heading 1"),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::Header, "#2"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "heading 2"),
            ]
        );
    }

    #[test]
    fn test_hash_disambiguation() {
        assert_eq!(lex("#7"), vec![tok(ElementType::ColorHex, "#7")]);
        assert_eq!(lex("#12"), vec![tok(ElementType::ColorHex, "#12")]);
        assert_eq!(lex("#"), vec![tok(ElementType::Text, "#")]);
        assert_eq!(
            lex("# x"),
            vec![
                tok(ElementType::ColorHex, "#"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "x"),
            ]
        );
    }

    #[test]
    fn test_code_block() {
        let source = "{\n.py\ndef main():\n    print(\"Hello World!\")\n}";
        assert_eq!(
            lex(source),
            vec![tok(
                ElementType::Code,
                ".py\ndef main():\n    print(\"Hello World!\")"
            )]
        );
    }

    #[test]
    fn test_code_block_nested_braces() {
        assert_eq!(
            lex("{fn main() { if x { y } }} after"),
            vec![
                tok(ElementType::Code, "fn main() { if x { y } }"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "after"),
            ]
        );
    }

    #[test]
    fn test_code_block_substitutes_placeholders() {
        assert_eq!(
            lex("{ // output : $millis at $datetime }"),
            vec![tok(
                ElementType::Code,
                "// output : 1709647629000 at 05/03/2024 02:07:09 PM"
            )]
        );
    }

    #[test]
    fn test_datetime_block() {
        assert_eq!(
            lex("date: %dd/MM/yyyy%"),
            vec![
                tok(ElementType::Text, "date: "),
                tok(ElementType::DateTime, "05/03/2024"),
            ]
        );
    }

    #[test]
    fn test_invalid_datetime_falls_back_to_text() {
        assert_eq!(lex("%bb%"), vec![tok(ElementType::Text, "bb")]);
        assert_eq!(lex("%QQQ yyyy%"), vec![tok(ElementType::DateTime, "Q1 2024")]);
    }

    #[test]
    fn test_list_markers() {
        assert_eq!(
            lex("* unordered item\n*o unchecked item\n*x checked item"),
            vec![
                tok(ElementType::Element, "*"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "unordered item"),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::Element, "*o"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "unchecked item"),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::Element, "*x"),
                tok(ElementType::Whitespace, " "),
                tok(ElementType::Text, "checked item"),
            ]
        );
        assert_eq!(lex("*"), vec![tok(ElementType::Text, "*")]);
    }

    #[test]
    fn test_table_tokens() {
        assert_eq!(
            lex("[\na    |b\ntrue |true\n]"),
            vec![
                tok(ElementType::TableStart, "["),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::Text, "a    "),
                tok(ElementType::Pipe, "|"),
                tok(ElementType::Text, "b"),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::Text, "true "),
                tok(ElementType::Pipe, "|"),
                tok(ElementType::Text, "true"),
                tok(ElementType::Newline, "\n"),
                tok(ElementType::TableEnd, "]"),
            ]
        );
    }

    #[test]
    fn test_stray_closers_are_text() {
        assert_eq!(
            lex(")}"),
            vec![tok(ElementType::Text, ")"), tok(ElementType::Text, "}")]
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(lex("").is_empty());
        let ctx = context();
        let mut lexer = Lexer::new("", &ctx);
        assert!(lexer.next_token().is_eof());
        assert!(lexer.next_token().is_eof());
    }
}
