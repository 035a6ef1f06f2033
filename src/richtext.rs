//! Inline markup used by heading and paragraph blocks.
//!
//! Layout strategies describe emphasis with a small markdown-inspired syntax (`**bold**`,
//! `*italic*` and `[color=#RRGGBB]{text}`).  Free text coming from the resume is passed through
//! [`escape_markup`] before it is embedded, so user input such as `5 * 3` or `[draft]` is printed
//! literally instead of being interpreted.  The builder turns markup into [`Span`]s with
//! [`parse_markup`] and from there into [`genpdf`] styled strings.
//!
//! [genpdf]: https://docs.rs/genpdf/

use std::fmt;

use genpdf::style::{Color, Style, StyledString};

const ESCAPED_CHARACTERS: &[char] = &['\\', '*', '[', ']', '{', '}'];

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns whether the span should be rendered in italic.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Returns the configured color for the span, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }

    /// Converts the span to a [`StyledString`] layered on top of `base`.
    ///
    /// Span attributes win over the base style, so a bold span inside a regular paragraph is bold
    /// while keeping the paragraph's font size.
    pub fn to_styled_string(&self, base: Style) -> StyledString {
        StyledString::new(self.text.clone(), base.and(self.to_style()))
    }
}

/// Escapes every markup-significant character in `text`.
///
/// The result parses back into a single unstyled span containing `text` verbatim.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED_CHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Returns the text of `markup` with all styling removed.
pub fn plain_text(markup: &str) -> Result<String, ParseError> {
    Ok(parse_markup(markup)?
        .iter()
        .map(Span::text)
        .collect::<String>())
}

/// Parse errors produced by [`parse_markup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    index: usize,
    message: String,
}

impl ParseError {
    fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }

    /// Byte index in the original input string where the error was detected.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Human-readable description of the parsing error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.index)
    }
}

impl std::error::Error for ParseError {}

#[derive(Clone, Copy, Debug, Default)]
struct StyleState {
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl StyleState {
    fn to_span(self, text: impl Into<String>) -> Span {
        Span {
            text: text.into(),
            bold: self.bold,
            italic: self.italic,
            color: self.color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
    Color,
}

impl Marker {
    fn closing_token(self) -> &'static str {
        match self {
            Marker::Bold => "**",
            Marker::Italic => "*",
            Marker::Color => "}",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Marker::Bold => "bold span",
            Marker::Italic => "italic span",
            Marker::Color => "color span",
        }
    }
}

/// Parses inline markup into a list of [`Span`]s.
///
/// The supported constructs are:
///
/// - `**bold**` for bold text
/// - `*italic*` for italic text
/// - `[color=#RRGGBB]{text}` for colored text
/// - a backslash before `\`, `*`, `[`, `]`, `{` or `}` to print that character literally
///
/// Adjacent characters sharing a style end up in the same span.
pub fn parse_markup(input: &str) -> Result<Vec<Span>, ParseError> {
    let (spans, _) = parse_inner(input, 0, StyleState::default(), None)?;
    Ok(spans)
}

fn parse_inner(
    input: &str,
    mut index: usize,
    state: StyleState,
    closing_marker: Option<Marker>,
) -> Result<(Vec<Span>, usize), ParseError> {
    let mut spans = Vec::new();
    let mut buffer = String::new();

    while let Some(ch) = input[index..].chars().next() {
        if ch == '\\' {
            match input[index + 1..].chars().next() {
                Some(next) if ESCAPED_CHARACTERS.contains(&next) => {
                    buffer.push(next);
                    index += 1 + next.len_utf8();
                }
                _ => {
                    buffer.push('\\');
                    index += 1;
                }
            }
            continue;
        }

        if let Some(marker) = closing_marker {
            if input[index..].starts_with(marker.closing_token()) {
                flush_buffer(&mut buffer, &mut spans, state);
                index += marker.closing_token().len();
                return Ok((spans, index));
            }
        }

        if input[index..].starts_with("**") {
            flush_buffer(&mut buffer, &mut spans, state);
            let nested_state = StyleState {
                bold: true,
                ..state
            };
            let (nested, new_index) =
                parse_inner(input, index + 2, nested_state, Some(Marker::Bold))?;
            spans.extend(nested);
            index = new_index;
            continue;
        }

        if ch == '*' {
            flush_buffer(&mut buffer, &mut spans, state);
            let nested_state = StyleState {
                italic: true,
                ..state
            };
            let (nested, new_index) =
                parse_inner(input, index + 1, nested_state, Some(Marker::Italic))?;
            spans.extend(nested);
            index = new_index;
            continue;
        }

        if input[index..].starts_with("[color=") {
            let (color, after_directive) = parse_color_directive(input, index)?;
            flush_buffer(&mut buffer, &mut spans, state);
            let nested_state = StyleState {
                color: Some(color),
                ..state
            };
            let (nested, new_index) =
                parse_inner(input, after_directive, nested_state, Some(Marker::Color))?;
            spans.extend(nested);
            index = new_index;
            continue;
        }

        match ch {
            '}' => {
                return Err(ParseError::new(
                    index,
                    "unexpected closing token `}` without matching opening `[color=...]`",
                ))
            }
            ']' => return Err(ParseError::new(index, "unexpected closing token `]`")),
            '[' | '{' => {
                return Err(ParseError::new(
                    index,
                    "unsupported directive; expected `[color=#RRGGBB]{...}`",
                ))
            }
            _ => {}
        }

        buffer.push(ch);
        index += ch.len_utf8();
    }

    if let Some(marker) = closing_marker {
        Err(ParseError::new(
            index,
            format!("unterminated {}", marker.description()),
        ))
    } else {
        flush_buffer(&mut buffer, &mut spans, state);
        Ok((spans, index))
    }
}

fn flush_buffer(buffer: &mut String, spans: &mut Vec<Span>, state: StyleState) {
    if buffer.is_empty() {
        return;
    }
    let text = std::mem::take(buffer);
    match spans.last_mut() {
        Some(last)
            if last.bold == state.bold
                && last.italic == state.italic
                && last.color == state.color =>
        {
            last.text.push_str(&text)
        }
        _ => spans.push(state.to_span(text)),
    }
}

fn hex_channel(input: &str, start: usize) -> Result<u8, ParseError> {
    u8::from_str_radix(&input[start..start + 2], 16).map_err(|_| {
        ParseError::new(
            start,
            "invalid RGB specification; use hexadecimal digits only",
        )
    })
}

fn parse_color_directive(input: &str, index: usize) -> Result<(Color, usize), ParseError> {
    const PREFIX: &str = "[color=";
    let start_hex = index + PREFIX.len();
    if !input[start_hex..].starts_with('#') {
        return Err(ParseError::new(
            start_hex,
            "expected `#` followed by a hexadecimal RGB value",
        ));
    }

    let hex_start = start_hex + 1;
    let hex_end = hex_start + 6;
    if hex_end > input.len() || !input.is_char_boundary(hex_end) {
        return Err(ParseError::new(
            hex_start,
            "incomplete color specification; expected 6 hexadecimal digits",
        ));
    }

    if !input[hex_start..hex_end]
        .chars()
        .all(|c| c.is_ascii_hexdigit())
    {
        return Err(ParseError::new(
            hex_start,
            "invalid RGB specification; use hexadecimal digits only",
        ));
    }

    let r = hex_channel(input, hex_start)?;
    let g = hex_channel(input, hex_start + 2)?;
    let b = hex_channel(input, hex_start + 4)?;

    if !input[hex_end..].starts_with(']') {
        return Err(ParseError::new(
            hex_end,
            "expected `]` to close color directive",
        ));
    }

    let brace_index = hex_end + 1;
    if !input[brace_index..].starts_with('{') {
        return Err(ParseError::new(
            brace_index,
            "expected `{` to start the colored text",
        ));
    }

    Ok((Color::Rgb(r, g, b), brace_index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_style_is_layered_on_base() {
        let base = Style::new().with_font_size(14);
        let spans = parse_markup("[color=#0A141E]{**Hello**}").expect("parse succeeds");
        assert_eq!(spans.len(), 1);
        let styled = spans[0].to_styled_string(base);
        assert_eq!(styled.s, "Hello");
        assert!(styled.style.is_bold());
        assert!(!styled.style.is_italic());
        assert_eq!(styled.style.font_size(), 14);
        assert_eq!(styled.style.color(), Some(Color::Rgb(10, 20, 30)));
    }

    #[test]
    fn parse_plain_text() {
        let spans = parse_markup("Hello world").expect("parse succeeds");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "Hello world");
        assert!(!spans[0].is_bold());
    }

    #[test]
    fn parse_nested_styles() {
        let spans = parse_markup("This is **very *cool***!").expect("parse succeeds");
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].text(), "This is ");
        assert!(spans[1].is_bold());
        assert_eq!(spans[1].text(), "very ");
        assert!(spans[2].is_bold());
        assert!(spans[2].is_italic());
        assert_eq!(spans[2].text(), "cool");
        assert_eq!(spans[3].text(), "!");
        assert!(!spans[3].is_bold());
    }

    #[test]
    fn parse_color_directive() {
        let spans = parse_markup("[color=#ff0000]{Red} text").expect("parse succeeds");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text(), "Red");
        assert_eq!(spans[0].color(), Some(Color::Rgb(0xff, 0x00, 0x00)));
        assert_eq!(spans[1].text(), " text");
    }

    #[test]
    fn escaped_text_is_printed_literally() {
        let raw = r"5 * 3 = **15** [draft] {x} C:\temp";
        let escaped = escape_markup(raw);
        let spans = parse_markup(&escaped).expect("escaped text parses");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), raw);
        assert!(!spans[0].is_bold());
        assert!(!spans[0].is_italic());
    }

    #[test]
    fn escaped_text_mixes_with_markup() {
        let markup = format!("**{}** at {}", escape_markup("C*O"), escape_markup("[Acme]"));
        assert_eq!(plain_text(&markup).expect("parse succeeds"), "C*O at [Acme]");
        let spans = parse_markup(&markup).expect("parse succeeds");
        assert!(spans[0].is_bold());
        assert_eq!(spans[0].text(), "C*O");
    }

    #[test]
    fn lone_backslash_is_kept() {
        assert_eq!(plain_text(r"a\b").expect("parse succeeds"), r"a\b");
        assert_eq!(plain_text("end\\").expect("parse succeeds"), "end\\");
    }

    #[test]
    fn error_on_unterminated_bold() {
        let err = parse_markup("**oops").unwrap_err();
        assert!(err.message().contains("unterminated bold"));
    }

    #[test]
    fn error_on_unescaped_user_asterisk() {
        assert!(parse_markup("5 * 3").is_err());
    }

    #[test]
    fn error_on_invalid_color() {
        let err = parse_markup("[color=#12FG34]{x}").unwrap_err();
        assert!(err.message().contains("invalid RGB"));
    }
}
