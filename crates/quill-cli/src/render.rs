use crossterm::style::{Color, Stylize};
use quill_core::theme::{Rgb, StyledSpan, TextStyle};

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn paint(text: &str, style: &TextStyle) -> String {
    let mut styled = text.with(to_color(style.foreground));
    if style.bold {
        styled = styled.bold();
    }
    if style.italic {
        styled = styled.italic();
    }
    styled.to_string()
}

/// Render `text` with one ANSI style per span. Spans are character ranges;
/// characters outside every span are printed unstyled.
pub fn render_ansi(text: &str, spans: &[StyledSpan]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() * 2);
    let mut cursor = 0usize;

    for span in spans {
        let start = span.range.start.min(chars.len());
        let end = span.range.end.min(chars.len());
        if start > cursor {
            out.extend(&chars[cursor..start]);
        }
        if end > start {
            // Style each line separately so a reset lands before every newline.
            let piece: String = chars[start..end].iter().collect();
            for (i, line) in piece.split('\n').enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                if !line.is_empty() {
                    out.push_str(&paint(line, &span.style));
                }
            }
        }
        cursor = cursor.max(end);
    }
    if cursor < chars.len() {
        out.extend(&chars[cursor..]);
    }
    out
}
