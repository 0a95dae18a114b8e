pub mod auth;
pub mod product_form;
pub mod products;

use ratatui::text::{Line, Span};

use crate::ui::styles;

/// A labelled single-line input: `Label: [value▌]`.
pub(crate) fn input_line<'a>(label: &'a str, value: String, width: usize, focused: bool) -> Line<'a> {
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::styled(format!("  {:<12}[", label), styles::muted_style()),
        Span::styled(
            format!("{:<width$}{}", value, cursor, width = width),
            styles::field_style(focused),
        ),
        Span::styled("]", styles::muted_style()),
    ])
}

/// The message under a field, if it has one.
pub(crate) fn error_line(message: Option<&str>) -> Option<Line<'static>> {
    message.map(|m| {
        Line::from(Span::styled(
            format!("  {:<12} {}", "", m),
            styles::error_style(),
        ))
    })
}

/// A focusable button: `[ ▶ Label ◀ ]` when focused.
pub(crate) fn button<'a>(label: &str, focused: bool) -> Vec<Span<'a>> {
    let text = if focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    vec![
        Span::raw("["),
        Span::styled(text, styles::field_style(focused)),
        Span::raw("]"),
    ]
}
