//! Login and register pages. Both are the same two-field form with
//! different rules and a different way out.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use stockroom_core::models::Field;

use super::{button, error_line, input_line};
use crate::forms::{CredentialsFocus, CredentialsForm, CredentialsKind};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

/// Visible width of the username and password boxes
const FIELD_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, form: &CredentialsForm, area: Rect) {
    let (title, action, busy_label, switch_hint) = match form.kind {
        CredentialsKind::Login => (" Sign in ", "Login", "Logging in...", "[Ctrl+R] Create an account"),
        CredentialsKind::Register => (
            " Create account ",
            "Register",
            "Creating account...",
            "[Ctrl+L] Back to login",
        ),
    };

    let mut lines = vec![Line::from("")];

    lines.push(input_line(
        "Username:",
        form.username.clone(),
        FIELD_WIDTH,
        form.focus == CredentialsFocus::Username,
    ));
    lines.extend(error_line(form.errors.get(Field::Username)));

    // Mask by char count so multibyte input lines up
    let masked = "*".repeat(form.password.chars().count().min(FIELD_WIDTH));
    lines.push(input_line(
        "Password:",
        masked,
        FIELD_WIDTH,
        form.focus == CredentialsFocus::Password,
    ));
    lines.extend(error_line(form.errors.get(Field::Password)));

    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from(Span::styled(
            format!("            {}", busy_label),
            styles::highlight_style(),
        )));
    } else {
        let mut spans = vec![Span::raw("            ")];
        spans.extend(button(action, form.focus == CredentialsFocus::Button));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", switch_hint),
        styles::muted_style(),
    )));

    let height = lines.len() as u16 + 2;
    let dialog = centered_rect_fixed(50, height, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}
