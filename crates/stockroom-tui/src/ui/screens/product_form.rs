use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use stockroom_core::models::Field;

use super::{button, error_line, input_line};
use crate::forms::{ProductFocus, ProductForm};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

const FIELD_WIDTH: usize = 36;

pub fn render(frame: &mut Frame, form: &ProductForm, area: Rect) {
    let title = match form.product_id {
        Some(id) => format!(" Edit product #{} ", id),
        None => " New product ".to_string(),
    };

    let mut lines = vec![Line::from("")];

    if form.loading {
        lines.push(Line::from(Span::styled(
            "  Loading product...",
            styles::highlight_style(),
        )));
    } else {
        // Long values scroll: show the tail so the cursor stays visible
        let tail = |value: &str| {
            let count = value.chars().count();
            value.chars().skip(count.saturating_sub(FIELD_WIDTH)).collect::<String>()
        };

        lines.push(input_line(
            "Name:",
            tail(&form.name),
            FIELD_WIDTH,
            form.focus == ProductFocus::Name,
        ));
        lines.extend(error_line(form.errors.get(Field::Name)));

        lines.push(input_line(
            "Description:",
            tail(&form.description),
            FIELD_WIDTH,
            form.focus == ProductFocus::Description,
        ));
        lines.extend(error_line(form.errors.get(Field::Description)));

        lines.push(input_line(
            "Price ($):",
            form.price.clone(),
            FIELD_WIDTH,
            form.focus == ProductFocus::Price,
        ));
        lines.extend(error_line(form.errors.get(Field::Price)));

        lines.push(Line::from(""));
        if form.submitting {
            lines.push(Line::from(Span::styled(
                "              Saving...",
                styles::highlight_style(),
            )));
        } else {
            let action = if form.is_edit() { "Update" } else { "Create" };
            let mut spans = vec![Span::raw("              ")];
            spans.extend(button(action, form.focus == ProductFocus::Save));
            spans.push(Span::raw("  "));
            spans.extend(button("Cancel", form.focus == ProductFocus::Cancel));
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [Tab] next field  [Enter] confirm  [Esc] back to list",
        styles::muted_style(),
    )));

    let height = lines.len() as u16 + 2;
    let dialog = centered_rect_fixed(64, height, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}
