use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use stockroom_core::Route;

use crate::app::{App, AppState, ToastKind};

use super::screens::{auth, product_form, products};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Page
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_page(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::ConfirmingDelete => render_delete_overlay(frame, app),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Stockroom";
    let right = match app.user {
        Some(ref user) if app.route.is_protected() => format!("{}  [?] Help", user.username),
        _ => "[?] Help".to_string(),
    };

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + right.chars().count() + 2),
        )),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Home => {}
        Route::Login => auth::render(frame, &app.login_form, area),
        Route::Register => auth::render(frame, &app.register_form, area),
        // Protected pages show nothing until the guard lets them through
        Route::Products => {
            app.guard.render(|| products::render(frame, app, area));
        }
        Route::NewProduct | Route::EditProduct(_) => {
            app.guard
                .render(|| product_form::render(frame, &app.product_form, area));
        }
    }
}

fn shortcuts(app: &App) -> &'static str {
    match (app.route, app.state) {
        (_, AppState::Searching) => "[Enter] done | [Esc] clear",
        (Route::Products, _) => "[n]ew | [e]dit | [d]elete | [r]efresh | [L]ogout | [q]uit",
        (Route::NewProduct | Route::EditProduct(_), _) => "[Esc] back",
        _ => "[Tab] next field | [Esc] quit",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (left_text, left_style) = match app.toast {
        Some(ref toast) => {
            let style = match toast.kind {
                ToastKind::Success => styles::success_style(),
                ToastKind::Error => styles::error_style(),
            };
            (format!(" {} ", toast.message), style)
        }
        None if app.is_busy() => (" Working... ".to_string(), styles::highlight_style()),
        None => (format!(" {} ", app.route), styles::muted_style()),
    };

    let right_text = format!(" {} ", shortcuts(app));
    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_row(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", keys), styles::help_key_style()),
        Span::styled(description, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            format!("  Stockroom {}", version),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Forms", styles::highlight_style())),
        help_row("Tab/↓", "Next field"),
        help_row("S-Tab/↑", "Previous field"),
        help_row("Enter", "Next field / press button"),
        help_row("Ctrl+R", "Login: create an account"),
        help_row("Ctrl+L", "Register: back to login"),
        Line::from(""),
        Line::from(Span::styled(" Products", styles::highlight_style())),
        help_row("↑/↓ j/k", "Move selection"),
        help_row("/", "Search"),
        help_row("n", "New product"),
        help_row("e/Enter", "Edit selected"),
        help_row("d/Del", "Delete selected"),
        help_row("r", "Refresh"),
        help_row("L", "Log out"),
        help_row("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
pub(crate) fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn confirm_lines(question: String, action: &'static str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(question, styles::highlight_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(format!(" to {}, ", action), styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ]
}

fn render_confirm(frame: &mut Frame, lines: Vec<Line<'static>>) {
    let area = centered_rect_fixed(50, 6, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    render_confirm(
        frame,
        confirm_lines("   Are you sure you want to quit?".to_string(), "quit"),
    );
}

fn render_delete_overlay(frame: &mut Frame, app: &App) {
    let name = app
        .pending_delete
        .as_ref()
        .map(|p| stockroom_core::utils::truncate(&p.name, 24))
        .unwrap_or_default();
    render_confirm(
        frame,
        confirm_lines(format!("   Delete \"{}\"?", name), "delete"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect_fixed(50, 10, outer);
        assert_eq!(inner, Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let outer = Rect::new(2, 1, 30, 8);
        let inner = centered_rect_fixed(50, 10, outer);
        assert_eq!(inner, Rect::new(2, 1, 30, 8));
    }
}
