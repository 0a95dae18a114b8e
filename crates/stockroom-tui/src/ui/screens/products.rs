use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use stockroom_core::utils::truncate;

use crate::app::{App, AppState};
use crate::ui::styles;

/// Column width for product names in the list
const NAME_WIDTH: usize = 28;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_search(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_list(frame, app, body[0]);
    render_detail(frame, app, body[1]);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let searching = matches!(app.state, AppState::Searching);
    let line = if app.search_query.is_empty() && !searching {
        Line::from(Span::styled(
            " Press / to search by name or description",
            styles::muted_style(),
        ))
    } else {
        let cursor = if searching { "▌" } else { "" };
        Line::from(vec![
            Span::styled(" Search: ", styles::muted_style()),
            Span::styled(format!("{}{}", app.search_query, cursor), styles::search_style()),
        ])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(searching));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_products();

    let title = if app.search_query.is_empty() {
        format!(" Products ({}) ", app.products.len())
    } else {
        format!(" Products ({} of {}) ", visible.len(), app.products.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if visible.is_empty() {
        let message = if app.products_loading {
            "Loading products..."
        } else if app.products.is_empty() {
            "No products yet. Press n to add one."
        } else {
            "No products match your search."
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {}", message),
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let style = if i == app.selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<width$}", truncate(&product.name, NAME_WIDTH), width = NAME_WIDTH),
                    style,
                ),
                Span::styled(format!(" {:>12}", product.price_display()), styles::price_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let lines = match app.selected_product() {
        Some(product) => vec![
            Line::from(Span::styled(product.name.clone(), styles::title_style())),
            Line::from(Span::styled(
                format!("#{}", product.id),
                styles::muted_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(product.price_display(), styles::price_style())),
            Line::from(""),
            Line::from(product.description.clone()),
            Line::from(""),
            Line::from(vec![
                Span::styled("[e]", styles::help_key_style()),
                Span::styled("dit  ", styles::muted_style()),
                Span::styled("[d]", styles::help_key_style()),
                Span::styled("elete", styles::muted_style()),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "Select a product from the list",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
