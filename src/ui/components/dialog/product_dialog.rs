//! Product catalog dialog

use super::base::{render_dialog, text_width, wrap_text, DialogConfig};
use crate::state::catalog::{Product, PRODUCTS};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const MAX_WIDTH: u16 = 72;

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Wrap a bullet item, indenting continuation lines under the text
fn bullet(text: &str, width: usize) -> Vec<Line<'static>> {
    wrap_text(text, width.saturating_sub(2))
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let marker = if i == 0 { "• " } else { "  " };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::raw(line),
            ])
        })
        .collect()
}

/// Build the wrapped body for a product
fn product_body(product: &Product, width: usize) -> Vec<Line<'static>> {
    // One dot per catalog entry, the current one filled
    let dots: Vec<Span> = PRODUCTS
        .iter()
        .map(|p| {
            if p.key == product.key {
                Span::styled("● ", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let mut body = vec![Line::from(dots), Line::from(""), heading("Technical Specifications")];
    for spec in product.specifications {
        body.extend(bullet(spec, width));
    }

    body.push(Line::from(""));
    body.push(heading("Applications"));
    body.extend(wrap_text(product.applications, width).into_iter().map(Line::from));

    body.push(Line::from(""));
    body.push(heading("Benefits"));
    for benefit in product.benefits {
        body.extend(bullet(benefit, width));
    }
    body
}

/// Render the product dialog for the selected product
pub fn render_product_dialog(frame: &mut Frame, product: &Product, scroll: usize) {
    let key_style = Style::default().fg(Color::Cyan);
    let hint = vec![
        Span::styled("←/→", key_style),
        Span::raw(": product  "),
        Span::styled("j/k", key_style),
        Span::raw(": scroll  "),
        Span::styled("Enter", key_style),
        Span::raw(": get quote  "),
        Span::styled("Esc", key_style),
        Span::raw(": close"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: product.title,
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            body: product_body(product, text_width(MAX_WIDTH)),
            hint: Some(hint),
            max_width: MAX_WIDTH,
            scroll,
        },
    );
}
