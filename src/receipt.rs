//! Receipt
//!
//! Terminal rendering for carts, checkout summaries, catalog pages and order history.

use std::{fmt::Write, io};

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::CatalogPage,
    checkout::{CheckoutSnapshot, Order},
    pricing::format_price,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes the lines and totals of a checkout snapshot.
///
/// An empty snapshot prints a single "empty cart" line instead of a table.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_summary(mut out: impl io::Write, snapshot: &CheckoutSnapshot) -> Result<(), ReceiptError> {
    if snapshot.items().is_empty() {
        return writeln!(out, "\nYour cart is empty.\n").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Unit Price", "Qty", "Line Total"]);

    for line in snapshot.items() {
        builder.push_record([
            format!("#{}", line.product.id),
            line.product.name.clone(),
            format_price(line.product.price),
            line.quantity.to_string(),
            format_price(line.line_total()),
        ]);
    }

    write_table(&mut out, builder, 2..5)?;

    write_totals(
        &mut out,
        &[
            ("Subtotal:", snapshot.subtotal()),
            ("Shipping:", snapshot.shipping()),
            ("Total:", snapshot.total()),
        ],
    )
}

/// Writes one page of catalog results with its page position.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_products(mut out: impl io::Write, page: &CatalogPage<'_>) -> Result<(), ReceiptError> {
    if page.products.is_empty() {
        return writeln!(out, "\nNo products match these filters.\n").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Category", "Price", "Popularity"]);

    for product in &page.products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.label().to_string(),
            format_price(product.price),
            product.popularity.to_string(),
        ]);
    }

    write_table(&mut out, builder, 3..5)?;

    writeln!(
        out,
        " Page {} of {} ({} products)\n",
        page.page, page.total_pages, page.total_matches
    )
    .map_err(|_err| ReceiptError::IO)
}

/// Writes the order history, newest first as stored.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_orders(mut out: impl io::Write, orders: &[Order]) -> Result<(), ReceiptError> {
    if orders.is_empty() {
        return writeln!(out, "\nNo orders yet.\n").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Placed", "Items", "Status", "Total"]);

    for order in orders {
        builder.push_record([
            format!("#{}", order.id()),
            order.created_at().strftime("%Y-%m-%d %H:%M UTC").to_string(),
            order.total_items().to_string(),
            order.status().to_string(),
            format_price(order.total()),
        ]);
    }

    write_table(&mut out, builder, 4..5)?;

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Writes the lines of a single order followed by its recorded total.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_order(mut out: impl io::Write, order: &Order) -> Result<(), ReceiptError> {
    writeln!(
        out,
        "\n Order #{} ({})",
        order.id(),
        order.status()
    )
    .map_err(|_err| ReceiptError::IO)?;

    let mut builder = Builder::default();

    builder.push_record(["Item", "Unit Price", "Qty", "Line Total"]);

    for item in order.items() {
        builder.push_record([
            item.name.clone(),
            format_price(item.price),
            item.quantity.to_string(),
            format_price(item.line_total()),
        ]);
    }

    write_table(&mut out, builder, 1..4)?;

    write_totals(&mut out, &[("Total:", order.total())])
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: std::ops::Range<usize>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

fn write_totals(out: &mut impl io::Write, rows: &[(&str, Decimal)]) -> Result<(), ReceiptError> {
    let values: Vec<String> = rows.iter().map(|(_, amount)| format_price(*amount)).collect();

    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let value_width = values.iter().map(|value| value.chars().count()).max().unwrap_or(0);

    for ((label, _), value) in rows.iter().zip(&values) {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}").map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Wraps runs of box-drawing characters (U+2500..U+257F) in ANSI dark grey.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
