//! Name tables, date captions and markup serialization.

use std::fmt::Write;

use tracing::info;

use crate::calendar::compute_grid;
use crate::scene::{Dom, Node, Surface, build_drawing, build_scene};
use crate::types::{
    CalendarDate, GraphContext, MONTH_ABBREVS, MONTH_NAMES, OutputFormat, SVG_NAMESPACE,
};

/// Three-letter month abbreviation for a 1-based month.
pub fn month_abbrev(month: u32) -> &'static str {
    MONTH_ABBREVS[(month - 1) as usize]
}

/// Full English month name for a 1-based month.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

/// Zero-padded `YYYY-MM-DD` key.
pub fn normalized_key(date: CalendarDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Human-readable start date, e.g. `3 January 2021`.
pub fn format_since(date: CalendarDate) -> String {
    format!("{} {} {}", date.day(), month_name(date.month()), date.year())
}

/// Render the graph described by `ctx` to a markup string ending in a newline.
pub fn render_markup(ctx: &GraphContext) -> String {
    info!(
        start = %normalized_key(ctx.start),
        format = ?ctx.format,
        "rendering activity graph"
    );

    let grid = compute_grid(ctx.start);
    let mut dom = Dom;
    let node = match ctx.format {
        OutputFormat::Html => build_scene(&mut dom, ctx.start, &grid, ctx.owner.as_deref()),
        OutputFormat::Svg => {
            let mut svg = build_drawing(&mut dom, &grid);
            dom.set_attribute(&mut svg, "xmlns", SVG_NAMESPACE);
            svg
        }
    };

    let mut markup = to_markup(&node);
    markup.push('\n');
    markup
}

/// Serialize a node tree to markup.
///
/// Every element gets an explicit closing tag so the output reads the same
/// as HTML and as XML.
pub fn to_markup(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Fragment(children) => {
            for child in children {
                write_node(out, child);
            }
        }
        Node::Element {
            tag,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                // Writing to a String cannot fail
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
            out.push('>');
            for child in children {
                write_node(out, child);
            }
            let _ = write!(out, "</{}>", tag);
        }
    }
}

/// Escape text for use in element content and quoted attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
