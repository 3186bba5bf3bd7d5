//! Scene construction: turns a computed [`Grid`] into a tree of visual nodes.
//!
//! Every element goes through [`h`], which is generic over the [`Surface`]
//! that owns the nodes. [`Dom`] is the in-memory surface used by the CLI;
//! its [`Node`] tree is serialized by [`crate::formatter::to_markup`].

use std::fmt;

use tracing::debug;

use crate::formatter::format_since;
use crate::types::{
    BAND_OFFSET, CELL_PITCH, CELL_RADIUS, CELL_SIZE, COLUMNS_PER_BAND, CalendarDate, DayCell,
    FIELD_HEIGHT, FIELD_WIDTH, Grid, SCALE, TEXT_OFFSET_Y, WEEKDAY_LABEL_WIDTH,
};

/// Row labels drawn left of each band, with their baseline before the text offset.
const ROW_LABELS: [(&str, u32); 3] = [("Mon", 30), ("Wed", 60), ("Fri", 90)];

/// A target that can create and assemble nodes.
pub trait Surface {
    type Node;

    fn create_element(&mut self, tag: &str) -> Self::Node;
    fn create_text(&mut self, text: &str) -> Self::Node;
    /// Container whose children are attached directly to the parent.
    fn create_fragment(&mut self) -> Self::Node;
    fn set_attribute(&mut self, node: &mut Self::Node, name: &str, value: &str);
    fn append_child(&mut self, parent: &mut Self::Node, child: Self::Node);
}

/// Child passed to [`h`].
pub enum Child<N> {
    Node(N),
    Text(String),
    /// Skipped when appending.
    Null,
}

impl<N> Child<N> {
    pub fn text(value: impl fmt::Display) -> Self {
        Child::Text(value.to_string())
    }
}

/// Attribute pair with the value rendered through `Display`.
pub fn attr<'a>(name: &'a str, value: impl fmt::Display) -> (&'a str, String) {
    (name, value.to_string())
}

/// Build an element: set every attribute verbatim, then append the children
/// in order, turning text into text nodes and skipping nulls.
pub fn h<S: Surface>(
    surface: &mut S,
    tag: &str,
    attrs: Vec<(&str, String)>,
    children: Vec<Child<S::Node>>,
) -> S::Node {
    let mut element = surface.create_element(tag);
    for (name, value) in attrs {
        surface.set_attribute(&mut element, name, &value);
    }
    for child in children {
        let node = match child {
            Child::Node(node) => node,
            Child::Text(text) => surface.create_text(&text),
            Child::Null => continue,
        };
        surface.append_child(&mut element, node);
    }
    element
}

/// In-memory node tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text(String),
    Fragment(Vec<Node>),
}

impl Node {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } | Node::Fragment(children) => children.as_slice(),
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            _ => self.children().iter().map(Node::text_content).collect(),
        }
    }

    /// Descendant elements with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a Node> {
        let mut found = Vec::new();
        for child in self.children() {
            if child.tag() == Some(tag) {
                found.push(child);
            }
            found.extend(child.find_all(tag));
        }
        found
    }
}

/// Surface producing [`Node`] values.
#[derive(Debug, Default)]
pub struct Dom;

impl Surface for Dom {
    type Node = Node;

    fn create_element(&mut self, tag: &str) -> Node {
        Node::Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn create_text(&mut self, text: &str) -> Node {
        Node::Text(text.to_string())
    }

    fn create_fragment(&mut self) -> Node {
        Node::Fragment(Vec::new())
    }

    fn set_attribute(&mut self, node: &mut Node, name: &str, value: &str) {
        if let Node::Element { attrs, .. } = node {
            match attrs.iter_mut().find(|(key, _)| key == name) {
                Some(existing) => existing.1 = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn append_child(&mut self, parent: &mut Node, child: Node) {
        match parent {
            Node::Element { children, .. } | Node::Fragment(children) => children.push(child),
            Node::Text(_) => {}
        }
    }
}

/// Header with the title placeholder and the "since" caption.
pub fn build_header<S: Surface>(
    surface: &mut S,
    start: CalendarDate,
    owner: Option<&str>,
) -> S::Node {
    let label = h(surface, "span", vec![], vec![Child::text("Activity of")]);
    let input = h(
        surface,
        "span",
        vec![attr("class", "input")],
        vec![owner.map_or(Child::Null, |name| Child::text(name))],
    );
    let title = h(
        surface,
        "h1",
        vec![attr("class", "title")],
        vec![Child::Node(label), Child::Node(input)],
    );
    let since = h(
        surface,
        "p",
        vec![attr("class", "start-date")],
        vec![Child::text(format!("since {}", format_since(start)))],
    );

    h(
        surface,
        "header",
        vec![attr("class", "header")],
        vec![Child::Node(title), Child::Node(since)],
    )
}

/// The scaled SVG drawing: row labels, one group per week column, month labels.
pub fn build_drawing<S: Surface>(surface: &mut S, grid: &Grid) -> S::Node {
    let mut layers = vec![
        Child::Node(weekday_labels(surface, 0)),
        Child::Node(weekday_labels(surface, 1)),
    ];

    let mut rects = 0;
    for (band, column, week) in grid.columns() {
        let cells: Vec<Child<S::Node>> = week
            .days()
            .map(|(row, cell)| Child::Node(day_rect(surface, band, column, row, cell)))
            .collect();
        rects += cells.len();
        layers.push(Child::Node(h(surface, "g", vec![], cells)));
    }

    let labels: Vec<Child<S::Node>> = grid
        .month_labels
        .iter()
        .map(|label| {
            let band = (label.column / COLUMNS_PER_BAND) as u32;
            let column = (label.column % COLUMNS_PER_BAND) as u32;
            Child::Node(h(
                surface,
                "text",
                vec![
                    attr("x", WEEKDAY_LABEL_WIDTH + CELL_PITCH * column),
                    attr("y", BAND_OFFSET * band + TEXT_OFFSET_Y),
                ],
                vec![Child::text(label.text)],
            ))
        })
        .collect();
    layers.push(Child::Node(h(surface, "g", vec![], labels)));

    debug!(rects, labels = grid.month_labels.len(), "built drawing");

    let scaled = h(
        surface,
        "g",
        vec![attr("transform", format!("scale({})", SCALE))],
        layers,
    );
    h(
        surface,
        "svg",
        vec![
            attr("class", "field"),
            attr("width", f64::from(FIELD_WIDTH + WEEKDAY_LABEL_WIDTH) * SCALE),
            attr("height", f64::from(FIELD_HEIGHT) * SCALE),
        ],
        vec![Child::Node(scaled)],
    )
}

/// Header and drawing under one fragment.
pub fn build_scene<S: Surface>(
    surface: &mut S,
    start: CalendarDate,
    grid: &Grid,
    owner: Option<&str>,
) -> S::Node {
    let header = build_header(surface, start, owner);
    let drawing = build_drawing(surface, grid);

    let mut root = surface.create_fragment();
    surface.append_child(&mut root, header);
    surface.append_child(&mut root, drawing);
    root
}

fn weekday_labels<S: Surface>(surface: &mut S, band: u32) -> S::Node {
    let texts: Vec<Child<S::Node>> = ROW_LABELS
        .iter()
        .map(|&(text, y)| {
            Child::Node(h(
                surface,
                "text",
                vec![attr("x", 0), attr("y", y + TEXT_OFFSET_Y)],
                vec![Child::text(text)],
            ))
        })
        .collect();

    let attrs = if band == 0 {
        vec![]
    } else {
        vec![attr("transform", format!("translate(0, {})", BAND_OFFSET * band))]
    };
    h(surface, "g", attrs, texts)
}

fn day_rect<S: Surface>(
    surface: &mut S,
    band: usize,
    column: usize,
    row: usize,
    cell: &DayCell,
) -> S::Node {
    let (band, column, row) = (band as u32, column as u32, row as u32);
    h(
        surface,
        "rect",
        vec![
            attr("class", "kusa"),
            attr("width", CELL_SIZE),
            attr("height", CELL_SIZE),
            attr("x", WEEKDAY_LABEL_WIDTH + CELL_PITCH * column),
            attr("y", CELL_PITCH * (1 + row) + BAND_OFFSET * band),
            attr("rx", CELL_RADIUS),
            attr("ry", CELL_RADIUS),
            attr("data-date", &cell.key),
        ],
        vec![],
    )
}
