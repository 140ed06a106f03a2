//! Declarative view tree and its plain-text renderer.
//!
//! Pages build a `Node` from `&AppState`; nothing below this module knows
//! about application state.

pub mod pages;

pub const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Column(Vec<Node>),
    /// Children laid out on one line.
    Row(Vec<Node>),
    Heading(String),
    Subheading(String),
    Text(String),
    Muted(String),
    Tags(Vec<String>),
    Card {
        title: String,
        badge: Option<String>,
        body: Vec<Node>,
    },
    Bullets(Vec<String>),
    Tabs {
        items: Vec<String>,
        active: Option<usize>,
    },
    Button {
        label: String,
        enabled: bool,
    },
    Divider,
    Blank,
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn muted(s: impl Into<String>) -> Self {
        Node::Muted(s.into())
    }

    pub fn heading(s: impl Into<String>) -> Self {
        Node::Heading(s.into())
    }

    pub fn subheading(s: impl Into<String>) -> Self {
        Node::Subheading(s.into())
    }

    pub fn button(label: impl Into<String>, enabled: bool) -> Self {
        Node::Button {
            label: label.into(),
            enabled,
        }
    }

    /// Number of `Card` nodes in the tree, nested cards included.
    pub fn count_cards(&self) -> usize {
        match self {
            Node::Column(children) | Node::Row(children) => children.iter().map(Node::count_cards).sum(),
            Node::Card { body, .. } => 1 + body.iter().map(Node::count_cards).sum::<usize>(),
            _ => 0,
        }
    }
}

pub fn render_text(node: &Node, width: usize) -> String {
    let mut lines = Vec::new();
    render_into(node, width.max(MIN_WIDTH), &mut lines);
    lines.join("\n")
}

fn render_into(node: &Node, width: usize, out: &mut Vec<String>) {
    match node {
        Node::Column(children) => {
            for child in children {
                render_into(child, width, out);
            }
        }
        Node::Row(children) => {
            let line = children.iter().map(inline).collect::<Vec<_>>().join("   ");
            out.extend(fit(line, width));
        }
        Node::Heading(text) => {
            let lines = wrap(text, width);
            let underline = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            out.extend(lines);
            out.push("=".repeat(underline));
        }
        Node::Subheading(text) => {
            let lines = wrap(text, width);
            let underline = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            out.extend(lines);
            out.push("-".repeat(underline));
        }
        Node::Text(text) => out.extend(wrap(text, width)),
        Node::Muted(text) => out.extend(wrap(text, width - 2).into_iter().map(|l| indent("  ", l))),
        Node::Tags(_) | Node::Tabs { .. } | Node::Button { .. } => out.extend(fit(inline(node), width)),
        Node::Card { title, badge, body } => {
            let mut top = format!("┌─ {title}");
            if let Some(badge) = badge {
                top.push_str(&format!(" · {badge}"));
            }
            top.push(' ');
            let used = top.chars().count();
            if used < width {
                top.push_str(&"─".repeat(width - used));
            }
            out.push(top);

            let mut inner = Vec::new();
            for child in body {
                render_into(child, width - 2, &mut inner);
            }
            out.extend(inner.into_iter().map(|l| indent("│ ", l)));
            out.push(format!("└{}", "─".repeat(width - 1)));
        }
        Node::Bullets(items) => {
            for item in items {
                for (i, line) in wrap(item, width - 2).into_iter().enumerate() {
                    out.push(indent(if i == 0 { "• " } else { "  " }, line));
                }
            }
        }
        Node::Divider => out.push("─".repeat(width)),
        Node::Blank => out.push(String::new()),
    }
}

/// Single-line form used inside rows.
fn inline(node: &Node) -> String {
    match node {
        Node::Button { label, enabled: true } => format!("[ {label} ]"),
        Node::Button { label, enabled: false } => format!("( {label} )"),
        Node::Tags(tags) => tags.join(" · "),
        Node::Tabs { items, active } => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if Some(i) == *active {
                    format!("[{item}]")
                } else {
                    item.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("  "),
        Node::Text(s) | Node::Muted(s) | Node::Heading(s) | Node::Subheading(s) => s.clone(),
        Node::Column(children) | Node::Row(children) => {
            children.iter().map(inline).collect::<Vec<_>>().join(" ")
        }
        Node::Card { title, .. } => title.clone(),
        Node::Bullets(items) => items.join(", "),
        Node::Divider => "|".to_string(),
        Node::Blank => String::new(),
    }
}

/// Keeps an inline line's spacing when it already fits.
fn fit(line: String, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        vec![line]
    } else {
        wrap(&line, width)
    }
}

fn indent(prefix: &str, line: String) -> String {
    if line.is_empty() {
        prefix.trim_end().to_string()
    } else {
        format!("{prefix}{line}")
    }
}

/// Greedy word wrap. Explicit newlines are kept; words wider than `width`
/// are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if len > 0 {
                    lines.push(std::mem::take(&mut line));
                    len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            if len > 0 && len + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            len += word.len();
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}
