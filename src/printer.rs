use std::fmt::Write as _;
use std::io::{self, Write};

use bytes::{BufMut, BytesMut};

use crate::ast::{Node, NodeId, Pattern};

/// Render the indented tree dump of `pattern`.
///
/// Literal and range bytes are written as-is, so the dump is bytes rather
/// than a `String`.
pub fn render(pattern: &Pattern) -> BytesMut {
    let mut out = BytesMut::new();
    render_node(pattern, pattern.root(), 0, &mut out);
    out
}

/// Write the tree dump to standard output.
pub fn print(pattern: &Pattern) -> io::Result<()> {
    let out = render(pattern);
    let mut stdout = io::stdout().lock();
    stdout.write_all(&out)?;
    stdout.flush()
}

fn indent(out: &mut BytesMut, depth: usize, first: bool) {
    if depth == 0 {
        return;
    }
    for _ in 0..depth - 1 {
        out.put_slice("|  ".as_bytes());
    }
    if first {
        out.put_slice("├─ ".as_bytes());
    } else {
        out.put_slice("|  ".as_bytes());
    }
}

// Every line of a node block is prefixed; only the first gets the branch.
fn line(out: &mut BytesMut, depth: usize, first: bool, text: std::fmt::Arguments<'_>) {
    indent(out, depth, first);
    let _ = out.write_fmt(text);
    out.put_u8(b'\n');
}

fn byte_line(out: &mut BytesMut, depth: usize, label: &str, value: u8) {
    indent(out, depth, false);
    out.put_slice(label.as_bytes());
    out.put_slice(b": ");
    out.put_u8(value);
    out.put_u8(b'\n');
}

fn render_node(pattern: &Pattern, id: NodeId, depth: usize, out: &mut BytesMut) {
    match &pattern[id] {
        Node::Literal { negated, ch } => {
            line(out, depth, true, format_args!("type: literal"));
            line(out, depth, false, format_args!("not: {negated}"));
            byte_line(out, depth, "c", *ch);
        }
        Node::Special { negated, class } => {
            line(out, depth, true, format_args!("type: special"));
            line(out, depth, false, format_args!("not: {negated}"));
            line(out, depth, false, format_args!("class: {}", class.name()));
        }
        Node::Range { negated, min, max } => {
            line(out, depth, true, format_args!("type: range"));
            line(out, depth, false, format_args!("not: {negated}"));
            byte_line(out, depth, "min", *min);
            byte_line(out, depth, "max", *max);
        }
        Node::Anchor { kind } => {
            line(out, depth, true, format_args!("type: anchor"));
            line(out, depth, false, format_args!("kind: {}", kind.name()));
        }
        Node::Quantifier { min, max } => {
            line(out, depth, true, format_args!("type: quantifier"));
            line(out, depth, false, format_args!("min: {min}"));
            line(out, depth, false, format_args!("max: {max}"));
        }
        Node::List(children) => render_container(pattern, "list", children, depth, out),
        Node::Alternator(children) => {
            render_container(pattern, "alternator", children, depth, out)
        }
        Node::CaptureGroup(children) => {
            render_container(pattern, "capture group", children, depth, out)
        }
    }
}

fn render_container(
    pattern: &Pattern,
    label: &str,
    children: &[NodeId],
    depth: usize,
    out: &mut BytesMut,
) {
    line(out, depth, true, format_args!("type: {label}"));
    line(out, depth, false, format_args!("tokens:"));
    for &child in children {
        render_node(pattern, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AnchorKind;

    fn dump(pattern: &Pattern) -> String {
        String::from_utf8(render(pattern).to_vec()).unwrap()
    }

    #[test]
    fn renders_nested_tree() {
        let mut pattern = Pattern::new();
        let root = pattern.root();
        pattern.push(root, Node::literal(b'a'));
        let group = pattern.push(root, Node::CaptureGroup(vec![]));
        pattern.push(group, Node::quantifier(1, -1));

        let expected = "\
type: list
tokens:
├─ type: literal
|  not: false
|  c: a
├─ type: capture group
|  tokens:
|  ├─ type: quantifier
|  |  min: 1
|  |  max: -1
";
        assert_eq!(dump(&pattern), expected);
    }

    #[test]
    fn renders_class_members_and_reserved_anchor() {
        let mut pattern = Pattern::new();
        let root = pattern.root();
        let class = pattern.push(root, Node::Alternator(vec![]));
        pattern.push(class, Node::Range { negated: false, min: b'0', max: b'9' });
        pattern.push(root, Node::Anchor { kind: AnchorKind::WordBoundary });

        let expected = "\
type: list
tokens:
├─ type: alternator
|  tokens:
|  ├─ type: range
|  |  not: false
|  |  min: 0
|  |  max: 9
├─ type: anchor
|  kind: word boundary
";
        assert_eq!(dump(&pattern), expected);
    }

    #[test]
    fn raw_bytes_pass_through() {
        let mut pattern = Pattern::new();
        let root = pattern.root();
        pattern.push(root, Node::literal(0xff));
        let out = render(&pattern);
        assert!(out.ends_with(b"c: \xff\n"));
    }
}
