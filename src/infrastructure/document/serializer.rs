//! Writes an [`HtmlDocument`] back to markup.

use ego_tree::NodeRef;
use scraper::Node;
use scraper::node::Doctype;

use super::html_document::{HtmlDocument, PROCESSED_ATTRIBUTE};
use crate::domain::entities::{escape_attribute, escape_text};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

pub(super) struct Serializer<'a> {
    document: &'a HtmlDocument,
    out: String,
    scripts_written: bool,
    appended_written: bool,
}

impl<'a> Serializer<'a> {
    pub(super) const fn new(document: &'a HtmlDocument) -> Self {
        Self {
            document,
            out: String::new(),
            scripts_written: false,
            appended_written: false,
        }
    }

    pub(super) fn finish(mut self) -> String {
        let document = self.document;
        if let Some(page) = document.segments().first() {
            self.write_node(0, page.tree.root());
        }
        if !self.scripts_written {
            self.write_scripts();
        }
        if !self.appended_written {
            self.write_appended();
        }
        self.out
    }

    fn write_scripts(&mut self) {
        self.scripts_written = true;
        for src in self.document.scripts() {
            self.out.push_str(&format!(
                r#"<script src="{}" async></script>"#,
                escape_attribute(src)
            ));
        }
    }

    fn write_appended(&mut self) {
        self.appended_written = true;
        let segments = self.document.segments();
        for (index, fragment) in segments.iter().enumerate().skip(1) {
            self.write_node(index, fragment.tree.root());
        }
    }

    fn write_doctype(&mut self, doctype: &Doctype) {
        self.out.push_str("<!DOCTYPE ");
        self.out.push_str(doctype.name());
        match (doctype.public_id(), doctype.system_id()) {
            ("", "") => {}
            ("", system) => self.out.push_str(&format!(r#" SYSTEM "{system}""#)),
            (public, "") => self.out.push_str(&format!(r#" PUBLIC "{public}""#)),
            (public, system) => {
                self.out
                    .push_str(&format!(r#" PUBLIC "{public}" "{system}""#));
            }
        }
        self.out.push('>');
    }

    fn write_children(&mut self, segment: usize, node: NodeRef<'_, Node>) {
        for child in node.children() {
            self.write_node(segment, child);
        }
    }

    fn write_node(&mut self, segment: usize, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Document | Node::Fragment => self.write_children(segment, node),
            Node::Doctype(doctype) => self.write_doctype(doctype),
            Node::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(comment);
                self.out.push_str("-->");
            }
            Node::Text(text) => {
                let raw = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|parent| RAW_TEXT_ELEMENTS.contains(&parent.name()));
                if raw {
                    self.out.push_str(text);
                } else {
                    self.out.push_str(&escape_text(text));
                }
            }
            Node::Element(element) => {
                let name = element.name();

                // Fragments parse under a synthetic <html> root.
                let fragment_root = node
                    .parent()
                    .is_some_and(|parent| matches!(parent.value(), Node::Fragment));
                if fragment_root && name == "html" {
                    self.write_children(segment, node);
                    return;
                }

                let record = self.document.record_at(segment, node.id());

                self.out.push('<');
                self.out.push_str(name);
                for (key, value) in &element.attrs {
                    self.out.push(' ');
                    if let Some(prefix) = &key.prefix {
                        self.out.push_str(&format!("{prefix}:"));
                    }
                    self.out.push_str(&key.local);
                    self.out
                        .push_str(&format!(r#"="{}""#, escape_attribute(value)));
                }
                if record.is_some_and(|record| record.link.is_processed())
                    && element.attr(PROCESSED_ATTRIBUTE).is_none()
                {
                    self.out
                        .push_str(&format!(r#" {PROCESSED_ATTRIBUTE}="true""#));
                }
                self.out.push('>');

                if VOID_ELEMENTS.contains(&name) {
                    return;
                }

                self.write_children(segment, node);

                if segment == 0 && name == "head" && !self.scripts_written {
                    self.write_scripts();
                }
                if segment == 0 && name == "body" && !self.appended_written {
                    self.write_appended();
                }

                self.out.push_str("</");
                self.out.push_str(name);
                self.out.push('>');

                if let Some(record) = record {
                    for container in &record.embeds {
                        self.out.push_str(&container.to_html());
                    }
                }
            }
            Node::ProcessingInstruction(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::infrastructure::document::{DEFAULT_LINK_SELECTOR, HtmlDocument};

    fn round_trip(page: &str) -> String {
        HtmlDocument::parse(page, DEFAULT_LINK_SELECTOR, None)
            .unwrap()
            .to_html()
    }

    #[test]
    fn test_prefixed_attributes_keep_their_prefix() {
        let html = round_trip(
            r##"<html><body><svg><use xlink:href="#icon"></use></svg></body></html>"##,
        );
        assert!(html.contains(r##"<use xlink:href="#icon"></use>"##));
    }

    #[test]
    fn test_legacy_doctype_keeps_identifiers() {
        let html = round_trip(concat!(
            r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "#,
            r#""http://www.w3.org/TR/html4/strict.dtd">"#,
            "<html><body></body></html>"
        ));
        assert!(html.starts_with(concat!(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "#,
            r#""http://www.w3.org/TR/html4/strict.dtd">"#
        )));
    }

    #[test]
    fn test_html5_doctype_is_unchanged() {
        let html = round_trip("<!DOCTYPE html><html><body></body></html>");
        assert!(html.starts_with("<!DOCTYPE html><html>"));
    }

    #[test]
    fn test_comments_survive() {
        let html = round_trip("<html><body><!-- keep me --><p>x</p></body></html>");
        assert!(html.contains("<!-- keep me --><p>x</p>"));
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let html = round_trip(r#"<html><body><p>a<br>b<img src="x.png"></p></body></html>"#);
        assert!(html.contains(r#"<p>a<br>b<img src="x.png"></p>"#));
        assert!(!html.contains("</br>"));
        assert!(!html.contains("</img>"));
    }

    #[test]
    fn test_script_body_is_not_escaped() {
        let html = round_trip(
            "<html><head><script>if (a < b && c > d) { go(); }</script></head><body></body></html>",
        );
        assert!(html.contains("<script>if (a < b && c > d) { go(); }</script>"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let html =
            round_trip(r#"<html><body><p title="a &quot;b&quot; &amp; c">x</p></body></html>"#);
        assert!(html.contains(r#"<p title="a &quot;b&quot; &amp; c">x</p>"#));
    }
}
