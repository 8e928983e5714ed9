//! Tolerant markup tree
//!
//! The extractor only needs three queries on a document: first descendant
//! by tag, all descendants by tag, and the plain text of a subtree. They
//! are expressed by [`MarkupNode`] so extraction can run against any tree.
//! [`XmlElement`] is the implementation backed by quick-xml.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Query capability over a parsed markup tree
pub trait MarkupNode {
    /// Tag name of this node (namespace prefix removed)
    fn name(&self) -> &str;

    /// First descendant with the given tag, in document order
    fn find(&self, tag: &str) -> Option<&Self>;

    /// Every descendant with the given tag, in document order
    fn find_all(&self, tag: &str) -> Vec<&Self>;

    /// Concatenated text of the whole subtree
    fn text(&self) -> String;

    /// Whether the node has any child element or non-blank text
    fn has_content(&self) -> bool;
}

/// Child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// Element of a parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub children: Vec<XmlNode>,
}

/// Unrecoverable tokenizer failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupError {
    pub position: u64,
    pub message: String,
}

impl std::fmt::Display for MarkupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.position)
    }
}

impl std::error::Error for MarkupError {}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child element, returning self for tree construction
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Append a text node, returning self for tree construction
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Parse a document into a tree rooted at an unnamed document node
    ///
    /// Mismatched and stray end tags are tolerated, elements left open at
    /// the end of input are closed, and text with undecodable entities is
    /// kept raw. Only tokenizer errors (for example an unterminated
    /// comment) are reported.
    pub fn parse(content: &str) -> Result<XmlElement, MarkupError> {
        let mut reader = Reader::from_str(content);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.check_comments = false;

        let mut stack = vec![XmlElement::default()];

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(XmlElement::new(decode_name(e.local_name().as_ref())));
                }
                Ok(Event::Empty(e)) => {
                    let element = XmlElement::new(decode_name(e.local_name().as_ref()));
                    push_child(&mut stack, XmlNode::Element(element));
                }
                Ok(Event::End(e)) => {
                    close_element(&mut stack, &decode_name(e.local_name().as_ref()));
                }
                Ok(Event::Text(e)) => {
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(_) => String::from_utf8_lossy(&e).into_owned(),
                    };
                    push_child(&mut stack, XmlNode::Text(text));
                }
                Ok(Event::CData(e)) => {
                    push_child(&mut stack, XmlNode::Text(String::from_utf8_lossy(&e).into_owned()));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(MarkupError {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    });
                }
            }
        }

        while stack.len() > 1 {
            if let Some(open) = stack.pop() {
                push_child(&mut stack, XmlNode::Element(open));
            }
        }

        Ok(stack.pop().unwrap_or_default())
    }

    fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    fn collect_matching<'a>(&'a self, tag: &str, out: &mut Vec<&'a XmlElement>) {
        for element in self.elements() {
            if element.name == tag {
                out.push(element);
            }
            element.collect_matching(tag, out);
        }
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }
}

impl MarkupNode for XmlElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, tag: &str) -> Option<&Self> {
        for element in self.elements() {
            if element.name == tag {
                return Some(element);
            }
            if let Some(found) = element.find(tag) {
                return Some(found);
            }
        }
        None
    }

    fn find_all(&self, tag: &str) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_matching(tag, &mut out);
        out
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn has_content(&self) -> bool {
        self.children.iter().any(|child| match child {
            XmlNode::Element(_) => true,
            XmlNode::Text(text) => !text.trim().is_empty(),
        })
    }
}

fn decode_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn push_child(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Close the nearest open element named `name`, along with anything still
/// open inside it. End tags with no matching open element are dropped.
fn close_element(stack: &mut Vec<XmlElement>, name: &str) {
    let Some(index) = stack.iter().rposition(|e| e.name == name) else {
        return;
    };
    if index == 0 {
        return;
    }

    while stack.len() > index {
        if let Some(open) = stack.pop() {
            push_child(stack, XmlNode::Element(open));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_and_text() {
        let doc = XmlElement::parse(
            "<TEI><teiHeader><titleStmt><title>Deep <hi>Graphs</hi></title></titleStmt></teiHeader></TEI>",
        )
        .unwrap();

        let title = doc.find("titleStmt").and_then(|t| t.find("title")).unwrap();
        assert_eq!(title.text(), "Deep Graphs");
        assert_eq!(doc.find("TEI").unwrap().name(), "TEI");
        assert!(doc.find("listBibl").is_none());
    }

    #[test]
    fn test_find_all_in_document_order() {
        let doc = XmlElement::parse(
            "<listBibl><biblStruct><title>A</title></biblStruct><biblStruct><title>B</title></biblStruct></listBibl>",
        )
        .unwrap();

        let titles: Vec<String> = doc.find_all("title").iter().map(|t| t.text()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_namespace_prefix_stripped() {
        let doc = XmlElement::parse(
            r#"<tei:TEI xmlns:tei="http://www.tei-c.org/ns/1.0"><tei:title>X</tei:title></tei:TEI>"#,
        )
        .unwrap();
        assert_eq!(doc.find("title").unwrap().text(), "X");
    }

    #[test]
    fn test_unclosed_elements_are_closed_at_eof() {
        let doc = XmlElement::parse("<TEI><titleStmt><title>Truncated").unwrap();
        let title = doc.find("title").unwrap();
        assert_eq!(title.text(), "Truncated");
        assert!(doc.find("TEI").unwrap().has_content());
    }

    #[test]
    fn test_stray_end_tag_ignored() {
        let doc = XmlElement::parse("<TEI><title>X</b></title><term>k</term></TEI>").unwrap();
        assert_eq!(doc.find("title").unwrap().text(), "X");
        assert_eq!(doc.find_all("term").len(), 1);
    }

    #[test]
    fn test_mismatched_end_closes_inner() {
        let doc = XmlElement::parse("<a><b><c>text</a><d/>").unwrap();
        let a = doc.find("a").unwrap();
        assert_eq!(a.text(), "text");
        assert!(a.find("d").is_none());
        assert!(doc.find("d").is_some());
    }

    #[test]
    fn test_unknown_entity_kept_raw() {
        let doc = XmlElement::parse("<title>Caf&eacute; &amp; Co</title>").unwrap();
        assert_eq!(doc.find("title").unwrap().text(), "Caf&eacute; &amp; Co");
    }

    #[test]
    fn test_known_entity_decoded() {
        let doc = XmlElement::parse("<title>Rock &amp; Roll</title>").unwrap();
        assert_eq!(doc.find("title").unwrap().text(), "Rock & Roll");
    }

    #[test]
    fn test_empty_envelope_has_no_content() {
        let doc = XmlElement::parse("<TEI>   \n </TEI>").unwrap();
        assert!(!doc.find("TEI").unwrap().has_content());

        let doc = XmlElement::parse("<TEI/>").unwrap();
        assert!(!doc.find("TEI").unwrap().has_content());
    }

    #[test]
    fn test_unterminated_comment_is_an_error() {
        assert!(XmlElement::parse("<TEI><!-- never closed").is_err());
    }

    #[test]
    fn test_builder_tree() {
        let tree = XmlElement::new("author")
            .with_child(XmlElement::new("forename").with_text("Ada"))
            .with_child(XmlElement::new("surname").with_text("Lovelace"));
        assert_eq!(tree.find("surname").unwrap().text(), "Lovelace");
        assert_eq!(tree.text(), "AdaLovelace");
    }
}
