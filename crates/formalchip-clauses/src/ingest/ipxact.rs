//! IP-XACT register ingestor: a namespace-agnostic XML walk.
//!
//! Matches elements by tag *suffix* (`register`, `name`, `value`) rather
//! than by namespace-qualified name, so `spirit:register`, `ipxact:register`,
//! and bare `register` all match the same way the original tree-walk did.

use crate::error::IngestError;
use crate::model::{ClauseMetadata, SpecClause};
use camino::Utf8Path;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

#[derive(Debug, Clone)]
enum Node {
    Element { tag: String, children: Vec<Node> },
    Text(String),
}

fn local_tag(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

fn parse_tree(xml: &str) -> Result<Node, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<(String, Vec<Node>)> = vec![("__root__".to_string(), Vec::new())];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push((tag, Vec::new()));
            }
            Event::Empty(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let (_, parent_children) = stack.last_mut().unwrap();
                parent_children.push(Node::Element {
                    tag,
                    children: Vec::new(),
                });
            }
            Event::End(_) => {
                let (tag, children) = stack.pop().unwrap();
                let (_, parent_children) = stack.last_mut().unwrap();
                parent_children.push(Node::Element { tag, children });
            }
            Event::Text(t) => {
                let text = t.unescape()?.into_owned();
                if !text.trim().is_empty() {
                    let (_, children) = stack.last_mut().unwrap();
                    children.push(Node::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let (_, mut root_children) = stack.pop().unwrap();
    Ok(root_children.pop().unwrap_or(Node::Element {
        tag: "__empty__".to_string(),
        children: Vec::new(),
    }))
}

/// Find the first descendant (preorder, not including `node` itself) whose
/// local tag name ends with `suffix`, and return its direct text content.
fn find_text(node: &Node, suffix: &str) -> Option<String> {
    if let Node::Element { children, .. } = node {
        for child in children {
            if let Node::Element { tag, .. } = child {
                if local_tag(tag).ends_with(suffix) {
                    return Some(element_text(child));
                }
            }
            if let Some(found) = find_text(child, suffix) {
                return Some(found);
            }
        }
    }
    None
}

fn element_text(node: &Node) -> String {
    if let Node::Element { children, .. } = node {
        children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.trim()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    } else {
        String::new()
    }
}

fn collect_registers<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    if let Node::Element { tag, children } = node {
        if local_tag(tag).ends_with("register") {
            out.push(node);
        }
        for child in children {
            collect_registers(child, out);
        }
    }
}

pub fn parse_ipxact(path: &Utf8Path) -> Result<Vec<SpecClause>, IngestError> {
    let content =
        std::fs::read_to_string(path.as_std_path()).map_err(|e| IngestError::ReadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    let tree = parse_tree(&content).map_err(|e| IngestError::Malformed {
        format: "IP-XACT XML",
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let mut registers = Vec::new();
    collect_registers(&tree, &mut registers);

    let mut clauses = Vec::new();
    for (idx, reg) in registers.into_iter().enumerate() {
        let name = find_text(reg, "name").unwrap_or_default();
        let value = find_text(reg, "value").unwrap_or_default();
        let signal = format!("{}_q", name.to_ascii_lowercase());

        let mut metadata = ClauseMetadata::new();
        metadata.insert("register".to_string(), serde_json::json!(name));
        metadata.insert("reset".to_string(), serde_json::json!(value));
        metadata.insert("signal".to_string(), serde_json::json!(signal));

        clauses.push(SpecClause {
            clause_id: format!("ipxact_{idx:03}_reset"),
            text: format!("{name} resets to {value}"),
            source: path.to_string(),
            tags: vec![
                "ipxact".to_string(),
                "register".to_string(),
                "reset".to_string(),
            ],
            metadata,
        });
    }

    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_xml(content: &str) -> (NamedTempFile, camino::Utf8PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap();
        (file, path)
    }

    const SAMPLE: &str = r#"
        <ipxact:component xmlns:ipxact="http://example.com">
          <ipxact:memoryMap>
            <ipxact:register>
              <ipxact:name>STATUS</ipxact:name>
              <ipxact:resetValue>
                <ipxact:value>0x0</ipxact:value>
              </ipxact:resetValue>
            </ipxact:register>
            <ipxact:register>
              <ipxact:name>CTRL</ipxact:name>
              <ipxact:resetValue>
                <ipxact:value>0x1</ipxact:value>
              </ipxact:resetValue>
            </ipxact:register>
          </ipxact:memoryMap>
        </ipxact:component>
    "#;

    #[test]
    fn emits_one_reset_clause_per_register_element() {
        let (_f, path) = write_xml(SAMPLE);
        let clauses = parse_ipxact(&path).unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].clause_id, "ipxact_000_reset");
        assert_eq!(clauses[0].metadata_str("register"), Some("STATUS"));
        assert_eq!(clauses[0].metadata_str("reset"), Some("0x0"));
        assert_eq!(clauses[0].metadata_str("signal"), Some("status_q"));
        assert_eq!(clauses[1].metadata_str("register"), Some("CTRL"));
        assert!(clauses[0].has_tag("ipxact"));
        assert!(clauses[0].has_tag("reset"));
    }

    #[test]
    fn tags_are_namespace_agnostic() {
        let bare = "<component><register><name>A</name><value>0x0</value></register></component>";
        let (_f, path) = write_xml(bare);
        let clauses = parse_ipxact(&path).unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].metadata_str("register"), Some("A"));
    }

    #[test]
    fn no_registers_yields_empty_clause_list() {
        let (_f, path) = write_xml("<component><vendor>acme</vendor></component>");
        let clauses = parse_ipxact(&path).unwrap();
        assert!(clauses.is_empty());
    }
}
