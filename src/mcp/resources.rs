//! MCP resources
//!
//! Static documentation under the `odin://` scheme.

use crate::error::{OdinError, Result};
use crate::mcp::docs::{FAQ_DOC, PRICE_UNITS_DOC};
use rmcp::model::{AnnotateAble, Annotated, RawResource, ResourceContents};

pub const ODIN_SCHEME: &str = "odin";
pub const PRICE_UNITS_URI: &str = "odin://docs/price-units";
pub const FAQ_URI: &str = "odin://docs/faq";

const MARKDOWN: &str = "text/markdown";

pub fn list_resources() -> Vec<Annotated<RawResource>> {
    vec![
        doc_resource(
            PRICE_UNITS_URI,
            "price-units",
            "How to read Odin.fun prices, balances and BTC amounts",
        ),
        doc_resource(FAQ_URI, "faq", "Odin.fun platform FAQ"),
    ]
}

fn doc_resource(uri: &str, name: &str, description: &str) -> Annotated<RawResource> {
    let mut resource = RawResource::new(uri, name);
    resource.description = Some(description.to_string());
    resource.mime_type = Some(MARKDOWN.to_string());
    resource.no_annotation()
}

/// Reads a resource by URI (e.g. `odin://docs/faq`)
pub fn read_resource(uri: &str) -> Result<ResourceContents> {
    let (scheme, path) = uri
        .split_once("://")
        .ok_or_else(|| OdinError::ResourceNotFound(format!("Invalid URI format: {}", uri)))?;

    if scheme != ODIN_SCHEME {
        return Err(OdinError::ResourceNotFound(format!(
            "Unsupported URI scheme: {}",
            scheme
        )));
    }

    let text = match path.trim_end_matches('/') {
        "docs/price-units" => PRICE_UNITS_DOC,
        "docs/faq" => FAQ_DOC,
        other => {
            return Err(OdinError::ResourceNotFound(format!(
                "Unknown resource: {}",
                other
            )))
        }
    };

    Ok(ResourceContents::text(text, uri))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_resources() {
        let resources = list_resources();
        let uris: Vec<&str> = resources.iter().map(|r| r.raw.uri.as_str()).collect();
        assert_eq!(uris, vec![PRICE_UNITS_URI, FAQ_URI]);
    }

    #[test]
    fn test_read_known_resources() {
        match read_resource(PRICE_UNITS_URI).unwrap() {
            ResourceContents::TextResourceContents { text, .. } => {
                assert_eq!(text, PRICE_UNITS_DOC)
            }
            other => panic!("unexpected contents: {:?}", other),
        }
        assert!(read_resource(FAQ_URI).is_ok());
    }

    #[test]
    fn test_unknown_resources() {
        for uri in ["https://docs/faq", "odin://docs/missing", "no-scheme"] {
            assert!(
                matches!(read_resource(uri), Err(OdinError::ResourceNotFound(_))),
                "{}",
                uri
            );
        }
    }
}
