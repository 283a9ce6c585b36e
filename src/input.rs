//! Loading upstream fragments.
//!
//! Two JSON shapes are accepted: a flat array of fragments (each may carry
//! its own `page`), or an object with a `pages` array holding one fragment
//! array per page, in which case page indices are assigned from position.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::RawFragment;

#[derive(Deserialize)]
#[serde(untagged)]
enum FragmentDocument {
    Flat(Vec<RawFragment>),
    Paged { pages: Vec<Vec<RawFragment>> },
}

impl FragmentDocument {
    fn into_fragments(self) -> Vec<RawFragment> {
        match self {
            FragmentDocument::Flat(fragments) => fragments,
            FragmentDocument::Paged { pages } => pages
                .into_iter()
                .enumerate()
                .flat_map(|(index, page)| {
                    page.into_iter()
                        .map(move |fragment| fragment.on_page(index as u32))
                })
                .collect(),
        }
    }
}

/// Read fragments from a JSON string.
pub fn fragments_from_str(json: &str) -> Result<Vec<RawFragment>> {
    let document: FragmentDocument = serde_json::from_str(json)?;
    Ok(document.into_fragments())
}

/// Read fragments from JSON bytes.
pub fn fragments_from_bytes(data: &[u8]) -> Result<Vec<RawFragment>> {
    let document: FragmentDocument = serde_json::from_slice(data)?;
    Ok(document.into_fragments())
}

/// Read fragments from a reader.
pub fn fragments_from_reader<R: Read>(reader: R) -> Result<Vec<RawFragment>> {
    let document: FragmentDocument = serde_json::from_reader(reader)?;
    Ok(document.into_fragments())
}

/// Read fragments from a JSON file.
pub fn fragments_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawFragment>> {
    let file = File::open(path)?;
    fragments_from_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_flat_array() {
        let json = r#"[
            {"font_name": "Arial-Bold", "text": "JANE", "bbox": [0, 10, 40, 22], "font_size": 12},
            {"font_name": "Arial", "text": "x", "bbox": [0, 30, 5, 40], "font_size": 10, "page": 2}
        ]"#;
        let fragments = fragments_from_str(json).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].page, 0);
        assert_eq!(fragments[1].page, 2);
    }

    #[test]
    fn test_paged_document() {
        let json = r#"{"pages": [
            [{"font_name": "Arial", "text": "a", "bbox": [0, 700, 5, 710], "font_size": 10}],
            [{"font_name": "Arial", "text": "b", "bbox": [0, 20, 5, 30], "font_size": 10},
             {"font_name": "Arial", "text": "c", "bbox": [0, 40, 5, 50], "font_size": 10}]
        ]}"#;
        let fragments = fragments_from_bytes(json.as_bytes()).unwrap();
        let pages: Vec<u32> = fragments.iter().map(|f| f.page).collect();
        assert_eq!(pages, vec![0, 1, 1]);
    }

    #[test]
    fn test_empty_array() {
        assert!(fragments_from_str("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = fragments_from_str("{\"nope\": 1}").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = fragments_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
