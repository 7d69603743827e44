//! JSON-file backed sources.
//!
//! Accepted product documents: a bare array of products, or an object with a
//! `products` array (other keys such as `total`/`skip`/`limit` are ignored).
//! Category documents are an array of `{slug|id, name}` objects or of plain
//! slug strings.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use storefront_core::{CatalogError, CatalogResult};
use storefront_products::{Category, Product};

use super::{CatalogSource, CategorySource};

/// Product catalog read from a JSON file on every `load`.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> CatalogResult<Vec<Product>> {
        let raw = read_document(&self.path)?;
        parse_products(&raw).map_err(|e| with_path(&self.path, e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Category list read from a JSON file on every `load`.
#[derive(Debug, Clone)]
pub struct JsonFileCategories {
    path: PathBuf,
}

impl JsonFileCategories {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CategorySource for JsonFileCategories {
    fn load(&self) -> CatalogResult<Vec<Category>> {
        let raw = read_document(&self.path)?;
        parse_categories(&raw).map_err(|e| with_path(&self.path, e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse a product document, rejecting duplicate ids.
pub fn parse_products(json: &str) -> CatalogResult<Vec<Product>> {
    let doc: JsonValue = serde_json::from_str(json)?;

    let list = match doc {
        list @ JsonValue::Array(_) => list,
        JsonValue::Object(mut map) => match map.remove("products") {
            Some(list @ JsonValue::Array(_)) => list,
            Some(_) => return Err(CatalogError::load("`products` must be an array")),
            None => return Err(CatalogError::load("missing `products` array")),
        },
        _ => {
            return Err(CatalogError::load(
                "expected an array of products or an object with a `products` array",
            ));
        }
    };

    let products: Vec<Product> = serde_json::from_value(list)?;

    let mut seen = HashSet::with_capacity(products.len());
    for p in &products {
        if !seen.insert(p.id) {
            return Err(CatalogError::load(format!("duplicate product id {}", p.id)));
        }
    }

    Ok(products)
}

/// Parse a category document.
pub fn parse_categories(json: &str) -> CatalogResult<Vec<Category>> {
    let doc: JsonValue = serde_json::from_str(json)?;
    let JsonValue::Array(entries) = doc else {
        return Err(CatalogError::load("expected an array of categories"));
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            JsonValue::String(slug) => Ok(Category::new(slug.clone(), slug)),
            other => serde_json::from_value(other).map_err(CatalogError::from),
        })
        .collect()
}

fn with_path(path: &Path, err: CatalogError) -> CatalogError {
    match err {
        CatalogError::Load(msg) => CatalogError::load(format!("{}: {msg}", path.display())),
        other => other,
    }
}

fn read_document(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            CatalogError::load(format!("{}: file not found", path.display()))
        }
        io::ErrorKind::InvalidData => {
            CatalogError::load(format!("{}: not valid utf-8", path.display()))
        }
        _ => CatalogError::transient_io(format!("{}: {e}", path.display())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ProductId;

    struct TempFile(PathBuf);

    impl TempFile {
        fn with_contents(contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!("storefront-{}.json", uuid::Uuid::now_v7()));
            std::fs::write(&path, contents).unwrap();
            Self(path)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    const WRAPPED: &str = r#"{
        "products": [
            {"id": 1, "title": "Red Shoe", "category": "shoes", "price": 50, "rating": 4.0},
            {"id": 2, "title": "Blue Shoe", "category": "shoes", "price": 150, "rating": 4.8}
        ],
        "total": 2, "skip": 0, "limit": 30
    }"#;

    #[test]
    fn parses_wrapped_document_in_order() {
        let products = parse_products(WRAPPED).unwrap();
        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId::new(1), ProductId::new(2)]);
    }

    #[test]
    fn parses_bare_array() {
        let json = r#"[{"id": 3, "title": "Red Hat", "category": "hats", "price": 20, "rating": 3}]"#;
        assert_eq!(parse_products(json).unwrap().len(), 1);
    }

    #[test]
    fn empty_catalog_is_valid() {
        assert!(parse_products("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_documents() {
        for json in [
            "not json",
            r#""products""#,
            r#"{"items": []}"#,
            r#"{"products": {}}"#,
            r#"[{"id": "one", "title": "x", "category": "y", "price": 1, "rating": 1}]"#,
        ] {
            let err = parse_products(json).unwrap_err();
            assert!(matches!(err, CatalogError::Load(_)), "{json}: {err:?}");
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[
            {"id": 1, "title": "A", "category": "x", "price": 1, "rating": 1},
            {"id": 1, "title": "B", "category": "x", "price": 2, "rating": 2}
        ]"#;
        match parse_products(json) {
            Err(CatalogError::Load(msg)) => assert!(msg.contains("duplicate product id 1")),
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn parses_category_objects_and_slugs() {
        let json = r#"[
            {"slug": "beauty", "name": "Beauty", "url": "https://example.com/beauty"},
            {"id": "shoes", "name": "Shoes"},
            "hats"
        ]"#;
        let categories = parse_categories(json).unwrap();
        assert_eq!(categories[0].slug, "beauty");
        assert_eq!(categories[1], Category::new("shoes", "Shoes"));
        assert_eq!(categories[2], Category::new("hats", "hats"));
    }

    #[test]
    fn rejects_category_object_document() {
        assert!(matches!(
            parse_categories(r#"{"categories": []}"#),
            Err(CatalogError::Load(_))
        ));
    }

    #[test]
    fn file_source_loads_and_reloads_same_set() {
        let file = TempFile::with_contents(WRAPPED);
        let source = JsonFileCatalog::new(&file.0);

        let first = source.load().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, source.load().unwrap());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let source = JsonFileCatalog::new("/definitely/not/here/products.json");
        match source.load() {
            Err(CatalogError::Load(msg)) => assert!(msg.contains("file not found")),
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_file_error_names_the_path() {
        let file = TempFile::with_contents("{ broken");
        let err = JsonFileCatalog::new(&file.0).load().unwrap_err();
        match err {
            CatalogError::Load(msg) => assert!(msg.contains(&file.0.display().to_string())),
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn directory_path_fails_to_load() {
        let err = JsonFileCategories::new(std::env::temp_dir()).load().unwrap_err();
        assert!(!matches!(err, CatalogError::InvalidParams(_)));
    }
}
