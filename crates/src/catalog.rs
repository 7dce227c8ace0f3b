// Product data model shared by the accessor, the query state and the list view.

pub mod accessor;
pub mod query;

pub use accessor::{MemoryAccessor, ProductAccessor, seed_collection};
pub use query::{Effect, LoadState, ProductQuery};

use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// Product name keyed by locale. At least one field is expected to be set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedName {
    pub fn pt(name: &str) -> Self {
        LocalizedName {
            pt: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn es(name: &str) -> Self {
        LocalizedName {
            es: Some(name.to_string()),
            ..Default::default()
        }
    }

    // Empty strings count as missing, same as an absent key.
    fn present(v: &Option<String>) -> Option<&str> {
        v.as_deref().filter(|s| !s.is_empty())
    }

    pub fn pt_name(&self) -> Option<&str> {
        Self::present(&self.pt)
    }

    pub fn es_name(&self) -> Option<&str> {
        Self::present(&self.es)
    }

    pub fn en_name(&self) -> Option<&str> {
        Self::present(&self.en)
    }

    /// Name shown in lists: Portuguese, then Spanish, then English.
    pub fn display(&self) -> &str {
        self.pt_name()
            .or_else(|| self.es_name())
            .or_else(|| self.en_name())
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.display().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: u64,
    pub src: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: LocalizedName,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    pub fn thumbnail(&self) -> Option<&ProductImage> {
        self.images.first()
    }
}

/// Wire shape of a product listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub content: Vec<Product>,
    #[serde(default)]
    pub total: usize,
}

impl Collection {
    pub fn new(content: Vec<Product>) -> Self {
        let total = content.len();
        Collection { content, total }
    }

    pub fn from_json(raw: &str) -> Result<Self, crate::error::AccessorError> {
        let mut c: Collection = serde_json::from_str(raw)
            .map_err(|e| crate::error::AccessorError::InvalidData(e.to_string()))?;
        if c.total < c.content.len() {
            c.total = c.content.len();
        }
        for p in &c.content {
            if p.name.is_empty() {
                return Err(crate::error::AccessorError::InvalidData(format!(
                    "product {} has no name in any locale",
                    p.id
                )));
            }
        }
        Ok(c)
    }
}

/// An immutable view of the collection at one point in time.
///
/// `revision` changes on every successful fetch, even when the content is
/// identical; selection state is keyed on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub revision: u64,
    pub collection: Collection,
}

impl Snapshot {
    pub fn products(&self) -> &[Product] {
        &self.collection.content
    }

    pub fn len(&self) -> usize {
        self.collection.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.content.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.collection.content.iter().any(|p| p.id == id)
    }
}
