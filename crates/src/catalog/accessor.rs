use super::{Collection, LocalizedName, Product, ProductId, ProductImage};
use crate::error::AccessorError;
use futures::future::BoxFuture;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// Read/write access to the product collection.
///
/// Both calls are asynchronous; the UI never blocks on them.
pub trait ProductAccessor: Send + Sync {
    fn fetch_list(&self) -> BoxFuture<'static, Result<Collection, AccessorError>>;
    fn delete(&self, id: ProductId) -> BoxFuture<'static, Result<(), AccessorError>>;
}

/// In-process stand-in for the remote collection.
#[derive(Clone, Debug)]
pub struct MemoryAccessor {
    products: Arc<Mutex<Vec<Product>>>,
    latency: Duration,
}

impl MemoryAccessor {
    pub fn new(collection: Collection) -> Self {
        MemoryAccessor {
            products: Arc::new(Mutex::new(collection.content)),
            latency: Duration::ZERO,
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_collection())
    }

    pub fn from_file(path: &Path) -> Result<Self, AccessorError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AccessorError::Unavailable(format!("{}: {e}", path.display())))?;
        let collection = Collection::from_json(&raw)?;
        info!(
            path = %path.display(),
            products = collection.content.len(),
            "loaded product data"
        );
        Ok(Self::new(collection))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn lock(
        products: &Mutex<Vec<Product>>,
    ) -> Result<std::sync::MutexGuard<'_, Vec<Product>>, AccessorError> {
        products
            .lock()
            .map_err(|_| AccessorError::Unavailable("product store lock poisoned".into()))
    }
}

impl ProductAccessor for MemoryAccessor {
    fn fetch_list(&self) -> BoxFuture<'static, Result<Collection, AccessorError>> {
        let products = Arc::clone(&self.products);
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let guard = Self::lock(&products)?;
            debug!(count = guard.len(), "fetch_list");
            Ok(Collection::new(guard.clone()))
        })
    }

    fn delete(&self, id: ProductId) -> BoxFuture<'static, Result<(), AccessorError>> {
        let products = Arc::clone(&self.products);
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let mut guard = Self::lock(&products)?;
            let before = guard.len();
            guard.retain(|p| p.id != id);
            if guard.len() == before {
                return Err(AccessorError::NotFound(id));
            }
            debug!(id, remaining = guard.len(), "delete");
            Ok(())
        })
    }
}

fn product(id: ProductId, pt: Option<&str>, es: Option<&str>) -> Product {
    Product {
        id,
        name: LocalizedName {
            pt: pt.map(str::to_string),
            es: es.map(str::to_string),
            en: None,
        },
        images: vec![ProductImage {
            id: id * 10,
            src: format!("https://cdn.example.com/products/{id}.webp"),
        }],
    }
}

/// Built-in catalog used when no data file is configured.
pub fn seed_collection() -> Collection {
    let rows = [
        (1, Some("Camiseta básica"), Some("Camiseta básica")),
        (2, Some("Calça jeans"), Some("Pantalón vaquero")),
        (3, Some("Tênis de corrida"), Some("Zapatillas de running")),
        (4, Some("Boné"), Some("Gorra")),
        (5, Some("Mochila"), Some("Mochila")),
        (6, Some("Relógio"), Some("Reloj")),
        (7, Some("Óculos de sol"), Some("Gafas de sol")),
        (8, Some("Jaqueta"), None),
        (9, None, Some("Bufanda")),
        (10, Some("Meias"), Some("Calcetines")),
        (11, Some("Cinto de couro"), Some("Cinturón de cuero")),
        (12, Some("Carteira"), Some("Billetera")),
    ];
    Collection::new(
        rows.iter()
            .map(|(id, pt, es)| product(*id, *pt, *es))
            .collect(),
    )
}
