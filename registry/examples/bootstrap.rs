use fibre_registry::{global, resolve, Definition, ListFilter};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// --- Application Objects ---

trait ProductRepository: Send + Sync {
  fn get_by_sku(&self, sku: &str) -> HashMap<&'static str, String>;
}

struct DummyProductRepository;
impl ProductRepository for DummyProductRepository {
  fn get_by_sku(&self, sku: &str) -> HashMap<&'static str, String> {
    HashMap::from([
      ("sku", sku.to_string()),
      ("price", "99.9".to_string()),
      ("stock", "100".to_string()),
    ])
  }
}

trait ProductService: Send + Sync {
  fn check_availability(&self, sku: &str, qty: u32) -> bool;
}

struct DummyProductService {
  repo: Arc<dyn ProductRepository>,
}

impl ProductService for DummyProductService {
  fn check_availability(&self, sku: &str, qty: u32) -> bool {
    let product = self.repo.get_by_sku(sku);
    product
      .get("stock")
      .and_then(|stock| stock.parse::<u32>().ok())
      .is_some_and(|stock| stock >= qty)
  }
}

// --- Bootstrap ---

fn register_services() {
  global().add_definition(Definition::shared(
    "app.repository.product",
    || -> Arc<dyn ProductRepository> { Arc::new(DummyProductRepository) },
  ));

  // The service factory resolves its own dependency; nothing runs until first use.
  global().add_definition(Definition::shared(
    "app.service.product",
    || -> Arc<dyn ProductService> {
      Arc::new(DummyProductService {
        repo: resolve!(trait ProductRepository, "app.repository.product"),
      })
    },
  ));
}

fn main() {
  // RUST_LOG=fibre_registry=trace shows every registry transition.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  register_services();
  println!(
    "Initialized before first use: {:?}",
    global().list_ids(ListFilter::InitializedShared)
  );

  let product_service = resolve!(trait ProductService, "app.service.product");
  let is_available = product_service.check_availability("some-sku", 2);
  println!("isAvailable: {}", is_available);
  assert!(is_available);

  let mut initialized = global().list_ids(ListFilter::InitializedShared);
  initialized.sort();
  println!("Initialized after first use: {:?}", initialized);
  assert_eq!(initialized, vec!["app.repository.product", "app.service.product"]);
}
