use fibre_registry::{resolve, Definition, ListFilter, Manager};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple dependency that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let mut manager = Manager::new();

  // This factory will only be called ONCE.
  manager.add_definition(Definition::shared("tracker.shared", || {
    println!("Creating SHARED RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  }));

  // This factory will be called on EVERY lookup.
  manager.add_definition(Definition::transient("tracker.transient", || {
    println!("Creating TRANSIENT RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  }));

  println!("--- Resolving shared ---");
  let s1 = resolve!(in manager, RequestTracker, "tracker.shared");
  let s2 = resolve!(in manager, RequestTracker, "tracker.shared");
  println!("Shared 1 ID: {}, Shared 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Shared instances should be identical");

  println!("\n--- Resolving transient ---");
  let t1 = resolve!(in manager, RequestTracker, "tracker.transient");
  let t2 = resolve!(in manager, RequestTracker, "tracker.transient");
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!((t1.id, t2.id), (1, 2));
  assert!(!Arc::ptr_eq(&t1, &t2), "Transient instances should be different");

  println!("\n--- Listing ---");
  println!("All: {:?}", manager.list_ids(ListFilter::AllRegistered));
  println!(
    "Initialized shared: {:?}",
    manager.list_ids(ListFilter::InitializedShared)
  );
}
