use fibre_registry::{Definition, ListFilter, Manager, ResolveError};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};

// --- Test Fixtures ---

#[derive(Debug, Default)]
struct Counter {
  value: AtomicUsize,
}

#[derive(Debug, PartialEq, Eq)]
struct Dummy {
  age: u32,
}

fn sorted(ids: Vec<String>) -> Vec<String> {
  let mut ids = ids;
  ids.sort();
  ids
}

// --- Resolution ---

#[test]
fn test_shared_dependency_returns_same_instance() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::shared("test.dummy", || Dummy { age: 35 }));

  let first = manager.get("test.dummy").expect("shared dependency should resolve");
  for _ in 0..10 {
    let again = manager.get("test.dummy").unwrap();
    assert!(Arc::ptr_eq(&first, &again));
  }
  assert_eq!(first.downcast_ref::<Dummy>(), Some(&Dummy { age: 35 }));
}

#[test]
fn test_shared_factory_runs_once() {
  let calls = Arc::new(AtomicUsize::new(0));
  let calls_in_factory = Arc::clone(&calls);

  let mut manager = Manager::new();
  manager.add_definition(Definition::shared("test.once", move || {
    calls_in_factory.fetch_add(1, Ordering::SeqCst);
    Dummy { age: 1 }
  }));

  for _ in 0..5 {
    manager.get("test.once");
  }
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_transient_dependency_runs_factory_every_time() {
  let calls = Arc::new(AtomicUsize::new(0));
  let calls_in_factory = Arc::clone(&calls);

  let mut manager = Manager::new();
  manager.add_definition(Definition::transient("test.dummy", move || {
    calls_in_factory.fetch_add(1, Ordering::SeqCst);
    Dummy { age: 35 }
  }));

  let first = manager.get("test.dummy").unwrap();
  for _ in 0..10 {
    let again = manager.get("test.dummy").unwrap();
    assert!(!Arc::ptr_eq(&first, &again));
    assert_eq!(again.downcast_ref::<Dummy>(), first.downcast_ref::<Dummy>());
  }
  assert_eq!(calls.load(Ordering::SeqCst), 11);
}

#[test]
fn test_unknown_id_is_absent() {
  let mut manager = Manager::new();
  assert!(manager.get("unknown").is_none());
  assert!(!manager.contains("unknown"));
  assert!(manager.list_ids(ListFilter::AllRegistered).is_empty());
}

#[test]
fn test_latest_definition_wins() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::transient("test.value", || 1u32));
  manager.add_definition(Definition::shared("test.value", || 2u32));

  let first = manager.get_as::<u32>("test.value").unwrap();
  let second = manager.get_as::<u32>("test.value").unwrap();

  assert_eq!(*first, 2);
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(manager.list_ids(ListFilter::AllRegistered), vec!["test.value"]);
}

#[test]
fn test_redefining_a_resolved_shared_id_as_transient() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::shared("test.value", || 1u32));
  assert_eq!(*manager.get_as::<u32>("test.value").unwrap(), 1);

  manager.add_definition(Definition::transient("test.value", || 2u32));
  assert_eq!(manager.list_ids(ListFilter::AllRegistered), vec!["test.value"]);

  // Pending definitions take precedence over the cache.
  assert_eq!(*manager.get_as::<u32>("test.value").unwrap(), 2);
  assert_eq!(*manager.get_as::<u32>("test.value").unwrap(), 2);

  // The earlier shared value stays cached behind the transient definition.
  assert_eq!(manager.list_ids(ListFilter::AllRegistered), vec!["test.value"]);
  assert_eq!(
    manager.list_ids(ListFilter::InitializedShared),
    vec!["test.value"]
  );
}

#[test]
fn test_redefining_a_resolved_shared_id_as_shared() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::shared("svc.a", || 1u32));
  manager.add_definition(Definition::transient("svc.other", || 0u32));
  let first = manager.get_as::<u32>("svc.a").unwrap();

  manager.add_definition(Definition::shared("svc.a", || 2u32));
  assert_eq!(
    sorted(manager.list_ids(ListFilter::AllRegistered)),
    vec!["svc.a", "svc.other"]
  );
  assert_eq!(manager.list_ids(ListFilter::InitializedShared), vec!["svc.a"]);

  let second = manager.get_as::<u32>("svc.a").unwrap();
  let third = manager.get_as::<u32>("svc.a").unwrap();
  assert_eq!((*first, *second), (1, 2));
  assert!(Arc::ptr_eq(&second, &third));

  assert_eq!(
    sorted(manager.list_ids(ListFilter::AllRegistered)),
    vec!["svc.a", "svc.other"]
  );
  assert_eq!(manager.list_ids(ListFilter::InitializedShared), vec!["svc.a"]);
}

// --- Scenarios ---

#[test]
fn test_shared_counter_mutation_is_visible() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::shared("svc.a", Counter::default));

  let first = manager.get_as::<Counter>("svc.a").unwrap();
  assert_eq!(first.value.load(Ordering::SeqCst), 0);
  first.value.fetch_add(5, Ordering::SeqCst);

  let second = manager.get_as::<Counter>("svc.a").unwrap();
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(second.value.load(Ordering::SeqCst), 5);
}

#[test]
fn test_transient_lists_are_independent() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::transient("svc.b", || Mutex::new(Vec::<u32>::new())));

  let first = manager.get_as::<Mutex<Vec<u32>>>("svc.b").unwrap();
  let second = manager.get_as::<Mutex<Vec<u32>>>("svc.b").unwrap();
  assert!(!Arc::ptr_eq(&first, &second));

  first.lock().unwrap().push(1);
  second.lock().unwrap().extend([2, 3]);

  assert_eq!(*first.lock().unwrap(), vec![1]);
  assert_eq!(*second.lock().unwrap(), vec![2, 3]);
}

// --- Listing ---

#[test]
fn test_resolved_shared_id_is_listed_once() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::shared("svc.shared", || 0u8));
  manager.add_definition(Definition::transient("svc.transient", || 0u8));

  manager.get("svc.shared");
  manager.get("svc.shared");
  manager.get("svc.transient");

  assert_eq!(
    sorted(manager.list_ids(ListFilter::AllRegistered)),
    vec!["svc.shared", "svc.transient"]
  );
  assert_eq!(
    manager.list_ids(ListFilter::InitializedShared),
    vec!["svc.shared"]
  );
}

#[test]
fn test_list_ids_over_fifty_definitions() {
  let mut manager = Manager::new();
  for i in 0..30 {
    manager.add_definition(Definition::shared(format!("shared.{i}"), move || Dummy { age: i }));
  }
  for i in 0..20 {
    manager.add_definition(Definition::transient(format!("transient.{i}"), move || Dummy { age: i }));
  }

  assert!(manager.list_ids(ListFilter::InitializedShared).is_empty());

  manager.get("shared.3").unwrap();
  manager.get("shared.17").unwrap();
  manager.get("transient.5").unwrap();

  let initialized: BTreeSet<String> = manager
    .list_ids(ListFilter::InitializedShared)
    .into_iter()
    .collect();
  assert_eq!(
    initialized,
    BTreeSet::from(["shared.17".to_string(), "shared.3".to_string()])
  );

  let all = manager.list_ids(ListFilter::default());
  assert_eq!(all.len(), 50);
  let unique: BTreeSet<&String> = all.iter().collect();
  assert_eq!(unique.len(), 50);
  assert!(all.iter().any(|id| id == "transient.5"));
  assert!(all.iter().any(|id| id == "shared.29"));
}

#[test]
fn test_unrecognized_filter_lists_everything() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::shared("a", || 1u8));
  manager.add_definition(Definition::transient("b", || 2u8));
  manager.get("a");

  let filter: ListFilter = "something-else".parse().unwrap();
  assert_eq!(sorted(manager.list_ids(filter)), vec!["a", "b"]);
  assert_eq!(manager.list_ids("initialized-shared".into()), vec!["a"]);
}

// --- Typed retrieval ---

#[test]
fn test_try_get_reports_missing_and_mistyped() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::shared("config.timeout", || 30u64));

  assert_eq!(
    manager.try_get::<u64>("config.missing").unwrap_err(),
    ResolveError::NotFound {
      id: "config.missing".to_string()
    }
  );

  let err = manager.try_get::<String>("config.timeout").unwrap_err();
  assert_eq!(
    err,
    ResolveError::TypeMismatch {
      id: "config.timeout".to_string(),
      expected: std::any::type_name::<String>(),
    }
  );
  assert_eq!(
    err.to_string(),
    "dependency 'config.timeout' is not of type alloc::string::String"
  );

  // The mismatched lookup still resolved and cached the shared value.
  assert_eq!(
    manager.list_ids(ListFilter::InitializedShared),
    vec!["config.timeout"]
  );
  assert_eq!(*manager.try_get::<u64>("config.timeout").unwrap(), 30);
}

#[test]
fn test_get_as_is_none_on_type_mismatch() {
  let mut manager = Manager::new();
  manager.add_definition(Definition::transient("name", || "fibre".to_string()));

  assert!(manager.get_as::<u32>("name").is_none());
  assert_eq!(manager.get_as::<String>("name").as_deref().map(String::as_str), Some("fibre"));
}

#[test]
fn test_raw_initializer_definition() {
  let shared_value: Arc<Dummy> = Arc::new(Dummy { age: 7 });
  let handle = Arc::clone(&shared_value);

  let mut manager = Manager::new();
  manager.add_definition(Definition::from_initializer(
    "test.handle",
    Arc::new(move || handle.clone() as fibre_registry::Instance),
    false,
  ));

  // A factory handing out one handle is effectively shared regardless of the flag.
  let a = manager.get_as::<Dummy>("test.handle").unwrap();
  let b = manager.get_as::<Dummy>("test.handle").unwrap();
  assert!(Arc::ptr_eq(&a, &b));
  assert!(Arc::ptr_eq(&a, &shared_value));
  assert!(manager.list_ids(ListFilter::InitializedShared).is_empty());
}
