use fibre_registry::{global, resolve, Definition, ResolveError};
use std::panic;

struct MailTransport {
  host: String,
}

fn main() {
  global().add_definition(Definition::shared("mail.transport", || MailTransport {
    host: "smtp.internal".to_string(),
  }));

  // Optional dependencies: an unknown id is a plain `None`, never an error.
  let audit_log = global().get("audit.log");
  println!("audit.log registered: {}", audit_log.is_some());
  assert!(audit_log.is_none());

  // Typed lookups tell a missing id apart from a value of another type.
  match global().try_get::<MailTransport>("mail.relay") {
    Err(err @ ResolveError::NotFound { .. }) => println!("mail.relay: {}", err),
    other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
  }
  match global().try_get::<String>("mail.transport") {
    Err(err @ ResolveError::TypeMismatch { .. }) => println!("mail.transport: {}", err),
    other => panic!("expected TypeMismatch, got {:?}", other.map(|_| ())),
  }

  let transport = resolve!(MailTransport, "mail.transport");
  println!("mail.transport resolved to {}", transport.host);

  // Required dependencies: `resolve!` aborts bootstrap on a missing id.
  let outcome = panic::catch_unwind(|| resolve!(MailTransport, "mail.relay").host.clone());
  assert!(outcome.is_err(), "a missing required dependency must panic");
  println!("resolve! refused to continue without mail.relay");
}
