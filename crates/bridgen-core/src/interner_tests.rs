use crate::Interner;

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();
    let a = interner.intern("person");
    let b = interner.intern("person");
    let c = interner.intern("coord");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
}

#[test]
fn resolve_round_trip() {
    let mut interner = Interner::new();
    let sym = interner.intern("polymorphicPayload");
    assert_eq!(interner.resolve(sym), "polymorphicPayload");
    assert_eq!(interner.try_resolve(sym), Some("polymorphicPayload"));
}

#[test]
fn lookup_never_inserts() {
    let mut interner = Interner::new();
    let sym = interner.intern("t");
    assert_eq!(interner.lookup("t"), Some(sym));
    assert_eq!(interner.lookup("missing"), None);
    assert_eq!(interner.len(), 1);
}

#[test]
fn symbols_order_by_insertion() {
    let mut interner = Interner::new();
    let first = interner.intern("t");
    let second = interner.intern("person");
    assert!(first < second);
}

#[test]
fn empty_interner() {
    let interner = Interner::new();
    assert!(interner.is_empty());
    assert_eq!(interner.len(), 0);
}
