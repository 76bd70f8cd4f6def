use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::foundation::error::{ErrorCode, PluginError};

fn recording() -> (ResponseHandle, Rc<RefCell<Vec<Reply>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (
        ResponseHandle::new(move |r| sink.borrow_mut().push(r)),
        seen,
    )
}

#[test]
fn second_admission_is_rejected_without_touching_the_first() {
    let mut guard = SessionGuard::new();
    let (first, first_seen) = recording();
    let (second, second_seen) = recording();

    guard.admit(first).unwrap();
    let Err(Busy(rejected)) = guard.admit(second) else {
        panic!("expected busy");
    };
    rejected.send(Err(PluginError::new(ErrorCode::MultipleRequests, "busy")));

    assert!(guard.is_busy());
    assert!(first_seen.borrow().is_empty());
    assert_eq!(second_seen.borrow().len(), 1);

    assert!(guard.resolve(Ok(None)));
    assert_eq!(first_seen.borrow().as_slice(), &[Ok(None)]);
    assert!(!guard.is_busy());
}

#[test]
fn resolve_without_pending_is_a_no_op() {
    let mut guard = SessionGuard::new();
    assert!(!guard.resolve(Ok(None)));
}

#[test]
fn slot_is_free_again_after_resolve() {
    let mut guard = SessionGuard::new();
    let (a, _) = recording();
    let (b, _) = recording();
    guard.admit(a).unwrap();
    guard.resolve(Ok(None));
    assert!(guard.admit(b).is_ok());
}
