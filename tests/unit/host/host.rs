use super::*;

fn host() -> Host {
    Host::new(Viewport::new(1000.0, 800.0))
}

fn recorder(host: &Host) -> (Rc<RefCell<Vec<HostEvent>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = host.on_event(move |e| sink.borrow_mut().push(*e));
    (seen, sub)
}

#[test]
fn dropping_subscription_removes_listener() {
    let host = host();
    let (seen, sub) = recorder(&host);
    assert_eq!(host.listener_count(), 1);
    host.scroll_now(10.0);
    drop(sub);
    assert_eq!(host.listener_count(), 0);
    host.scroll_now(20.0);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn queued_scroll_is_last_value_wins() {
    let host = host();
    let (seen, _sub) = recorder(&host);
    host.queue_scroll(100.0);
    host.queue_scroll(250.0);
    host.queue_scroll(180.0);
    assert!(host.has_pending_frame());
    assert!(host.frame());
    assert!(!host.frame());
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind, HostEventKind::Scroll);
    assert_eq!(seen[0].viewport.scroll, 180.0);
}

#[test]
fn resize_and_load_carry_viewport() {
    let host = host();
    let (seen, _sub) = recorder(&host);
    host.scroll_now(300.0);
    host.resize(Size::new(500.0, 900.0));
    host.notify_load();
    let seen = seen.borrow();
    assert_eq!(seen[1].kind, HostEventKind::Resize);
    assert_eq!(seen[1].viewport.size, Size::new(500.0, 900.0));
    assert_eq!(seen[1].viewport.scroll, 300.0);
    assert_eq!(seen[2].kind, HostEventKind::Load);
}

#[test]
fn listener_can_unsubscribe_itself_during_dispatch() {
    let host = host();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();
    let calls = Rc::new(Cell::new(0));
    let (slot2, calls2) = (Rc::clone(&slot), Rc::clone(&calls));
    let sub = host.on_event(move |_| {
        calls2.set(calls2.get() + 1);
        slot2.borrow_mut().take();
    });
    *slot.borrow_mut() = Some(sub);
    host.scroll_now(1.0);
    host.scroll_now(2.0);
    assert_eq!(calls.get(), 1);
    assert_eq!(host.listener_count(), 0);
}

#[test]
fn events_emitted_during_dispatch_are_delivered_after() {
    let host = Rc::new(host());
    let order = Rc::new(RefCell::new(Vec::new()));
    let (h, o) = (Rc::downgrade(&host), Rc::clone(&order));
    let _a = host.on_event(move |e| {
        o.borrow_mut().push(("a", e.kind));
        if e.kind == HostEventKind::Scroll {
            if let Some(h) = h.upgrade() {
                h.notify_load();
            }
        }
    });
    let o = Rc::clone(&order);
    let _b = host.on_event(move |e| o.borrow_mut().push(("b", e.kind)));

    host.scroll_now(5.0);
    assert_eq!(
        *order.borrow(),
        vec![
            ("a", HostEventKind::Scroll),
            ("b", HostEventKind::Scroll),
            ("a", HostEventKind::Load),
            ("b", HostEventKind::Load),
        ]
    );
}

#[test]
fn subscription_outliving_host_is_harmless() {
    let host = host();
    let (_seen, sub) = recorder(&host);
    drop(host);
    sub.unsubscribe();
}
