//! Integration tests for the carousel scroller
//!
//! These tests drive the public facade the way a host would: append items,
//! request scrolls and feed ticks, then check geometry and emitted events.

use carousel_scroller::{
    Rect, Ring, Scroller, ScrollerConfig, ScrollerError, ScrollerEvent, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(16);

/// Five 200px items behind an 800px clip starting at x = 0
fn five_pages() -> Scroller<u32> {
    let mut scroller = Scroller::new(
        ScrollerConfig::default(),
        Viewport::new(0.0, 0.0, 800.0, 300.0),
    );
    for page in 0..5 {
        scroller
            .append_with_size(page, 200.0, 300.0)
            .expect("Failed to append page");
    }
    scroller
}

fn record(scroller: &mut Scroller<u32>) -> Rc<RefCell<Vec<ScrollerEvent<u32>>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    scroller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

fn settle(scroller: &mut Scroller<u32>) {
    let mut ticks = 0;
    while scroller.tick(TICK) {
        ticks += 1;
        assert!(ticks < 1000, "Scroller never settled");
    }
}

fn geometries(scroller: &Scroller<u32>) -> Vec<Option<Rect>> {
    (0..scroller.item_count())
        .map(|i| scroller.item_geometry(i))
        .collect()
}

/// Visible items must appear left to right in display order
fn assert_bounded_order(scroller: &Scroller<u32>) {
    let visible: Vec<f64> = (0..scroller.item_count())
        .filter(|&i| scroller.item_visible(i) == Some(true))
        .filter_map(|i| scroller.item_geometry(i).map(|rect| rect.x))
        .collect();
    assert!(
        visible.windows(2).all(|pair| pair[0] < pair[1]),
        "Visible items out of order: {:?}",
        visible
    );
}

#[test]
fn test_initial_layout_covers_viewport() {
    let scroller = five_pages();
    assert_eq!(scroller.current_index(), Some(0));
    for i in 0..4 {
        assert_eq!(scroller.item_visible(i), Some(true));
        assert_eq!(scroller.item_geometry(i).unwrap().x, i as f64 * 200.0);
    }
    // The viewport is already covered, the fifth page stays hidden
    assert_eq!(scroller.item_visible(4), Some(false));
}

#[test]
fn test_scroll_to_takes_the_short_way_round() {
    let mut scroller = five_pages();
    let log = record(&mut scroller);

    scroller
        .scroll_to(3, Duration::from_millis(300), 0)
        .expect("scroll_to should start");
    assert_eq!(
        log.borrow().first(),
        Some(&ScrollerEvent::AnimStart { from: 0, to: 3 })
    );

    // Going backwards over pages 4 and 3 moves the content 400px right
    scroller.tick(TICK);
    let first = scroller.item_geometry(0).unwrap().x;
    assert!(first > 0.0, "Content should move right, got x = {}", first);

    settle(&mut scroller);
    assert_eq!(scroller.current_index(), Some(3));
    assert_eq!(scroller.item_geometry(3).unwrap().x, 0.0);
    assert_eq!(scroller.item_geometry(0).unwrap().x, 400.0);
    assert_eq!(log.borrow().last(), Some(&ScrollerEvent::AnimStop));
}

#[test]
fn test_scroll_to_with_offset_wraps() {
    let mut scroller = five_pages();
    scroller.fast_scroll(3).unwrap();
    settle(&mut scroller);

    // 3 + 4 wraps to page 2
    scroller
        .scroll_to(3, Duration::from_millis(100), 4)
        .unwrap();
    settle(&mut scroller);
    assert_eq!(scroller.current_index(), Some(2));
    assert_eq!(scroller.item_geometry(2).unwrap().x, 0.0);
}

#[test]
fn test_freeze_nesting() {
    let mut scroller = five_pages();
    scroller.freeze();
    scroller.freeze();
    scroller.thaw().unwrap();
    assert!(scroller.is_frozen());
    assert_eq!(
        scroller.scroll_to(2, Duration::from_millis(300), 0),
        Err(ScrollerError::Busy)
    );

    scroller.thaw().unwrap();
    assert!(!scroller.is_frozen());
    assert_eq!(scroller.scroll_to(2, Duration::from_millis(300), 0), Ok(()));
}

#[test]
fn test_scroll_while_frozen_changes_nothing() {
    let mut scroller = five_pages();
    let before = geometries(&scroller);
    let log = record(&mut scroller);

    scroller.freeze();
    assert_eq!(scroller.fast_scroll(2), Err(ScrollerError::Busy));
    assert_eq!(scroller.jump_to(2), Err(ScrollerError::Busy));
    for _ in 0..10 {
        scroller.tick(TICK);
    }

    assert_eq!(geometries(&scroller), before);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_frozen_animation_resumes_on_thaw() {
    let mut scroller = five_pages();
    scroller.scroll_to(1, Duration::from_millis(160), 0).unwrap();
    scroller.tick(TICK);
    let paused_at = scroller.item_geometry(0).unwrap().x;

    scroller.freeze();
    for _ in 0..5 {
        assert!(scroller.tick(TICK));
    }
    assert_eq!(scroller.item_geometry(0).unwrap().x, paused_at);

    scroller.thaw().unwrap();
    settle(&mut scroller);
    assert_eq!(scroller.current_index(), Some(1));
}

#[test]
fn test_jump_to_every_page() {
    let mut scroller = five_pages();
    for i in 0..5 {
        scroller.jump_to(i).unwrap();
        assert_eq!(scroller.current_index(), Some(i));
        assert_eq!(scroller.item_geometry(i).unwrap().x, 0.0);
        assert_eq!(scroller.item_visible(i), Some(true));
    }
    assert!(matches!(
        scroller.jump_to(5),
        Err(ScrollerError::InvalidArgument(_))
    ));
}

#[test]
fn test_jump_to_on_empty_scroller() {
    let mut scroller: Scroller<u32> = Scroller::default();
    assert_eq!(scroller.jump_to(0), Err(ScrollerError::Empty));
    assert_eq!(
        scroller.scroll_to(0, Duration::from_millis(100), 0),
        Err(ScrollerError::Empty)
    );
}

#[test]
fn test_ring_stays_closed_through_edits() {
    let mut ring: Ring<u32> = Ring::new();
    for handle in 0..6 {
        ring.append(handle, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert!(ring.is_closed());
    }

    for index in [5, 0, 2] {
        ring.remove_at(index).unwrap();
        assert!(ring.is_closed());
    }
    assert_eq!(ring.len(), 3);

    ring.append(10, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    assert!(ring.is_closed());
    let order: Vec<u32> = ring.iter().map(|(_, item)| *item.handle()).collect();
    assert_eq!(order, vec![1, 2, 4, 10]);

    assert_eq!(ring.clear(), vec![1, 2, 4, 10]);
    assert!(ring.is_empty());
}

#[test]
fn test_removing_displayed_page_keeps_valid_current() {
    let mut scroller = five_pages();
    scroller.jump_to(3).unwrap();

    assert_eq!(scroller.remove_at(3), Ok(3));
    assert_eq!(scroller.item_count(), 4);
    let current = scroller.current_index().expect("A current page must remain");
    assert!(current < scroller.item_count());
    assert_eq!(scroller.item_geometry(current).unwrap().x, 0.0);
}

#[test]
fn test_remove_every_page() {
    let mut scroller = five_pages();
    while scroller.item_count() > 0 {
        scroller.remove_at(0).unwrap();
        if scroller.item_count() > 0 {
            assert!(scroller.current_index().is_some());
        }
    }
    assert_eq!(scroller.current_index(), None);
    assert_eq!(scroller.jump_to(0), Err(ScrollerError::Empty));
}

#[test]
fn test_disabling_loop_never_wraps() {
    let mut scroller = five_pages();
    scroller.jump_to(4).unwrap();
    // Looping fills the viewport by wrapping to the head
    assert_eq!(scroller.item_visible(0), Some(true));

    scroller.set_looping(false);
    scroller.update();
    assert_bounded_order(&scroller);
    assert_eq!(scroller.item_visible(0), Some(false));

    for i in 0..5 {
        scroller.jump_to(i).unwrap();
        assert_bounded_order(&scroller);
    }
}

#[test]
fn test_disabling_loop_mid_animation() {
    let mut scroller = five_pages();
    let log = record(&mut scroller);

    // Page 4 is one hop backwards across the wrap point
    scroller.scroll_to(4, Duration::from_millis(160), 0).unwrap();
    scroller.set_looping(false);
    assert!(!scroller.is_animating());
    assert!(log.borrow().contains(&ScrollerEvent::AnimStop));

    settle(&mut scroller);
    let current = scroller.current_index().expect("A current page must remain");
    assert_eq!(scroller.item_visible(current), Some(true));
    assert_eq!(scroller.item_geometry(current).unwrap().x, 0.0);
    assert_bounded_order(&scroller);
}

#[test]
fn test_disabling_loop_after_wrapping_step() {
    let mut scroller = five_pages();
    scroller.scroll_to(4, Duration::from_millis(160), 0).unwrap();
    scroller.tick(TICK);
    scroller.set_looping(false);
    settle(&mut scroller);

    let current = scroller.current_index().expect("A current page must remain");
    assert_eq!(scroller.item_visible(current), Some(true));
    assert_eq!(scroller.item_geometry(current).unwrap().x, 0.0);
    assert_bounded_order(&scroller);
}

#[test]
fn test_bounded_scroll_clamps_offset() {
    let mut scroller = five_pages();
    scroller.set_looping(false);

    scroller.scroll_to(3, Duration::from_millis(100), 10).unwrap();
    settle(&mut scroller);
    assert_eq!(scroller.current_index(), Some(4));
    assert_bounded_order(&scroller);
}

#[test]
fn test_viewport_change_keeps_alignment() {
    let mut scroller = five_pages();
    scroller.jump_to(2).unwrap();
    scroller
        .set_viewport(Viewport::new(50.0, 20.0, 600.0, 300.0))
        .unwrap();

    let rect = scroller.item_geometry(2).unwrap();
    assert_eq!((rect.x, rect.y), (50.0, 20.0));
    assert_eq!(scroller.current_index(), Some(2));
}

#[test]
fn test_events_serialize_for_hosts() {
    let mut scroller = five_pages();
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    scroller.subscribe(move |event| {
        sink.borrow_mut()
            .push(serde_json::to_string(event).expect("Failed to serialize event"));
    });

    scroller.jump_to(1).unwrap();
    let lines = lines.borrow();
    assert_eq!(
        lines.last().map(String::as_str),
        Some(r#"{"event":"page-changed","index":1}"#)
    );
    assert!(lines.iter().any(|line| line.starts_with(r#"{"event":"item-moved""#)));
}

#[test]
fn test_unsubscribed_listener_is_silent() {
    let mut scroller = five_pages();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = scroller.subscribe(move |_| *sink.borrow_mut() += 1);

    scroller.update();
    let seen = *count.borrow();
    assert!(seen > 0);

    assert!(scroller.unsubscribe(id));
    scroller.update();
    assert_eq!(*count.borrow(), seen);
}

#[test]
fn test_destroy_hands_back_every_page() {
    let scroller = five_pages();
    let mut handles = scroller.destroy();
    handles.sort_unstable();
    assert_eq!(handles, vec![0, 1, 2, 3, 4]);
}
