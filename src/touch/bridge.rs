//! Forward normalized touch events into a downstream touch pipeline,
//! remapping native contact ids to pipeline-assigned handles and flipping
//! Y into the pipeline's bottom-left origin.

use std::collections::{HashMap, VecDeque};

use crate::tags::Tags;

use super::event::{TouchEvent, TouchPhase};

/// Identifier the downstream pipeline assigns to a forwarded touch.
pub type TouchHandle = u64;

/// The downstream touch pipeline contract.
pub trait TouchSink {
    fn begin_touch(&mut self, position: (f64, f64), tags: &Tags) -> TouchHandle;
    fn move_touch(&mut self, handle: TouchHandle, position: (f64, f64));
    fn end_touch(&mut self, handle: TouchHandle);
}

/// Maps native contact ids to sink handles for the lifetime of each contact.
/// A move or end whose id was never forwarded as a begin is dropped.
pub struct TouchBridge {
    surface_height: f64,
    tags: Tags,
    handles: HashMap<i32, TouchHandle>,
}

impl TouchBridge {
    pub fn new(surface_height: f64, tags: Tags) -> Self {
        Self {
            surface_height,
            tags,
            handles: HashMap::new(),
        }
    }

    /// Number of touches currently forwarded and not yet ended.
    pub fn active(&self) -> usize {
        self.handles.len()
    }

    /// Drain the queue in arrival order into the sink.
    pub fn forward(&mut self, queue: &mut VecDeque<TouchEvent>, sink: &mut impl TouchSink) {
        while let Some(ev) = queue.pop_front() {
            let position = self.flip(ev.x, ev.y);
            match ev.phase {
                TouchPhase::Begin => {
                    let handle = sink.begin_touch(position, &self.tags);
                    self.handles.insert(ev.id, handle);
                }
                TouchPhase::Update => {
                    if let Some(&handle) = self.handles.get(&ev.id) {
                        sink.move_touch(handle, position);
                    }
                }
                TouchPhase::End => {
                    if let Some(handle) = self.handles.remove(&ev.id) {
                        sink.end_touch(handle);
                    }
                }
            }
        }
    }

    // Native Y grows downward from the top of the display; sinks expect
    // Y to grow upward from the bottom.
    fn flip(&self, x: f64, y: f64) -> (f64, f64) {
        (x, self.surface_height - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Begin(TouchHandle, (f64, f64), Tags),
        Move(TouchHandle, (f64, f64)),
        End(TouchHandle),
    }

    /// Sink that allocates sequential handles and records every call.
    #[derive(Default)]
    struct RecordingSink {
        next_handle: TouchHandle,
        calls: Vec<Call>,
    }

    impl TouchSink for RecordingSink {
        fn begin_touch(&mut self, position: (f64, f64), tags: &Tags) -> TouchHandle {
            self.next_handle += 1;
            self.calls.push(Call::Begin(self.next_handle, position, tags.clone()));
            self.next_handle
        }

        fn move_touch(&mut self, handle: TouchHandle, position: (f64, f64)) {
            self.calls.push(Call::Move(handle, position));
        }

        fn end_touch(&mut self, handle: TouchHandle) {
            self.calls.push(Call::End(handle));
        }
    }

    fn queue_of(events: &[TouchEvent]) -> VecDeque<TouchEvent> {
        events.iter().copied().collect()
    }

    #[test]
    fn begin_flips_y_and_records_mapping() {
        let mut bridge = TouchBridge::new(100.0, Tags::default());
        let mut sink = RecordingSink::default();
        let mut queue = queue_of(&[TouchEvent::new(TouchPhase::Begin, 5, 10.0, 20.0)]);

        bridge.forward(&mut queue, &mut sink);

        assert_eq!(sink.calls, vec![Call::Begin(1, (10.0, 80.0), Tags::default())]);
        assert_eq!(bridge.active(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn lifecycle_reuses_the_allocated_handle() {
        let mut bridge = TouchBridge::new(200.0, Tags::default());
        let mut sink = RecordingSink::default();
        let mut queue = queue_of(&[
            TouchEvent::new(TouchPhase::Begin, 5, 10.0, 20.0),
            TouchEvent::new(TouchPhase::Update, 5, 15.0, 25.0),
            TouchEvent::new(TouchPhase::End, 5, 15.0, 25.0),
        ]);

        bridge.forward(&mut queue, &mut sink);

        assert_eq!(
            sink.calls,
            vec![
                Call::Begin(1, (10.0, 180.0), Tags::default()),
                Call::Move(1, (15.0, 175.0)),
                Call::End(1),
            ]
        );
        assert_eq!(bridge.active(), 0);
    }

    #[test]
    fn move_and_end_without_begin_are_dropped() {
        let mut bridge = TouchBridge::new(100.0, Tags::default());
        let mut sink = RecordingSink::default();
        let mut queue = queue_of(&[
            TouchEvent::new(TouchPhase::Update, 9, 1.0, 1.0),
            TouchEvent::new(TouchPhase::End, 9, 1.0, 1.0),
        ]);

        bridge.forward(&mut queue, &mut sink);

        assert!(sink.calls.is_empty());
        assert_eq!(bridge.active(), 0);
    }

    #[test]
    fn concurrent_touches_get_distinct_handles() {
        let mut bridge = TouchBridge::new(100.0, Tags::default());
        let mut sink = RecordingSink::default();
        let mut queue = queue_of(&[
            TouchEvent::new(TouchPhase::Begin, 3, 1.0, 1.0),
            TouchEvent::new(TouchPhase::Begin, 4, 2.0, 2.0),
            TouchEvent::new(TouchPhase::End, 3, 1.0, 1.0),
            TouchEvent::new(TouchPhase::Update, 4, 5.0, 5.0),
        ]);

        bridge.forward(&mut queue, &mut sink);

        assert_eq!(
            sink.calls,
            vec![
                Call::Begin(1, (1.0, 99.0), Tags::default()),
                Call::Begin(2, (2.0, 98.0), Tags::default()),
                Call::End(1),
                Call::Move(2, (5.0, 95.0)),
            ]
        );
        assert_eq!(bridge.active(), 1);
    }

    #[test]
    fn empty_queue_is_a_no_op() {
        let mut bridge = TouchBridge::new(100.0, Tags::default());
        let mut sink = RecordingSink::default();
        let mut queue = VecDeque::new();

        bridge.forward(&mut queue, &mut sink);

        assert!(sink.calls.is_empty());
        assert_eq!(bridge.active(), 0);
    }

    #[test]
    fn configured_tags_are_passed_through() {
        let tags = Tags::new(["Touch", "Pad"]);
        let mut bridge = TouchBridge::new(50.0, tags.clone());
        let mut sink = RecordingSink::default();
        let mut queue = queue_of(&[TouchEvent::new(TouchPhase::Begin, 1, 0.0, 0.0)]);

        bridge.forward(&mut queue, &mut sink);

        assert_eq!(sink.calls, vec![Call::Begin(1, (0.0, 50.0), tags)]);
    }
}
