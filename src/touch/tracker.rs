//! Last-known position per active contact, keyed by the server-assigned id.
//! The id is only unique while the contact is down; the server reuses it
//! after release, so the table must drop an id the moment its End arrives.

use std::collections::HashMap;

use super::event::{TouchEvent, TouchPhase};

/// De-duplicating contact table. The native event stream is untrusted:
/// duplicated or reordered events are swallowed here rather than surfaced.
#[derive(Debug, Default)]
pub struct ContactTracker {
    contacts: HashMap<i32, (f64, f64)>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts currently down.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    #[allow(dead_code)]
    pub fn contains(&self, id: i32) -> bool {
        self.contacts.contains_key(&id)
    }

    /// A begin for an id that is already down is a duplicate delivery.
    pub fn begin(&mut self, id: i32, x: f64, y: f64) -> Option<TouchEvent> {
        if self.contacts.contains_key(&id) {
            return None;
        }
        self.contacts.insert(id, (x, y));
        Some(TouchEvent::new(TouchPhase::Begin, id, x, y))
    }

    /// A move is forwarded only when both axes differ from the last report.
    pub fn update(&mut self, id: i32, x: f64, y: f64) -> Option<TouchEvent> {
        match self.contacts.get_mut(&id) {
            Some(pos) if pos.0 != x && pos.1 != y => {
                *pos = (x, y);
                Some(TouchEvent::new(TouchPhase::Update, id, x, y))
            }
            _ => None,
        }
    }

    /// Emits the position the end event itself reported, not the stored one.
    pub fn end(&mut self, id: i32, x: f64, y: f64) -> Option<TouchEvent> {
        self.contacts
            .remove(&id)
            .map(|_| TouchEvent::new(TouchPhase::End, id, x, y))
    }
}
