//! XInput2 touch event source.
//!
//! Owns the Xlib display connection, registers for raw touch begin/update/end
//! across all devices on the root window, and drains already-queued events
//! into normalized [`TouchEvent`]s without blocking. All interpretation
//! happens in [`ContactTracker`] on decoded values; this module is the only
//! place raw X memory is touched.

use std::collections::VecDeque;
use std::ffi::CString;
use std::os::raw::c_int;
use std::ptr;

use x11::{xinput2 as xi2, xlib};

use crate::touch::{ContactTracker, TouchEvent};

/// `QueuedAlready` mode for `XEventsQueued`: return the number of events
/// already in the library queue without reading from the connection. The x11
/// crate does not re-export this Xlib constant, whose ABI value is 0.
const QUEUED_ALREADY: c_int = 0;

/// Fatal connection-time failures. Once the source is open the event stream
/// is untrusted and malformed events are dropped instead of reported.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot open X display \"{0}\"")]
    OpenDisplay(String),
    #[error("XInputExtension not available on this display")]
    ExtensionMissing,
    #[error("server speaks XInput {0}.{1}, touch needs 2.2")]
    VersionUnsupported(i32, i32),
    #[error("XISelectEvents failed with status {0}")]
    SelectEvents(i32),
}

pub struct XiTouchSource {
    // Null once closed; every operation on a closed source is a no-op.
    display: *mut xlib::Display,
    opcode: c_int,
    tracker: ContactTracker,
}

impl XiTouchSource {
    /// Connect to `display_name` and subscribe to touch events.
    pub fn open(display_name: &str) -> Result<Self, SourceError> {
        let name = CString::new(display_name)
            .map_err(|_| SourceError::OpenDisplay(display_name.into()))?;

        unsafe {
            let display = xlib::XOpenDisplay(name.as_ptr());
            if display.is_null() {
                return Err(SourceError::OpenDisplay(display_name.into()));
            }

            let extension = CString::new("XInputExtension").unwrap();
            let mut opcode = 0;
            let mut event = 0;
            let mut error = 0;
            if xlib::XQueryExtension(
                display,
                extension.as_ptr(),
                &mut opcode,
                &mut event,
                &mut error,
            ) == 0
            {
                xlib::XCloseDisplay(display);
                return Err(SourceError::ExtensionMissing);
            }

            // Touch events exist since XInput 2.2; the server downgrades the
            // reply to what it actually supports.
            let mut major = 2;
            let mut minor = 2;
            if xi2::XIQueryVersion(display, &mut major, &mut minor) != xlib::Success as c_int {
                xlib::XCloseDisplay(display);
                return Err(SourceError::VersionUnsupported(major, minor));
            }
            log::info!("Using XInput {}.{} on display {}", major, minor, display_name);

            let mut mask = [0u8; 3];
            xi2::XISetMask(&mut mask, xi2::XI_TouchBegin);
            xi2::XISetMask(&mut mask, xi2::XI_TouchUpdate);
            xi2::XISetMask(&mut mask, xi2::XI_TouchEnd);

            let mut event_mask = xi2::XIEventMask {
                deviceid: xi2::XIAllDevices,
                mask_len: mask.len() as c_int,
                mask: mask.as_mut_ptr(),
            };

            let root = xlib::XDefaultRootWindow(display);
            let status = xi2::XISelectEvents(display, root, &mut event_mask, 1);
            if status != xlib::Success as c_int {
                xlib::XCloseDisplay(display);
                return Err(SourceError::SelectEvents(status));
            }

            Ok(Self {
                display,
                opcode,
                tracker: ContactTracker::new(),
            })
        }
    }

    /// Height of the default screen, used as the Y-flip surface height.
    pub fn screen_height(&self) -> i32 {
        if self.display.is_null() {
            return 0;
        }
        unsafe { xlib::XDisplayHeight(self.display, xlib::XDefaultScreen(self.display)) }
    }

    /// Append every already-queued touch event to `out` in arrival order.
    /// Never blocks: only events the connection has locally queued are
    /// consumed, nothing is requested from the server.
    pub fn drain(&mut self, out: &mut VecDeque<TouchEvent>) -> usize {
        if self.display.is_null() {
            return 0;
        }

        let mut appended = 0;
        unsafe {
            // The locally-queued count is only meaningful once buffered
            // requests have gone out.
            xlib::XFlush(self.display);

            while xlib::XEventsQueued(self.display, QUEUED_ALREADY) > 0 {
                let mut event: xlib::XEvent = std::mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);

                if event.get_type() != xlib::GenericEvent {
                    continue;
                }

                let cookie = &mut event.generic_event_cookie;
                if xlib::XGetEventData(self.display, cookie) == 0 {
                    continue;
                }

                if cookie.extension == self.opcode {
                    let device_event = cookie.data as *const xi2::XIDeviceEvent;
                    if let Some(ev) = self.normalize(cookie.evtype, device_event) {
                        out.push_back(ev);
                        appended += 1;
                    }
                }

                xlib::XFreeEventData(self.display, cookie);
            }
        }

        appended
    }

    /// Apply the per-kind policy to one decoded device event. The contact's
    /// `detail` is its id for the lifetime of the touch.
    unsafe fn normalize(
        &mut self,
        evtype: c_int,
        event: *const xi2::XIDeviceEvent,
    ) -> Option<TouchEvent> {
        if event.is_null() {
            return None;
        }
        let event = &*event;
        let (id, x, y) = (event.detail, event.event_x, event.event_y);

        match evtype {
            xi2::XI_TouchBegin => self.tracker.begin(id, x, y),
            xi2::XI_TouchUpdate => self.tracker.update(id, x, y),
            xi2::XI_TouchEnd => self.tracker.end(id, x, y),
            _ => None,
        }
    }

    /// Close the display connection. Safe to call more than once; draining
    /// a closed source yields nothing.
    pub fn close(&mut self) {
        if self.display.is_null() {
            return;
        }
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
        self.display = ptr::null_mut();
        log::debug!("Display connection closed");
    }
}

impl Drop for XiTouchSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_source() -> XiTouchSource {
        XiTouchSource {
            display: ptr::null_mut(),
            opcode: 0,
            tracker: ContactTracker::new(),
        }
    }

    #[test]
    fn drain_on_closed_source_is_a_no_op() {
        let mut source = closed_source();
        let mut out = VecDeque::new();
        assert_eq!(source.drain(&mut out), 0);
        assert!(out.is_empty());
        assert!(source.tracker.is_empty());
    }

    #[test]
    fn close_is_idempotent() {
        let mut source = closed_source();
        source.close();
        source.close();
        assert_eq!(source.screen_height(), 0);
    }
}
