//! Dump normalized touch events for debugging.
//! Run: xtouch dump  to stream and print events as they arrive.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::touch::{TouchEvent, TouchPhase};
use crate::xinput::XiTouchSource;

fn phase_name(phase: TouchPhase) -> &'static str {
    match phase {
        TouchPhase::Begin => "BEGIN",
        TouchPhase::Update => "UPDATE",
        TouchPhase::End => "END",
    }
}

fn print_event(n: u64, ev: &TouchEvent) {
    println!(
        "{:6}  {:<6}  id={} x={:.1} y={:.1}",
        n,
        phase_name(ev.phase),
        ev.id,
        ev.x,
        ev.y
    );
}

pub fn run_dump(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut source = XiTouchSource::open(&config.display)?;
    eprintln!("Dumping touch events from {} (Ctrl+C to stop):\n", config.display);

    let mut queue: VecDeque<TouchEvent> = VecDeque::with_capacity(32);
    let mut n = 0u64;

    loop {
        source.drain(&mut queue);
        while let Some(ev) = queue.pop_front() {
            n += 1;
            print_event(n, &ev);
        }
        thread::sleep(Duration::from_millis(config.tick_ms));
    }
}
