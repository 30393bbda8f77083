/// Input events the field understands, in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click/tap at (x, y). Resolved to a selection by the picker.
    PointerDown { x: f32, y: f32 },
    /// The cursor moved to (x, y). Drives parallax.
    PointerMove { x: f32, y: f32 },
    /// The cursor left the surface.
    PointerLeave,
    /// The host surface changed size.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// Host callbacks push events; the driver drains them at the top of each frame.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        // Consecutive moves/resizes collapse: only the latest matters.
        if let Some(last) = self.events.last_mut() {
            let collapses = matches!(
                (*last, event),
                (InputEvent::PointerMove { .. }, InputEvent::PointerMove { .. })
                    | (InputEvent::Resize { .. }, InputEvent::Resize { .. })
            );
            if collapses {
                *last = event;
                return;
            }
        }
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerLeave);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn consecutive_moves_collapse() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::PointerMove { x: 2.0, y: 2.0 });
        q.push(InputEvent::PointerDown { x: 2.0, y: 2.0 });
        q.push(InputEvent::PointerMove { x: 3.0, y: 3.0 });
        assert_eq!(
            q.drain(),
            vec![
                InputEvent::PointerMove { x: 2.0, y: 2.0 },
                InputEvent::PointerDown { x: 2.0, y: 2.0 },
                InputEvent::PointerMove { x: 3.0, y: 3.0 },
            ]
        );
    }

    #[test]
    fn resizes_collapse_to_latest() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Resize { width: 100.0, height: 100.0 });
        q.push(InputEvent::Resize { width: 640.0, height: 480.0 });
        assert_eq!(q.drain(), vec![InputEvent::Resize { width: 640.0, height: 480.0 }]);
    }
}
