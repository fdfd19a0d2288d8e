//! Document-level pointer listeners.
//!
//! Some gestures have to keep tracking after the pointer leaves the widget
//! that started them (dragging a pane spacer past its own cell).  Widgets
//! therefore register on the *global* move/up streams through a
//! [`Document`], and the host routes every move/up event to whoever is
//! listening.
//!
//! Registration is scoped: [`Document::capture`] returns a [`PointerCapture`]
//! that removes exactly the listeners it added when it is dropped.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifies a widget instance that owns listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

/// Which global stream a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerStream {
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListenerId(u64);

#[derive(Debug)]
struct Listener {
    id: ListenerId,
    stream: PointerStream,
    owner: WidgetId,
}

#[derive(Debug, Default)]
struct Registry {
    next_listener: u64,
    next_widget: u64,
    listeners: Vec<Listener>,
}

/// Shared handle on the global listener registry.
///
/// Cloning is cheap; all clones see the same registry.  Single-threaded by
/// construction (`Rc`), like the UI thread it models.
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Rc<RefCell<Registry>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh widget identity.
    pub fn allocate_id(&self) -> WidgetId {
        let mut reg = self.inner.borrow_mut();
        reg.next_widget += 1;
        WidgetId(reg.next_widget)
    }

    /// Attach one move and one up listener for `owner`.
    pub fn capture(&self, owner: WidgetId) -> PointerCapture {
        let ids = {
            let mut reg = self.inner.borrow_mut();
            let mut add = |stream| {
                reg.next_listener += 1;
                let id = ListenerId(reg.next_listener);
                reg.listeners.push(Listener { id, stream, owner });
                id
            };
            [add(PointerStream::Move), add(PointerStream::Up)]
        };
        tracing::trace!(?owner, "pointer capture acquired");
        PointerCapture {
            document: self.clone(),
            owner,
            ids,
        }
    }

    /// Owners listening on `stream`, in registration order.
    pub fn listeners(&self, stream: PointerStream) -> Vec<WidgetId> {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.stream == stream)
            .map(|l| l.owner)
            .collect()
    }

    /// Total number of registered listeners across both streams.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn release(&self, ids: &[ListenerId]) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|l| !ids.contains(&l.id));
    }
}

/// Live registration on the global move/up streams.  Dropping it detaches.
#[derive(Debug)]
pub struct PointerCapture {
    document: Document,
    owner: WidgetId,
    ids: [ListenerId; 2],
}

impl PointerCapture {
    pub fn owner(&self) -> WidgetId {
        self.owner
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.document.release(&self.ids);
        tracing::trace!(owner = ?self.owner, "pointer capture released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_registers_move_and_up() {
        let doc = Document::new();
        let id = doc.allocate_id();
        let cap = doc.capture(id);
        assert_eq!(cap.owner(), id);
        assert_eq!(doc.listener_count(), 2);
        assert_eq!(doc.listeners(PointerStream::Move), vec![id]);
        assert_eq!(doc.listeners(PointerStream::Up), vec![id]);
        drop(cap);
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn release_only_touches_own_listeners() {
        let doc = Document::new();
        let a = doc.allocate_id();
        let b = doc.allocate_id();
        assert_ne!(a, b);

        let cap_a = doc.capture(a);
        let cap_b = doc.capture(b);
        drop(cap_a);

        assert_eq!(doc.listener_count(), 2);
        assert_eq!(doc.listeners(PointerStream::Move), vec![b]);
        drop(cap_b);
        assert_eq!(doc.listener_count(), 0);
    }
}
