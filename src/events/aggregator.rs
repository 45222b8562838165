use std::fmt;

use rustc_hash::FxHashMap;

use super::handler::EventHandler;

/// Identifies a registered handler so it can be unregistered later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Named publish/subscribe channel for events of type `E`.
///
/// Handlers for a name run in registration order.
pub struct EventAggregator<E> {
    handlers: FxHashMap<String, Vec<(HandlerId, Box<dyn EventHandler<E>>)>>,
    next_id: u64,
}

impl<E> Default for EventAggregator<E> {
    fn default() -> Self {
        EventAggregator {
            handlers: FxHashMap::default(),
            next_id: 0,
        }
    }
}

impl<E> fmt::Debug for EventAggregator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self.handlers.iter().map(|(name, h)| (name.as_str(), h.len())).collect();
        counts.sort_unstable();
        f.debug_struct("EventAggregator").field("handlers", &counts).finish()
    }
}

impl<E> EventAggregator<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> HandlerId
    where
        H: EventHandler<E> + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(name.into())
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Returns `false` when no such handler is registered under `name`.
    pub fn unregister(&mut self, name: &str, id: HandlerId) -> bool {
        let Some(handlers) = self.handlers.get_mut(name) else {
            return false;
        };
        let Some(index) = handlers.iter().position(|(h, _)| *h == id) else {
            return false;
        };
        handlers.remove(index);
        if handlers.is_empty() {
            self.handlers.remove(name);
        }
        true
    }

    /// Delivers `event` to the handlers of `name` until one returns `true`.
    /// Returns the number of handlers that ran.
    pub fn dispatch(&mut self, name: &str, event: &E) -> usize {
        let Some(handlers) = self.handlers.get_mut(name) else {
            return 0;
        };
        let mut ran = 0;
        for (_, handler) in handlers.iter_mut() {
            ran += 1;
            if handler.handle(event) {
                break;
            }
        }
        ran
    }

    pub fn handler_count(&self, name: &str) -> usize {
        self.handlers.get(name).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_in_order_until_stopped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events = EventAggregator::<u32>::new();

        let first = Rc::clone(&log);
        events.register("hit", move |e: &u32| {
            first.borrow_mut().push(("first", *e));
            false
        });
        let second = Rc::clone(&log);
        events.register("hit", move |e: &u32| {
            second.borrow_mut().push(("second", *e));
            *e > 10
        });
        let third = Rc::clone(&log);
        events.register("hit", move |e: &u32| {
            third.borrow_mut().push(("third", *e));
            false
        });

        assert_eq!(events.dispatch("hit", &1), 3);
        assert_eq!(events.dispatch("hit", &20), 2);
        assert_eq!(events.dispatch("miss", &1), 0);
        assert_eq!(
            *log.borrow(),
            vec![("first", 1), ("second", 1), ("third", 1), ("first", 20), ("second", 20)]
        );
    }

    #[test]
    fn test_unregister() {
        let mut events = EventAggregator::<()>::new();
        let a = events.register("tick", |_: &()| false);
        let b = events.register("tick", |_: &()| false);

        assert!(!events.unregister("other", a));
        assert!(events.unregister("tick", a));
        assert!(!events.unregister("tick", a));
        assert_eq!(events.handler_count("tick"), 1);
        assert!(events.unregister("tick", b));
        assert_eq!(events.handler_count("tick"), 0);
    }

    struct Counter(usize);

    impl EventHandler<u8> for Counter {
        fn handle(&mut self, _event: &u8) -> bool {
            self.0 += 1;
            true
        }
    }

    #[test]
    fn test_trait_handlers() {
        let mut events = EventAggregator::<u8>::new();
        events.register("byte", Counter(0));
        events.register("byte", |_: &u8| -> bool { panic!("stopped by the first handler") });
        assert_eq!(events.dispatch("byte", &7), 1);
    }
}
