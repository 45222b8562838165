/// Receives dispatched events. Returning `true` stops the event from
/// reaching handlers registered after this one.
pub trait EventHandler<E> {
    fn handle(&mut self, event: &E) -> bool;
}

impl<E, F> EventHandler<E> for F
where
    F: FnMut(&E) -> bool,
{
    fn handle(&mut self, event: &E) -> bool {
        self(event)
    }
}
