/// Implemented by presentation layers that react to a stream of events.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
