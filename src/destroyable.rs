// implemented by owners of subscriptions or background work that must be released explicitly
pub trait Destroyable {
    fn destroy(&mut self);
}
