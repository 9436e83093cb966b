//! A generic object pool with an explicit reinit/cleanup lifecycle.
//!
//! [`ObjectPool`] keeps a stack of idle instances and a factory for making
//! more. [`get`](ObjectPool::get) moves an instance out to the caller after
//! running its [`Poolable::reinit`] hook; [`release`](ObjectPool::release)
//! runs [`Poolable::clean_up`] and moves it back. Ownership is by value, so
//! the pool never aliases an in-use instance -- but nothing stops a caller
//! from releasing an instance that never came from this pool; that
//! discipline stays with the caller.

/// The lifecycle contract pooled objects implement.
pub trait Poolable {
    /// Bring a recycled instance back to a ready state. Called by
    /// [`ObjectPool::get`] on instances coming off the idle stack; freshly
    /// built instances are assumed ready and skip it.
    fn reinit(&mut self);

    /// Tear down per-use state before the instance goes idle. Called by
    /// [`ObjectPool::release`].
    fn clean_up(&mut self);
}

/// A reusable-object pool over an idle stack and a factory.
pub struct ObjectPool<T: Poolable> {
    idle: Vec<T>,
    factory: Box<dyn FnMut() -> T>,
}

impl<T: Poolable> ObjectPool<T> {
    /// Create an empty pool around a factory.
    pub fn new(factory: impl FnMut() -> T + 'static) -> Self {
        Self {
            idle: Vec::new(),
            factory: Box::new(factory),
        }
    }

    /// Number of idle instances currently held.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Take an instance: the most recently released one (reinitialized), or
    /// a fresh one from the factory when the stack is empty.
    pub fn get(&mut self) -> T {
        match self.idle.pop() {
            Some(mut obj) => {
                obj.reinit();
                obj
            }
            None => (self.factory)(),
        }
    }

    /// Clean up an instance and push it onto the idle stack.
    pub fn release(&mut self, mut obj: T) {
        obj.clean_up();
        self.idle.push(obj);
    }

    /// Warm the pool by creating and releasing `count` fresh instances.
    pub fn precreate(&mut self, count: usize) {
        for _ in 0..count {
            let obj = (self.factory)();
            self.release(obj);
        }
    }

    /// Drop every idle instance.
    pub fn clear(&mut self) {
        self.idle.clear();
    }

    /// Drop every idle instance, handing each to `disposer` first.
    pub fn clear_with(&mut self, mut disposer: impl FnMut(T)) {
        for obj in self.idle.drain(..) {
            disposer(obj);
        }
    }
}

impl<T: Poolable> std::fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectPool")
            .field("idle", &self.idle.len())
            .finish_non_exhaustive()
    }
}
