//! Observable values for UI-thread state.
//!
//! A [`Property`] is a cheap, clonable handle to a shared value. Writers call
//! [`Property::set`]; every registered listener is told about the change with
//! the old and new value. A property can follow another observable through
//! [`Property::bind`] / [`Property::bind_map`]; data only ever flows from the
//! source to the bound target.
//!
//! Everything here lives on the UI thread, so handles are `Rc` based and not
//! `Send`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T, &T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(ListenerId, Listener<T>)>>,
    next_listener: Cell<u64>,
    binding: RefCell<Option<Subscription>>,
}

impl<T: Clone + PartialEq + 'static> Inner<T> {
    fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
            binding: RefCell::new(None),
        }
    }

    fn store(&self, value: T) {
        let old = {
            let mut slot = self.value.borrow_mut();
            if *slot == value {
                return;
            }
            std::mem::replace(&mut *slot, value)
        };
        let new = self.value.borrow().clone();

        // Listeners may add or remove listeners on this property.
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&old, &new);
        }
    }

    fn add_listener(&self, listener: Listener<T>) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }
}

/// Removes its listener from the source when dropped.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Anything a [`Property`] can be bound to.
pub trait Observable<T> {
    fn get(&self) -> T;

    fn subscribe(&self, listener: impl Fn(&T, &T) + 'static) -> Subscription;
}

pub struct Property<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner::new(value)),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Writes are ignored while the property is bound.
    pub fn set(&self, value: T) {
        if self.is_bound() {
            tracing::warn!("ignoring write to a bound property");
            return;
        }
        self.inner.store(value);
    }

    pub fn add_listener(&self, listener: impl Fn(&T, &T) + 'static) -> ListenerId {
        self.inner.add_listener(Rc::new(listener))
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.remove_listener(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Follow `source`: take its value now and every time it changes.
    pub fn bind<S: Observable<T>>(&self, source: &S) {
        self.bind_map(source, T::clone);
    }

    /// Follow `source` through `map`.
    pub fn bind_map<U, S>(&self, source: &S, map: impl Fn(&U) -> T + 'static)
    where
        U: Clone + PartialEq + 'static,
        S: Observable<U>,
    {
        self.unbind();
        self.inner.store(map(&source.get()));

        let target = Rc::downgrade(&self.inner);
        let subscription = source.subscribe(move |_, new| {
            if let Some(target) = target.upgrade() {
                target.store(map(new));
            }
        });
        *self.inner.binding.borrow_mut() = Some(subscription);
    }

    pub fn unbind(&self) {
        let binding = self.inner.binding.borrow_mut().take();
        drop(binding);
    }

    pub fn is_bound(&self) -> bool {
        self.inner.binding.borrow().is_some()
    }

    pub fn read_only(&self) -> ReadOnlyProperty<T> {
        ReadOnlyProperty {
            inner: self.clone(),
        }
    }

    pub fn downgrade(&self) -> WeakProperty<T> {
        WeakProperty {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> for Property<T> {
    fn get(&self) -> T {
        Property::get(self)
    }

    fn subscribe(&self, listener: impl Fn(&T, &T) + 'static) -> Subscription {
        let id = self.add_listener(listener);
        let source = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(source) = source.upgrade() {
                source.remove_listener(id);
            }
        })
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.inner.value.borrow())
            .field("bound", &self.inner.binding.borrow().is_some())
            .finish()
    }
}

/// A view of a property that can be observed and bound to, but not written.
pub struct ReadOnlyProperty<T> {
    inner: Property<T>,
}

impl<T> Clone for ReadOnlyProperty<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> ReadOnlyProperty<T> {
    pub fn get(&self) -> T {
        self.inner.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    pub fn add_listener(&self, listener: impl Fn(&T, &T) + 'static) -> ListenerId {
        self.inner.add_listener(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.remove_listener(id)
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> for ReadOnlyProperty<T> {
    fn get(&self) -> T {
        self.inner.get()
    }

    fn subscribe(&self, listener: impl Fn(&T, &T) + 'static) -> Subscription {
        Observable::subscribe(&self.inner, listener)
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyProperty")
            .field(&*self.inner.inner.value.borrow())
            .finish()
    }
}

/// Non-owning handle, for listeners that must not keep their own source alive.
pub struct WeakProperty<T> {
    inner: Weak<Inner<T>>,
}

impl<T> Clone for WeakProperty<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakProperty<T> {
    pub fn upgrade(&self) -> Option<Property<T>> {
        self.inner.upgrade().map(|inner| Property { inner })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/observable.rs"]
mod tests;
