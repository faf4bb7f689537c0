//! 核心框架：可观察属性

pub mod observable;

pub use observable::{
    ListenerId, Observable, Property, ReadOnlyProperty, Subscription, WeakProperty,
};
