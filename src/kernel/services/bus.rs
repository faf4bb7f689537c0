//! UI 线程事件队列
//!
//! 事件在当前事件处理完成后才执行：`take_turn()` 只取出调用之前已投递的事件，
//! 处理过程中新投递的事件留到下一轮。

use crate::views::TabId;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A tab became selected; build or focus its content.
    Activate(TabId),
}

#[derive(Clone)]
pub struct UiBusSender {
    tx: Sender<UiEvent>,
}

pub struct UiBusReceiver {
    rx: Receiver<UiEvent>,
}

pub fn ui_bus() -> (UiBusSender, UiBusReceiver) {
    let (tx, rx) = mpsc::channel();
    (UiBusSender { tx }, UiBusReceiver { rx })
}

impl UiBusSender {
    /// Queue `event` behind whatever is currently being handled.
    /// Returns `false` once the receiving side is gone.
    pub fn run_later(&self, event: UiEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

impl UiBusReceiver {
    pub fn take_turn(&mut self) -> Vec<UiEvent> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/bus.rs"]
mod tests;
