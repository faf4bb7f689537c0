use crate::core::{Property, ReadOnlyProperty};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(u64);

impl TabId {
    pub fn next() -> Self {
        Self(NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TabId({})", self.0)
    }
}

/// Identity of the tab strip a tab is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabPaneId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Editor,
    Preview,
}

/// Side-by-side layout of a tab's panes.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPane {
    items: Vec<PaneKind>,
    divider_positions: Vec<f64>,
}

impl SplitPane {
    /// Dividers default to an even split.
    pub fn new(items: Vec<PaneKind>) -> Self {
        let n = items.len();
        let divider_positions = (1..n).map(|i| i as f64 / n as f64).collect();
        Self {
            items,
            divider_positions,
        }
    }

    pub fn with_divider(mut self, index: usize, position: f64) -> Self {
        if let Some(slot) = self.divider_positions.get_mut(index) {
            *slot = position.clamp(0.0, 1.0);
        }
        self
    }

    pub fn items(&self) -> &[PaneKind] {
        &self.items
    }

    pub fn divider_positions(&self) -> &[f64] {
        &self.divider_positions
    }
}

/// One slot in a tab strip. Cloning yields another handle to the same tab.
#[derive(Clone)]
pub struct Tab {
    id: TabId,
    text: Property<String>,
    tooltip: Property<Option<String>>,
    graphic: Property<Option<String>>,
    selected: Property<bool>,
    tab_pane: Property<Option<TabPaneId>>,
    content: Property<Option<SplitPane>>,
}

impl Tab {
    pub fn new() -> Self {
        Self {
            id: TabId::next(),
            text: Property::new(String::new()),
            tooltip: Property::new(None),
            graphic: Property::new(None),
            selected: Property::new(false),
            tab_pane: Property::new(None),
            content: Property::new(None),
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn text(&self) -> String {
        self.text.get()
    }

    pub fn set_text(&self, text: String) {
        self.text.set(text);
    }

    pub fn tooltip(&self) -> Option<String> {
        self.tooltip.get()
    }

    pub fn set_tooltip(&self, tooltip: Option<String>) {
        self.tooltip.set(tooltip);
    }

    /// Short marker drawn next to the label.
    pub fn graphic(&self) -> Option<String> {
        self.graphic.get()
    }

    pub fn set_graphic(&self, graphic: Option<String>) {
        self.graphic.set(graphic);
    }

    pub fn is_selected(&self) -> bool {
        self.selected.get()
    }

    pub fn set_selected(&self, selected: bool) {
        self.selected.set(selected);
    }

    pub fn selected_property(&self) -> ReadOnlyProperty<bool> {
        self.selected.read_only()
    }

    pub fn tab_pane(&self) -> Option<TabPaneId> {
        self.tab_pane.get()
    }

    pub fn set_tab_pane(&self, pane: Option<TabPaneId>) {
        self.tab_pane.set(pane);
    }

    pub fn content(&self) -> Option<SplitPane> {
        self.content.get()
    }

    pub fn has_content(&self) -> bool {
        self.content.with(Option::is_some)
    }

    pub fn set_content(&self, content: Option<SplitPane>) {
        self.content.set(content);
    }

    /// Label as drawn in the strip: marker, then text.
    pub fn display_label(&self) -> String {
        match self.graphic() {
            Some(graphic) => format!("{graphic}{}", self.text()),
            None => self.text(),
        }
    }
}

impl Default for Tab {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("text", &self.text())
            .field("selected", &self.is_selected())
            .field("attached", &self.tab_pane().is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/tab.rs"]
mod tests;
