use super::render::render_html;
use crate::core::Property;
use crate::editor::MarkdownAst;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Live preview. Its inputs are meant to be bound to an editor; the HTML is
/// re-rendered whenever the AST input changes.
pub struct MarkdownPreviewPane {
    path: Property<Option<PathBuf>>,
    markdown_ast: Property<Rc<MarkdownAst>>,
    scroll_y: Property<f64>,
    html: Rc<RefCell<String>>,
}

impl MarkdownPreviewPane {
    pub fn new() -> Self {
        let markdown_ast = Property::new(Rc::new(MarkdownAst::default()));
        let html = Rc::new(RefCell::new(String::new()));

        let sink = Rc::clone(&html);
        markdown_ast.add_listener(move |_, ast: &Rc<MarkdownAst>| {
            *sink.borrow_mut() = render_html(ast);
            tracing::trace!(blocks = ast.blocks().len(), "preview rendered");
        });

        Self {
            path: Property::new(None),
            markdown_ast,
            scroll_y: Property::new(0.0),
            html,
        }
    }

    pub fn path_property(&self) -> &Property<Option<PathBuf>> {
        &self.path
    }

    pub fn markdown_ast_property(&self) -> &Property<Rc<MarkdownAst>> {
        &self.markdown_ast
    }

    pub fn scroll_y_property(&self) -> &Property<f64> {
        &self.scroll_y
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.path.get()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    pub fn html(&self) -> String {
        self.html.borrow().clone()
    }
}

impl Default for MarkdownPreviewPane {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/pane.rs"]
mod tests;
