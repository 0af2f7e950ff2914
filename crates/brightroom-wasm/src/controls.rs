//! The control panel: one button per user action.

use brightroom_core::{EditState, EditorError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom;

/// A user action triggered from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlAction {
    Rotate,
    FlipHorizontal,
    FlipVertical,
}

impl ControlAction {
    pub(crate) const ALL: [ControlAction; 3] = [
        ControlAction::Rotate,
        ControlAction::FlipHorizontal,
        ControlAction::FlipVertical,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            ControlAction::Rotate => "Rotate",
            ControlAction::FlipHorizontal => "Flip horizontal",
            ControlAction::FlipVertical => "Flip vertical",
        }
    }

    /// Value of the button's `data-action` attribute.
    pub(crate) fn key(self) -> &'static str {
        match self {
            ControlAction::Rotate => "rotate",
            ControlAction::FlipHorizontal => "flip-horizontal",
            ControlAction::FlipVertical => "flip-vertical",
        }
    }

    /// Apply the action to the edit state.
    pub(crate) fn apply(self, state: &mut EditState) {
        match self {
            ControlAction::Rotate => {
                state.rotate_clockwise();
            }
            ControlAction::FlipHorizontal => {
                state.toggle_flip_horizontal();
            }
            ControlAction::FlipVertical => {
                state.toggle_flip_vertical();
            }
        }
    }
}

/// The panel element and the click handlers keeping its buttons alive.
pub(crate) struct Controls {
    panel: HtmlElement,
    _handlers: Vec<Closure<dyn FnMut()>>,
}

impl Controls {
    /// Build the panel; `on_action` runs for every click.
    pub(crate) fn build<F>(
        document: &Document,
        class: &str,
        on_action: F,
    ) -> Result<Self, EditorError>
    where
        F: Fn(ControlAction) + Clone + 'static,
    {
        let panel: HtmlElement = dom::create(document, "div")?;
        panel.set_class_name(class);

        let mut handlers = Vec::with_capacity(ControlAction::ALL.len());
        for action in ControlAction::ALL {
            let button = dom::create_button(document, action.label(), action.key())?;
            let on_action = on_action.clone();
            let handler = Closure::<dyn FnMut()>::new(move || on_action(action));
            button.set_onclick(Some(handler.as_ref().unchecked_ref()));
            panel
                .append_child(&button)
                .map_err(crate::error::dom_error)?;
            handlers.push(handler);
        }

        Ok(Self {
            panel,
            _handlers: handlers,
        })
    }

    pub(crate) fn panel(&self) -> &HtmlElement {
        &self.panel
    }
}
