//! Attachment of the editor's nodes to a host container.

use brightroom_core::{Claim, ClaimRegistry, EditorError};
use web_sys::{HtmlElement, Node};

use crate::error::dom_error;

thread_local! {
    /// Containers currently hosting an editor, across all instances.
    static CONTAINERS: ClaimRegistry<HtmlElement> = ClaimRegistry::new();
}

pub(crate) fn registry() -> ClaimRegistry<HtmlElement> {
    CONTAINERS.with(ClaimRegistry::clone)
}

/// The editor's nodes attached to a claimed container.
///
/// Dropping it detaches the nodes, removes the container class and releases
/// the claim, whichever path led to the drop.
pub(crate) struct Mounted {
    nodes: Vec<Node>,
    container_class: String,
    claim: Claim<HtmlElement>,
}

impl Mounted {
    /// Claim `container` and append `nodes` to it in order.
    ///
    /// # Errors
    ///
    /// `EditorError::AlreadyMounted` if another editor holds the container.
    /// On a DOM failure halfway, nodes appended so far are removed again.
    pub(crate) fn attach(
        container: HtmlElement,
        nodes: &[&Node],
        container_class: &str,
    ) -> Result<Self, EditorError> {
        let claim = registry().claim(container)?;
        let mut mounted = Mounted {
            nodes: Vec::with_capacity(nodes.len()),
            container_class: container_class.to_string(),
            claim,
        };

        for node in nodes {
            mounted.container().append_child(node).map_err(dom_error)?;
            mounted.nodes.push((*node).clone());
        }
        mounted
            .container()
            .class_list()
            .add_1(container_class)
            .map_err(dom_error)?;

        log::debug!("mounted into container");
        Ok(mounted)
    }

    pub(crate) fn container(&self) -> &HtmlElement {
        self.claim.key()
    }

    /// Whether these nodes live in `container`.
    pub(crate) fn holds(&self, container: &HtmlElement) -> bool {
        self.claim.holds(container)
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        let container = self.claim.key();
        let parent: &Node = container.as_ref();
        for node in &self.nodes {
            if node.parent_node().as_ref() == Some(parent) {
                if let Err(e) = parent.remove_child(node) {
                    log::warn!("failed to detach node: {:?}", e);
                }
            }
        }
        let _ = container.class_list().remove_1(&self.container_class);
        log::debug!("unmounted from container");
    }
}
