//! Structural matching of listing blocks.
//!
//! The result page carries no stable ids, so a listing is recognised by a
//! combination of class substrings, tag kind and text content. Each rule is a
//! plain predicate over an [`Element`]; [`find_all`] and [`find_first`] walk
//! the tree with them.
//!
//! A container is only accepted when it holds exactly one price anchor and
//! exactly one title anchor. Wrappers around several listings, or blocks with
//! a duplicated price, are rejected here instead of producing a broken
//! record later.

use crate::config::Markers;
use crate::parse::Element;

/// Collects every element matching `predicate`, depth-first, root included.
///
/// The subtree of a matching element is not searched further.
pub fn find_all<'a, F>(root: Element<'a>, predicate: F) -> Vec<Element<'a>>
where
    F: Fn(&Element<'a>) -> bool,
{
    let mut matches = Vec::new();
    collect(root, &predicate, &mut matches);
    matches
}

fn collect<'a, F>(node: Element<'a>, predicate: &F, matches: &mut Vec<Element<'a>>)
where
    F: Fn(&Element<'a>) -> bool,
{
    if predicate(&node) {
        matches.push(node);
        return;
    }
    for child in node.children() {
        collect(child, predicate, matches);
    }
}

/// Returns the first depth-first element matching `predicate`, root included.
pub fn find_first<'a, F>(root: Element<'a>, predicate: F) -> Option<Element<'a>>
where
    F: Fn(&Element<'a>) -> bool,
{
    search(root, &predicate)
}

fn search<'a, F>(node: Element<'a>, predicate: &F) -> Option<Element<'a>>
where
    F: Fn(&Element<'a>) -> bool,
{
    if predicate(&node) {
        return Some(node);
    }
    node.children().find_map(|child| search(child, predicate))
}

/// Predicates recognising listing containers and their price and title nodes
#[derive(Debug, Clone, Default)]
pub struct ListingMatcher {
    markers: Markers,
}

impl ListingMatcher {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    /// Finds every listing container below `root` (inclusive).
    pub fn find_containers<'a>(&self, root: Element<'a>) -> Vec<Element<'a>> {
        find_all(root, |el| self.is_container(el))
    }

    /// Finds the price anchor of a container.
    pub fn find_price<'a>(&self, container: Element<'a>) -> Option<Element<'a>> {
        find_first(container, |el| self.is_price_node(el))
    }

    /// Finds the title anchor of a container.
    pub fn find_title<'a>(&self, container: Element<'a>) -> Option<Element<'a>> {
        find_first(container, |el| self.is_title_node(el))
    }

    /// A visible listing block holding exactly one price and one title anchor.
    pub fn is_container(&self, element: &Element<'_>) -> bool {
        let class = element.class();
        if !class.contains(&self.markers.listing) || class.contains(&self.markers.hidden) {
            return false;
        }

        find_all(*element, |el| self.is_price_node(el)).len() == 1
            && find_all(*element, |el| self.is_title_node(el)).len() == 1
    }

    /// A detail link whose text carries the currency marker.
    pub fn is_price_node(&self, element: &Element<'_>) -> bool {
        self.is_detail_link(element) && element.text().contains(&self.markers.currency)
    }

    /// A detail link without the currency marker sitting in a headline.
    ///
    /// Price and title anchors share the same tag and class, so the parent's
    /// class is what tells them apart.
    pub fn is_title_node(&self, element: &Element<'_>) -> bool {
        let Some(parent) = element.parent() else {
            return false;
        };
        let parent_class = parent.class();

        self.is_detail_link(element)
            && !element.text().contains(&self.markers.currency)
            && parent_class.contains(&self.markers.headline)
            && parent_class.contains(&self.markers.no_print)
    }

    fn is_detail_link(&self, element: &Element<'_>) -> bool {
        element.tag_name() == "a" && element.class() == self.markers.detail_link
    }
}
