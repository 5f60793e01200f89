//! A minimal element-tree view used by the page heuristics.
//!
//! The extraction rules only ever need a tag name, attributes, text and the
//! elements that follow a node among its siblings. [`Node`] captures exactly
//! that, so the section scans below do not depend on a particular HTML
//! library. [`scraper::ElementRef`] is the only implementation in use.

use scraper::ElementRef;

/// Collapse runs of whitespace into single spaces and trim both ends.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub trait Node: Copy {
    /// Lowercase tag name.
    fn tag(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// Text nodes under this element, in document order.
    fn text_pieces(&self) -> Vec<&str>;

    /// Element siblings after this one, in document order.
    fn following_elements(&self) -> Vec<Self>;

    /// All elements below this one (not including itself), in document order.
    fn descendant_elements(&self) -> Vec<Self>;

    /// Text with the pieces glued together as they appear in the markup.
    fn joined_text(&self) -> String {
        normalize_ws(&self.text_pieces().concat())
    }

    /// Text with every piece trimmed and separated by one space, so adjacent
    /// cells or inline elements never run into each other.
    fn spaced_text(&self) -> String {
        self.text_pieces()
            .iter()
            .map(|piece| normalize_ws(piece))
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `Some(n)` for `h1`..`h6`.
    fn heading_level(&self) -> Option<u8> {
        match self.tag() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    fn is(&self, tag: &str) -> bool {
        self.tag() == tag
    }

    /// Descendants whose tag is one of `tags`.
    fn find_all(&self, tags: &[&str]) -> Vec<Self> {
        self.descendant_elements()
            .into_iter()
            .filter(|el| tags.contains(&el.tag()))
            .collect()
    }

    fn find_first(&self, tag: &str) -> Option<Self> {
        self.descendant_elements().into_iter().find(|el| el.is(tag))
    }

    /// First following sibling with the given tag, skipping anything in between.
    fn next_sibling_named(&self, tag: &str) -> Option<Self> {
        self.following_elements().into_iter().find(|el| el.is(tag))
    }
}

impl Node for ElementRef<'_> {
    fn tag(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_pieces(&self) -> Vec<&str> {
        ElementRef::text(self).collect()
    }

    fn following_elements(&self) -> Vec<Self> {
        self.next_siblings().filter_map(ElementRef::wrap).collect()
    }

    fn descendant_elements(&self) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }
}

/// First heading among `levels` (in document order) whose text contains `needle`.
pub fn find_heading<N: Node>(root: N, levels: &[u8], needle: &str) -> Option<N> {
    root.descendant_elements().into_iter().find(|el| {
        el.heading_level()
            .is_some_and(|level| levels.contains(&level))
            && el.joined_text().contains(needle)
    })
}

/// Siblings following `anchor` up to, not including, the first heading of
/// level `stop_at` or higher (numerically lower or equal).
pub fn section_after<N: Node>(anchor: N, stop_at: u8) -> Vec<N> {
    anchor
        .following_elements()
        .into_iter()
        .take_while(|el| el.heading_level().is_none_or(|level| level > stop_at))
        .collect()
}

/// Siblings following `anchor` up to, not including, the next `stop_tag`.
/// Headings of any other level are kept.
pub fn section_before<N: Node>(anchor: N, stop_tag: &str) -> Vec<N> {
    anchor
        .following_elements()
        .into_iter()
        .take_while(|el| !el.is(stop_tag))
        .collect()
}
