pub const COMPACT_THRESHOLD_PX: f64 = 60.0;
pub const SECTION_LOOKAHEAD_PX: f64 = 140.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionOffset {
    pub id: String,
    pub top: f64,
}

impl SectionOffset {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

pub fn is_compact(scroll_y: f64) -> bool {
    scroll_y > COMPACT_THRESHOLD_PX
}

/// Last section, in document order, whose look-ahead adjusted top has been
/// scrolled past.
pub fn active_section(sections: &[SectionOffset], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| scroll_y >= section.top - SECTION_LOOKAHEAD_PX)
        .last()
        .map(|section| section.id.as_str())
}

pub fn is_link_active(href: &str, active: Option<&str>) -> bool {
    match (href.strip_prefix('#'), active) {
        (Some(fragment), Some(active)) => fragment == active,
        _ => false,
    }
}

/// Fragment id an in-page link should scroll to, or `None` when the link must
/// be left alone (no href, bare `#`, or not a hash link).
pub fn in_page_target(href: &str) -> Option<&str> {
    href.trim()
        .strip_prefix('#')
        .filter(|fragment| !fragment.is_empty())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    pub fn after_document_click(self, inside_menu: bool, inside_toggle: bool) -> Self {
        if inside_menu || inside_toggle {
            self
        } else {
            self.closed()
        }
    }
}
