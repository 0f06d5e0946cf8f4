#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoRequest {
    pub src: String,
    pub title: String,
    pub tag: String,
}

impl VideoRequest {
    /// Bento cards without a source do not open anything.
    pub fn from_card(src: Option<&str>, title: Option<&str>, tag: Option<&str>) -> Option<Self> {
        let src = src.map(str::trim).filter(|value| !value.is_empty())?;

        Some(Self {
            src: src.to_string(),
            title: title.unwrap_or_default().to_string(),
            tag: tag.unwrap_or_default().to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Modal {
    Reel,
    Video(VideoRequest),
}

impl Modal {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reel => "reel",
            Self::Video(_) => "video",
        }
    }

    pub fn kind(&self) -> ModalKind {
        match self {
            Self::Reel => ModalKind::Reel,
            Self::Video(_) => ModalKind::Video,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    Reel,
    Video,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalStack {
    active: Option<Modal>,
}

impl ModalStack {
    pub fn active(&self) -> Option<&Modal> {
        self.active.as_ref()
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.active.as_ref().map(Modal::kind) == Some(kind)
    }

    pub fn scroll_locked(&self) -> bool {
        self.active.is_some()
    }

    pub fn video(&self) -> Option<&VideoRequest> {
        match &self.active {
            Some(Modal::Video(request)) => Some(request),
            _ => None,
        }
    }

    pub fn open(&mut self, modal: Modal) -> Option<Modal> {
        self.active.replace(modal)
    }

    pub fn close(&mut self, kind: ModalKind) -> Option<Modal> {
        if self.is_open(kind) {
            self.active.take()
        } else {
            None
        }
    }

    pub fn close_top(&mut self) -> Option<Modal> {
        self.active.take()
    }

    pub fn on_key(&mut self, key: &str) -> Option<Modal> {
        if key == "Escape" {
            self.close_top()
        } else {
            None
        }
    }

    pub fn on_dialog_click(&mut self, kind: ModalKind, target_is_backdrop: bool) -> Option<Modal> {
        if target_is_backdrop {
            self.close(kind)
        } else {
            None
        }
    }
}

/// Event target compared against the backdrop element itself, never `currentTarget`.
pub fn is_backdrop_target<T: PartialEq>(target: Option<&T>, backdrop: Option<&T>) -> bool {
    matches!((target, backdrop), (Some(target), Some(backdrop)) if target == backdrop)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> VideoRequest {
        VideoRequest::from_card(Some("/media/brand.mp4"), Some("Brand Film"), Some("Commercial"))
            .expect("card has a source")
    }

    #[test]
    fn opening_locks_scroll_and_closing_restores_it() {
        let mut modals = ModalStack::default();
        assert!(!modals.scroll_locked());

        modals.open(Modal::Reel);
        assert!(modals.scroll_locked());
        assert!(modals.is_open(ModalKind::Reel));

        assert_eq!(modals.close(ModalKind::Reel), Some(Modal::Reel));
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn escape_closes_and_other_keys_do_not() {
        let mut modals = ModalStack::default();
        modals.open(Modal::Video(clip()));

        assert_eq!(modals.on_key("Enter"), None);
        assert!(modals.scroll_locked());
        assert_eq!(modals.on_key("Escape"), Some(Modal::Video(clip())));
        assert!(!modals.scroll_locked());
        assert_eq!(modals.on_key("Escape"), None);
    }

    #[test]
    fn backdrop_click_closes_but_content_click_does_not() {
        let mut modals = ModalStack::default();
        modals.open(Modal::Reel);

        assert_eq!(modals.on_dialog_click(ModalKind::Reel, false), None);
        assert!(modals.is_open(ModalKind::Reel));
        assert_eq!(modals.on_dialog_click(ModalKind::Reel, true), Some(Modal::Reel));
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn only_the_backdrop_element_counts_as_a_backdrop_click() {
        let backdrop = "vidModal";
        let content = "vidModalPlayer";
        let app_root = "app";

        assert!(is_backdrop_target(Some(&backdrop), Some(&backdrop)));
        assert!(!is_backdrop_target(Some(&content), Some(&backdrop)));
        assert!(!is_backdrop_target(Some(&app_root), Some(&backdrop)));
        assert!(!is_backdrop_target(Some(&backdrop), None));
        assert!(!is_backdrop_target(None, Some(&backdrop)));

        let mut modals = ModalStack::default();
        modals.open(Modal::Video(clip()));
        let on_backdrop = is_backdrop_target(Some(&backdrop), Some(&backdrop));
        assert_eq!(modals.on_dialog_click(ModalKind::Video, on_backdrop), Some(Modal::Video(clip())));
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn opening_a_second_dialog_replaces_the_first() {
        let mut modals = ModalStack::default();
        modals.open(Modal::Reel);

        let displaced = modals.open(Modal::Video(clip()));
        assert_eq!(displaced, Some(Modal::Reel));
        assert!(!modals.is_open(ModalKind::Reel));
        assert_eq!(modals.video(), Some(&clip()));

        assert_eq!(modals.close(ModalKind::Reel), None);
        assert!(modals.scroll_locked());
        modals.close(ModalKind::Video);
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn cards_without_source_open_nothing() {
        assert_eq!(VideoRequest::from_card(None, Some("t"), Some("g")), None);
        assert_eq!(VideoRequest::from_card(Some("  "), None, None), None);

        let request = VideoRequest::from_card(Some("/a.mp4"), None, None).expect("source present");
        assert_eq!(request.title, "");
        assert_eq!(request.tag, "");
    }
}
