use crate::reveal::ObserverZone;

pub const LAZY_VIDEO_OBSERVER: ObserverZone = ObserverZone::new(0.1, 100);
pub const FALLBACK_PRELOAD: &str = "metadata";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoAction {
    Assign(String),
    Play,
    Pause,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LazyVideo {
    assigned: Option<String>,
}

impl LazyVideo {
    #[cfg(test)]
    pub fn assigned_source(&self) -> Option<&str> {
        self.assigned.as_deref()
    }

    pub fn on_intersection(&mut self, stored_src: Option<&str>, is_intersecting: bool) -> Vec<VideoAction> {
        if !is_intersecting {
            return vec![VideoAction::Pause];
        }

        let mut actions = Vec::with_capacity(2);
        if self.assigned.is_none() {
            if let Some(src) = stored_src.map(str::trim).filter(|value| !value.is_empty()) {
                self.assigned = Some(src.to_string());
                actions.push(VideoAction::Assign(src.to_string()));
            }
        }
        actions.push(VideoAction::Play);
        actions
    }

    /// Without intersection support the source is assigned up front.
    pub fn eager(&mut self, stored_src: Option<&str>) -> Option<String> {
        let src = stored_src.map(str::trim).filter(|value| !value.is_empty())?;
        self.assigned = Some(src.to_string());
        self.assigned.clone()
    }
}
