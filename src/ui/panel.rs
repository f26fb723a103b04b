//! Info panel state machine: Hidden until the first successful pick, then
//! toggling between a summary view and an expanded-image view. Event
//! handlers are bound once at construction; transitions dispatch on the
//! current state instead of re-registering listeners per pick.

use crate::content::{PartCatalog, PartInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoPanelState {
    Hidden,
    Summary(String),
    Expanded { part: String, image: String },
}

pub struct InfoPanel {
    state: InfoPanelState,
    catalog: PartCatalog,
}

impl InfoPanel {
    pub fn new(catalog: PartCatalog) -> Self {
        Self {
            state: InfoPanelState::Hidden,
            catalog,
        }
    }

    pub fn state(&self) -> &InfoPanelState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != InfoPanelState::Hidden
    }

    /// Content for the currently shown part, if any.
    pub fn entry(&self) -> Option<&PartInfo> {
        match &self.state {
            InfoPanelState::Hidden => None,
            InfoPanelState::Summary(part) | InfoPanelState::Expanded { part, .. } => {
                self.catalog.get(part)
            }
        }
    }

    /// Pick event: show the summary for a part. An identifier without a
    /// catalog entry leaves the panel unchanged (LookupMiss).
    pub fn show_part(&mut self, id: &str) -> bool {
        if self.catalog.get(id).is_none() {
            log::debug!("no catalog entry for '{id}', panel unchanged");
            return false;
        }
        self.state = InfoPanelState::Summary(id.to_string());
        true
    }

    /// Thumbnail click: enlarge the image and hide the text. Only valid
    /// from a summary; a no-op elsewhere.
    pub fn expand(&mut self) {
        if let InfoPanelState::Summary(part) = &self.state {
            let part = part.clone();
            let Some(info) = self.catalog.get(&part) else {
                return;
            };
            let image = info.image.clone();
            self.state = InfoPanelState::Expanded { part, image };
        }
    }

    /// Back click: restore the summary view for the same part.
    pub fn back(&mut self) {
        if let InfoPanelState::Expanded { part, .. } = &self.state {
            let part = part.clone();
            self.state = InfoPanelState::Summary(part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> InfoPanel {
        InfoPanel::new(PartCatalog::builtin())
    }

    #[test]
    fn starts_hidden_and_shows_on_first_pick() {
        let mut panel = panel();
        assert!(!panel.is_visible());
        assert!(panel.show_part("nucleus"));
        assert_eq!(panel.state(), &InfoPanelState::Summary("nucleus".into()));
        assert_eq!(panel.entry().unwrap().title, "Nucleus");
    }

    #[test]
    fn expand_and_back_roundtrip_preserves_the_part() {
        let mut panel = panel();
        panel.show_part("nucleus");
        panel.expand();
        assert_eq!(
            panel.state(),
            &InfoPanelState::Expanded {
                part: "nucleus".into(),
                image: "images/cellParts/Nucleus.jpg".into(),
            }
        );
        panel.back();
        assert_eq!(panel.state(), &InfoPanelState::Summary("nucleus".into()));
    }

    #[test]
    fn unknown_identifier_leaves_panel_unchanged() {
        let mut panel = panel();
        panel.show_part("lysosome");
        assert!(!panel.show_part("cytoplasm"));
        assert_eq!(panel.state(), &InfoPanelState::Summary("lysosome".into()));
    }

    #[test]
    fn once_shown_the_panel_never_hides() {
        let mut panel = panel();
        panel.show_part("pores");
        panel.show_part("vesicles");
        panel.expand();
        panel.back();
        assert!(panel.is_visible());
    }

    #[test]
    fn expand_outside_summary_is_a_no_op() {
        let mut panel = panel();
        panel.expand();
        assert_eq!(panel.state(), &InfoPanelState::Hidden);
        panel.show_part("filler");
        panel.expand();
        panel.expand();
        assert!(matches!(panel.state(), InfoPanelState::Expanded { .. }));
    }
}
