#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    ToggleWindow,
    ReloadWindow,
    ToggleAutoUpdateCheck,
    Quit,
}

impl TrayMenuAction {
    /// Menu order, top to bottom. A separator goes before `Quit`.
    pub const ALL: [Self; 4] = [
        Self::ToggleWindow,
        Self::ReloadWindow,
        Self::ToggleAutoUpdateCheck,
        Self::Quit,
    ];

    pub fn menu_id(self) -> &'static str {
        match self {
            Self::ToggleWindow => "tray_toggle_window",
            Self::ReloadWindow => "tray_reload_window",
            Self::ToggleAutoUpdateCheck => "tray_toggle_auto_update_check",
            Self::Quit => "tray_quit",
        }
    }

    pub fn from_menu_id(menu_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.menu_id() == menu_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_ids_resolve_back_to_their_action() {
        for action in TrayMenuAction::ALL {
            assert_eq!(TrayMenuAction::from_menu_id(action.menu_id()), Some(action));
        }
    }

    #[test]
    fn unknown_menu_id_has_no_action() {
        assert_eq!(TrayMenuAction::from_menu_id("unknown-menu"), None);
        assert_eq!(TrayMenuAction::from_menu_id(""), None);
    }
}
