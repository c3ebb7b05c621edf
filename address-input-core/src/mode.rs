/// The input surface that is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Free text, no search and no map.
    Custom,
    /// Search box on top of a map with markers.
    MapAssisted,
    /// Search box only.
    StandaloneSearch,
}

impl Mode {
    /// Both search modes interpret typing as a query.
    pub const fn is_search(self) -> bool {
        matches!(self, Self::MapAssisted | Self::StandaloneSearch)
    }
}

/// The two checkboxes the user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFlags {
    pub custom_enabled: bool,
    pub map_enabled: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            custom_enabled: false,
            map_enabled: true,
        }
    }
}

impl ModeFlags {
    pub const fn mode(self, map_capability_allowed: bool) -> Mode {
        select_mode(
            self.custom_enabled,
            self.map_enabled,
            map_capability_allowed,
        )
    }

    /// The displayed state of the map checkbox.
    pub const fn map_checked(self, map_capability_allowed: bool) -> bool {
        self.map_enabled && map_capability_allowed
    }
}

/// Custom takes priority over the map; the map needs
/// both the user's choice and the caller's permission.
pub const fn select_mode(
    custom_enabled: bool,
    map_enabled: bool,
    map_capability_allowed: bool,
) -> Mode {
    if custom_enabled {
        Mode::Custom
    } else if map_enabled && map_capability_allowed {
        Mode::MapAssisted
    } else {
        Mode::StandaloneSearch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_table() {
        use Mode::*;
        let table = [
            ((true, true, true), Custom),
            ((true, true, false), Custom),
            ((true, false, true), Custom),
            ((true, false, false), Custom),
            ((false, true, true), MapAssisted),
            ((false, true, false), StandaloneSearch),
            ((false, false, true), StandaloneSearch),
            ((false, false, false), StandaloneSearch),
        ];
        for ((custom, map, allowed), expected) in table {
            assert_eq!(expected, select_mode(custom, map, allowed));
        }
    }

    #[test]
    fn initial_flags() {
        let flags = ModeFlags::default();
        assert_eq!(Mode::MapAssisted, flags.mode(true));
        assert_eq!(Mode::StandaloneSearch, flags.mode(false));
        assert!(flags.map_checked(true));
        assert!(!flags.map_checked(false));
    }

    #[test]
    fn search_modes() {
        assert!(!Mode::Custom.is_search());
        assert!(Mode::MapAssisted.is_search());
        assert!(Mode::StandaloneSearch.is_search());
    }
}
