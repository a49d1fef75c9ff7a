use tracing::{debug, error};

use crate::storage::{KeyValueStorage, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn as_class(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => "dark-theme",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn storage_value(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Anything other than a stored `dark` restores the light theme.
pub fn load_theme<S: KeyValueStorage + ?Sized>(storage: &S) -> Theme {
    let stored = match storage.get_item(THEME_KEY) {
        Ok(value) => value,
        Err(err) => {
            error!(error = %err, "failed reading theme preference");
            None
        }
    };

    match stored.as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

pub fn save_theme<S: KeyValueStorage + ?Sized>(storage: &mut S, theme: Theme) {
    debug!(theme = theme.storage_value(), "saving theme preference");
    if let Err(err) = storage.set_item(THEME_KEY, theme.storage_value()) {
        error!(error = %err, "failed writing theme preference");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn unknown_or_missing_value_restores_light() {
        assert_eq!(load_theme(&MemoryStorage::new()), Theme::Light);
        let storage = MemoryStorage::new().with_item(THEME_KEY, "night");
        assert_eq!(load_theme(&storage), Theme::Light);
    }

    #[test]
    fn saved_dark_theme_is_restored() {
        let mut storage = MemoryStorage::new();
        save_theme(&mut storage, Theme::Dark);
        assert_eq!(
            storage.get_item(THEME_KEY).expect("read").as_deref(),
            Some("dark")
        );
        assert_eq!(load_theme(&storage), Theme::Dark);
    }

    #[test]
    fn toggling_twice_returns_to_start() {
        assert_eq!(Theme::Light.next().next(), Theme::Light);
        assert_eq!(Theme::from_dark(true), Theme::Dark);
    }
}
