//! Géométrie des fenêtres popup du portail
//!
//! Calcule la taille et la position d'une popup centrée sur l'écran, et la
//! chaîne de caractéristiques passée à `window.open`.

use std::collections::BTreeMap;
use std::fmt;

use derive_more::Display;
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 520;

/// Dimensions de l'écran de l'utilisateur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{width}x{height}")]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Position à la demi-unité près: centrer une popup de largeur impaire
/// tombe sur un demi-pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Offset {
    halves: i64,
}

impl Offset {
    pub const ZERO: Offset = Offset { halves: 0 };

    fn centered(screen: u32, window: u32) -> Self {
        if screen == 0 {
            return Self::ZERO;
        }
        Self {
            halves: i64::from(screen) - i64::from(window),
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.halves as f64 / 2.0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.halves < 0 { "-" } else { "" };
        let abs = self.halves.unsigned_abs();
        if abs % 2 == 0 {
            write!(f, "{sign}{}", abs / 2)
        } else {
            write!(f, "{sign}{}.5", abs / 2)
        }
    }
}

/// Demande d'ouverture de popup, avec ses paramètres optionnels
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupRequest {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub fullscreen: bool,
}

impl PopupRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn fullscreen(mut self) -> Self {
        self.fullscreen = true;
        self
    }

    /// Résout la géométrie finale pour un écran donné.
    pub fn resolve(&self, screen: Screen) -> PopupWindow {
        let title = self.title.clone().filter(|t| !t.is_empty());

        let window = if self.fullscreen {
            PopupWindow {
                url: self.url.clone(),
                title,
                width: screen.width,
                height: screen.height,
                left: Offset::ZERO,
                top: Offset::ZERO,
            }
        } else {
            let width = self.width.filter(|&w| w != 0).unwrap_or(DEFAULT_WIDTH);
            let height = self.height.filter(|&h| h != 0).unwrap_or(DEFAULT_HEIGHT);
            PopupWindow {
                url: self.url.clone(),
                title,
                width,
                height,
                left: Offset::centered(screen.width, width),
                top: Offset::centered(screen.height, height),
            }
        };

        debug!("Popup for {} on {screen}: {}", window.url, window.features());
        window
    }
}

/// Popup prête à être ouverte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupWindow {
    pub url: String,
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub left: Offset,
    pub top: Offset,
}

impl PopupWindow {
    /// Chaîne de caractéristiques pour `window.open`
    pub fn features(&self) -> String {
        format!(
            "width = {}, height = {}, top = {} , left = {}, \
             menubar = no, toolbar = no, \
             status = yes, location = no, \
             scrollbars = yes, resizable = yes",
            self.width, self.height, self.top, self.left
        )
    }
}

/// Variante avec titre imposé
pub fn open_titled(url: &str, title: &str, screen: Screen) -> PopupWindow {
    PopupRequest::new(url).with_title(title).resolve(screen)
}

/// Popups ouvertes par nom, pour pouvoir les refermer plus tard
#[derive(Debug, Clone, Default)]
pub struct PopupRegistry {
    windows: BTreeMap<String, PopupWindow>,
    focused: Option<String>,
}

impl PopupRegistry {
    /// Opens `request` under `name` and focuses it. The name doubles as the
    /// window title unless the request carries one. A popup already open
    /// under the same name is replaced.
    pub fn open(&mut self, name: &str, request: PopupRequest, screen: Screen) -> &PopupWindow {
        let has_title = request.title.as_deref().is_some_and(|t| !t.is_empty());
        let request = if has_title { request } else { request.with_title(name) };
        let window = request.resolve(screen);

        if self.windows.insert(name.to_owned(), window).is_some() {
            info!("Popup {name} reopened");
        }
        self.focused = Some(name.to_owned());
        &self.windows[name]
    }

    pub fn close(&mut self, name: &str) -> Option<PopupWindow> {
        let closed = self.windows.remove(name);
        if closed.is_some() && self.focused.as_deref() == Some(name) {
            self.focused = None;
        }
        closed
    }

    pub fn get(&self, name: &str) -> Option<&PopupWindow> {
        self.windows.get(name)
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD: Screen = Screen {
        width: 1920,
        height: 1080,
    };

    #[test]
    fn test_default_size_is_centered() {
        let popup = PopupRequest::new("/Procurement/Details.aspx").resolve(HD);
        assert_eq!((popup.width, popup.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(popup.left.to_string(), "560");
        assert_eq!(popup.top.to_string(), "280");
        assert_eq!(popup.title, None);
    }

    #[test]
    fn test_zero_size_falls_back_to_default() {
        let popup = PopupRequest::new("x").with_size(0, 0).resolve(HD);
        assert_eq!((popup.width, popup.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn test_fullscreen_uses_screen() {
        let popup = PopupRequest::new("x").with_size(300, 200).fullscreen().resolve(HD);
        assert_eq!((popup.width, popup.height), (1920, 1080));
        assert_eq!((popup.left, popup.top), (Offset::ZERO, Offset::ZERO));
    }

    #[test]
    fn test_half_pixel_and_negative_offsets() {
        let odd = PopupRequest::new("x").with_size(801, 521).resolve(HD);
        assert_eq!(odd.left.to_string(), "559.5");
        assert_eq!(odd.top.to_string(), "279.5");

        let small = Screen { width: 800, height: 600 };
        let big = PopupRequest::new("x").with_size(1001, 700).resolve(small);
        assert_eq!(big.left.to_string(), "-100.5");
        assert_eq!(big.top.to_string(), "-50");
        assert_eq!(big.left.as_f64(), -100.5);
    }

    #[test]
    fn test_unknown_screen_gives_zero_offset() {
        let popup = PopupRequest::new("x").resolve(Screen { width: 0, height: 0 });
        assert_eq!((popup.left, popup.top), (Offset::ZERO, Offset::ZERO));
    }

    #[test]
    fn test_empty_title_means_none() {
        let popup = PopupRequest::new("x").with_title("").resolve(HD);
        assert_eq!(popup.title, None);

        let titled = open_titled("x", "Ficha", HD);
        assert_eq!(titled.title.as_deref(), Some("Ficha"));
    }

    #[test]
    fn test_features_string() {
        let popup = PopupRequest::new("x").resolve(HD);
        assert_eq!(
            popup.features(),
            "width = 800, height = 520, top = 280 , left = 560, \
             menubar = no, toolbar = no, status = yes, location = no, \
             scrollbars = yes, resizable = yes"
        );
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_open_uses_name_as_title_and_focuses() {
            let mut registry = PopupRegistry::default();
            let window = registry.open("ficha", PopupRequest::new("/Ficha.aspx"), HD);
            assert_eq!(window.title.as_deref(), Some("ficha"));
            assert_eq!(registry.focused(), Some("ficha"));
            assert_eq!(registry.len(), 1);
        }

        #[test]
        fn test_explicit_title_wins() {
            let mut registry = PopupRegistry::default();
            let request = PopupRequest::new("x").with_title("Cuadro Comparativo");
            let window = registry.open("cuadro", request, HD);
            assert_eq!(window.title.as_deref(), Some("Cuadro Comparativo"));
        }

        #[test]
        fn test_reopen_replaces_window() {
            let mut registry = PopupRegistry::default();
            registry.open("ficha", PopupRequest::new("/a"), HD);
            registry.open("ficha", PopupRequest::new("/b").with_size(400, 300), HD);

            assert_eq!(registry.len(), 1);
            let window = registry.get("ficha").unwrap();
            assert_eq!(window.url, "/b");
            assert_eq!(window.width, 400);
        }

        #[test]
        fn test_close_by_name() {
            let mut registry = PopupRegistry::default();
            registry.open("a", PopupRequest::new("/a"), HD);
            registry.open("b", PopupRequest::new("/b"), HD);

            assert_eq!(registry.close("a").map(|w| w.url), Some("/a".to_string()));
            assert_eq!(registry.focused(), Some("b"));

            assert!(registry.close("b").is_some());
            assert_eq!(registry.focused(), None);
            assert!(registry.close("b").is_none(), "Closed popup closed twice");
            assert!(registry.is_empty());
        }
    }
}
