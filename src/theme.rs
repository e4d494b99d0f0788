use termcolor::{Color, ColorSpec};

/// Foreground colors of a theme, as indexes into the 256 color ANSI palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: u8,
    pub text: u8,
}

impl Palette {
    pub fn accent_spec(&self) -> ColorSpec {
        fg_spec(self.accent)
    }

    pub fn text_spec(&self) -> ColorSpec {
        fg_spec(self.text)
    }
}

fn fg_spec(color: u8) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Ansi256(color)));
    spec
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub structure_id: String,
    pub palette: Palette,
}

impl Theme {
    pub fn new(name: impl Into<String>, structure_id: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            structure_id: structure_id.into(),
            palette,
        }
    }

    /// Include path of the theme's footer markup.
    pub fn footer(&self) -> String {
        format!("app/shared/theme/{}/footer.html", self.structure_id)
    }

    /// Include path of the theme's top navigation bar markup.
    pub fn top_nav_bar(&self) -> String {
        format!("app/shared/theme/{}/topNavbar.html", self.structure_id)
    }
}

pub const DEFAULT_THEME: &str = "mint";

pub struct ThemeRegistry {
    themes: Vec<Theme>,
    active: usize,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        let themes = vec![
            Theme::new("pale", "standard", Palette { accent: 250, text: 245 }),
            Theme::new("mint", "standard", Palette { accent: 121, text: 158 }),
            Theme::new("pink", "standard", Palette { accent: 211, text: 218 }),
        ];
        let mut registry = Self { themes, active: 0 };
        registry.set_theme(DEFAULT_THEME);
        registry
    }
}

impl ThemeRegistry {
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn active(&self) -> &Theme {
        &self.themes[self.active]
    }

    /// Select the theme called `name`. Unknown names leave the active theme in place.
    pub fn set_theme(&mut self, name: &str) -> bool {
        match self.themes.iter().position(|theme| theme.name == name) {
            Some(index) => {
                self.active = index;
                true
            }
            None => {
                log::debug!("Ignoring unknown theme {}", name);
                false
            }
        }
    }
}
