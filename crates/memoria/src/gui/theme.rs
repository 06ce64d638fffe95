use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub front: Srgba<f64>,
    pub back: Srgba<f64>,
    pub current: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            front: Role::Front.resolve(context),
            back: Role::Back.resolve(context),
            current: Role::Current.resolve(context),
            text: Role::Text.resolve(context),
        }
    }
}

/// Where each card colour comes from in the GTK theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Front,
    Back,
    Current,
    Text,
}

impl Role {
    fn theme_name(self) -> &'static str {
        match self {
            Self::Front => "theme_base_color",
            Self::Back => "theme_bg_color",
            Self::Current => "theme_selected_bg_color",
            Self::Text => "theme_fg_color",
        }
    }

    /// Used when the theme does not define `theme_name`.
    fn fallback(self) -> Srgba<f64> {
        match self {
            Self::Front => Srgba::new(0.96, 0.94, 0.90, 0.95),
            Self::Back => Srgba::new(0.22, 0.24, 0.32, 0.95),
            Self::Current => Srgba::new(0.4, 0.4, 0.8, 0.9),
            Self::Text => Srgba::new(0.1, 0.1, 0.1, 1.0),
        }
    }

    /// Card panels are drawn nearly opaque whatever the theme says.
    fn forced_alpha(self) -> Option<f64> {
        match self {
            Self::Front | Self::Back => Some(0.95),
            Self::Current | Self::Text => None,
        }
    }

    fn resolve(self, context: &gtk::StyleContext) -> Srgba<f64> {
        let Some(rgba) = context.lookup_color(self.theme_name()) else {
            return self.fallback();
        };
        let alpha = self.forced_alpha().unwrap_or(rgba.alpha().into());
        Srgba::new(rgba.red().into(), rgba.green().into(), rgba.blue().into(), alpha)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.memoria-ring {
    background-color: transparent;
}
.memoria-controls {
    padding: 12px;
}
.memoria-status {
    min-width: 64px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
