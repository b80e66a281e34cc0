use blog_api_sdk::{Palette, ThemeColors};

/// Built-in palettes used until the server's colors arrive.
///
/// Both palettes come from the same [`Palette`] shape, so they always carry
/// the full token set.
#[must_use]
pub fn default_colors() -> ThemeColors {
    ThemeColors {
        light: palette([
            "#f5f5f5", "#ffffff", "#e9ecef", "#1f2937", "#4b5563", "#2563eb", "#6b7280",
            "#dc2626", "#d4a017", "#10b981", "#9ca3af",
        ]),
        dark: palette([
            "#111827", "#1f2937", "#374151", "#f9fafb", "#d1d5db", "#3b82f6", "#4b5563",
            "#ef4444", "#eab308", "#059669", "#6b7280",
        ]),
    }
}

// Values in `ColorToken::ALL` order.
fn palette(values: [&str; 11]) -> Palette {
    let [
        primary_background,
        secondary_background,
        tertiary_background,
        primary_color,
        secondary_color,
        primary_btn,
        secondary_btn,
        tertiary_btn,
        quaternary_btn,
        back_to_home_btn,
        gray_color,
    ] = values.map(str::to_owned);
    Palette {
        primary_background,
        secondary_background,
        tertiary_background,
        primary_color,
        secondary_color,
        primary_btn,
        secondary_btn,
        tertiary_btn,
        quaternary_btn,
        back_to_home_btn,
        gray_color,
    }
}
