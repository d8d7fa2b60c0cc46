use ratatui::style::Color;

// Centralized theme colors. Kept as small helpers so every surface pulls
// from the same palette.

// Toolbar
pub fn toolbar_bg() -> Color {
    Color::DarkGray
}
pub fn toolbar_fg() -> Color {
    Color::White
}
pub fn toolbar_active_bg() -> Color {
    Color::Gray
}
pub fn toolbar_active_fg() -> Color {
    Color::Black
}

// Window decorator
pub fn decorator_header_bg() -> Color {
    Color::Blue
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_header_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_border() -> Color {
    Color::DarkGray
}

// Overlays (palette, selector, help)
pub fn overlay_bg() -> Color {
    Color::Black
}
pub fn overlay_fg() -> Color {
    Color::White
}
pub fn overlay_border() -> Color {
    Color::Blue
}
pub fn overlay_selected_bg() -> Color {
    Color::Gray
}
pub fn overlay_selected_fg() -> Color {
    Color::Black
}
pub fn overlay_dim_fg() -> Color {
    Color::DarkGray
}

// Browser shell
pub fn browser_dir_fg() -> Color {
    Color::Cyan
}
pub fn browser_selected_bg() -> Color {
    Color::Gray
}
pub fn browser_selected_fg() -> Color {
    Color::Black
}
