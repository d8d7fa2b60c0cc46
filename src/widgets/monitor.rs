use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

/// Shows how long this panel has been mounted and how often it has been
/// painted. Both reset when the widget is toggled off and on again, which
/// doubles as a visible demonstration of the mount-scoped lifecycle.
pub struct ResourceMonitorWidget {
    mounted_at: Instant,
    renders: u64,
}

impl ResourceMonitorWidget {
    pub fn new() -> Self {
        Self {
            mounted_at: Instant::now(),
            renders: 0,
        }
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    fn uptime_label(&self) -> String {
        let total = self.mounted_at.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
    }
}

impl Default for ResourceMonitorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResourceMonitorWidget {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.renders += 1;
        let ticks = "▁▂▃▄▅▆▇█";
        let phase = (self.renders % ticks.chars().count() as u64) as usize;
        let pulse: String = ticks.chars().cycle().skip(phase).take(8).collect();
        let lines = vec![
            Line::from(format!("mounted  {}", self.uptime_label())),
            Line::from(format!("paints   {}", self.renders)),
            Line::styled(pulse, Style::default().add_modifier(Modifier::DIM)),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn render_increments_paint_counter() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 4,
        };
        let mut buf = Buffer::empty(area);
        let mut w = ResourceMonitorWidget::new();
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            w.render(&mut frame, area, &ComponentContext::default());
        }
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            w.render(&mut frame, area, &ComponentContext::default());
        }
        assert_eq!(w.renders(), 2);
    }

    #[test]
    fn uptime_label_formats_hms() {
        let w = ResourceMonitorWidget::new();
        let label = w.uptime_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }
}
