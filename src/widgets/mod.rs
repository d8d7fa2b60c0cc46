//! Widget bodies hosted inside floating panels.
//!
//! Each [`WidgetKind`] maps to its constructor here; because the set is a
//! closed enum, an active definition can always be resolved.

pub mod calculator;
pub mod currency;
pub mod monitor;
pub mod notes;

pub use calculator::CalculatorWidget;
pub use currency::CurrencyWidget;
pub use monitor::ResourceMonitorWidget;
pub use notes::QuickNotesWidget;

use crate::components::Component;
use crate::registry::WidgetKind;

impl WidgetKind {
    /// Construct the body component for this kind.
    pub fn build(self) -> Box<dyn Component> {
        match self {
            WidgetKind::Currency => Box::new(CurrencyWidget::new()),
            WidgetKind::QuickNotes => Box::new(QuickNotesWidget::new()),
            WidgetKind::ResourceMonitor => Box::new(ResourceMonitorWidget::new()),
            WidgetKind::Calculator => Box::new(CalculatorWidget::new()),
        }
    }

    /// Panel size (chrome included) each body renders best at.
    pub fn preferred_size(self) -> (u16, u16) {
        match self {
            WidgetKind::Currency => (32, 9),
            WidgetKind::QuickNotes => (34, 12),
            WidgetKind::ResourceMonitor => (30, 8),
            WidgetKind::Calculator => (28, 10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_resolves_to_a_body() {
        for kind in [
            WidgetKind::Currency,
            WidgetKind::QuickNotes,
            WidgetKind::ResourceMonitor,
            WidgetKind::Calculator,
        ] {
            let _ = kind.build();
            let (width, height) = kind.preferred_size();
            assert!(width >= 3 && height >= 3);
        }
    }
}
