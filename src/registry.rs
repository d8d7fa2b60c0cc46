//! Widget registry: the canonical store of widget identity, metadata, and
//! activation state.
//!
//! The registry owns the catalog exclusively. It is built once at startup,
//! mutated only through [`WidgetRegistry::toggle`], and handed by reference
//! to every consumer (toolbar, selector, layer) so all of them observe the
//! same post-mutation state before the triggering event handler returns.

/// The closed set of widget implementations.
///
/// Resolution from definition to implementation is enum dispatch, so a
/// definition can never name an implementation that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Currency,
    QuickNotes,
    ResourceMonitor,
    Calculator,
}

#[derive(Debug, Clone)]
pub struct WidgetDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: WidgetKind,
    pub active: bool,
}

fn default_catalog() -> Vec<WidgetDefinition> {
    vec![
        WidgetDefinition {
            id: "currency-widget",
            name: "Currency",
            description: "Convert between currencies",
            kind: WidgetKind::Currency,
            active: false,
        },
        WidgetDefinition {
            id: "quick-notes-widget",
            name: "Quick Notes",
            description: "Jot down short notes",
            kind: WidgetKind::QuickNotes,
            active: false,
        },
        WidgetDefinition {
            id: "resource-monitor",
            name: "Resource Monitor",
            description: "Session uptime and render activity",
            kind: WidgetKind::ResourceMonitor,
            active: false,
        },
        WidgetDefinition {
            id: "calculator-widget",
            name: "Calculator",
            description: "Basic arithmetic",
            kind: WidgetKind::Calculator,
            active: false,
        },
    ]
}

#[derive(Debug)]
pub struct WidgetRegistry {
    defs: Vec<WidgetDefinition>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            defs: default_catalog(),
        }
    }

    /// Read-only view of the full catalog, insertion order preserved.
    pub fn list(&self) -> &[WidgetDefinition] {
        &self.defs
    }

    pub fn get(&self, id: &str) -> Option<&WidgetDefinition> {
        self.defs.iter().find(|def| def.id == id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.get(id).is_some_and(|def| def.active)
    }

    /// Flip `active` for the matching definition. Unknown ids are a no-op.
    pub fn toggle(&mut self, id: &str) {
        match self.defs.iter_mut().find(|def| def.id == id) {
            Some(def) => {
                def.active = !def.active;
                tracing::debug!(widget = id, active = def.active, "toggled widget");
            }
            None => {
                tracing::warn!(widget = id, "toggle for unknown widget id ignored");
            }
        }
    }

}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
