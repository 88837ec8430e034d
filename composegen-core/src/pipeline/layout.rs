//! Layout-planning stage

use super::state::{LayoutKind, LayoutPlan, ParsedIntent, PlannedComponent};
use tracing::debug;

/// Default modifier set attached to the root container
const ROOT_MODIFIERS: &[&str] = &["fillMaxSize", "padding(16.dp)"];

/// Plan the layout structure from the parsed intent.
///
/// Pure transform: every intent element becomes one planned child, in the
/// original order, and the arrangement is keyed off the container kind.
pub fn plan_layout(intent: &ParsedIntent) -> LayoutPlan {
    let children: Vec<PlannedComponent> = intent
        .ui_elements
        .iter()
        .map(|element| PlannedComponent {
            component: element.kind.clone(),
            properties: element.clone(),
            modifiers: Vec::new(),
        })
        .collect();

    let arrangement =
        if intent.layout_type == LayoutKind::Column { "Center" } else { "Start" }.to_string();

    debug!(
        children = children.len(),
        root = intent.layout_type.as_str(),
        "layout planned"
    );

    LayoutPlan {
        root_container: intent.layout_type,
        children,
        modifiers: ROOT_MODIFIERS.iter().map(|m| m.to_string()).collect(),
        arrangement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::state::{ComponentKind, UiElement};

    fn intent_with(kinds: &[ComponentKind], layout: LayoutKind) -> ParsedIntent {
        ParsedIntent {
            ui_elements: kinds
                .iter()
                .map(|kind| UiElement::new(kind.clone(), kind.as_str().to_string()))
                .collect(),
            layout_type: layout,
            ..ParsedIntent::default()
        }
    }

    #[test]
    fn test_children_preserve_element_order() {
        let intent = intent_with(
            &[ComponentKind::Text, ComponentKind::TextField, ComponentKind::Button],
            LayoutKind::Column,
        );
        let plan = plan_layout(&intent);
        let kinds: Vec<&ComponentKind> = plan.children.iter().map(|c| &c.component).collect();
        assert_eq!(
            kinds,
            vec![&ComponentKind::Text, &ComponentKind::TextField, &ComponentKind::Button]
        );
    }

    #[test]
    fn test_empty_intent_yields_empty_children() {
        let plan = plan_layout(&intent_with(&[], LayoutKind::Column));
        assert!(plan.children.is_empty());
        assert_eq!(plan.root_container, LayoutKind::Column);
    }

    #[test]
    fn test_column_is_centered_others_start() {
        let column = plan_layout(&intent_with(&[], LayoutKind::Column));
        assert_eq!(column.arrangement, "Center");
        let row = plan_layout(&intent_with(&[], LayoutKind::Row));
        assert_eq!(row.arrangement, "Start");
        let card = plan_layout(&intent_with(&[], LayoutKind::Card));
        assert_eq!(card.arrangement, "Start");
    }

    #[test]
    fn test_default_modifiers_attached() {
        let plan = plan_layout(&intent_with(&[ComponentKind::Text], LayoutKind::Column));
        assert_eq!(plan.modifiers, vec!["fillMaxSize", "padding(16.dp)"]);
        assert!(plan.children[0].modifiers.is_empty());
    }
}
