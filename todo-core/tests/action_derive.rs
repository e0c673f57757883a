//! Tests for #[derive(Action)] macro

use todo_core::{Action, ActionCategory, TodoId};

#[derive(Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
enum TestAction {
    TodoToggle(TodoId),
    TodoMove { id: TodoId, to: usize },
    TodoClearCompleted,
    InputSubmit(String),
    DragDrop,
    #[action(category = "app")]
    Quit,
    #[action(skip_category)]
    FilterCycle,
    Tick,
}

#[test]
fn test_name_covers_all_variant_shapes() {
    assert_eq!(TestAction::TodoToggle(TodoId(1)).name(), "TodoToggle");
    assert_eq!(
        TestAction::TodoMove {
            id: TodoId(1),
            to: 0
        }
        .name(),
        "TodoMove"
    );
    assert_eq!(TestAction::DragDrop.name(), "DragDrop");
}

#[test]
fn test_inferred_categories() {
    assert_eq!(TestAction::TodoToggle(TodoId(1)).category(), Some("todo"));
    assert_eq!(TestAction::TodoClearCompleted.category(), Some("todo"));
    assert_eq!(TestAction::InputSubmit("x".into()).category(), Some("input"));
    assert_eq!(TestAction::DragDrop.category(), Some("drag"));
    assert_eq!(TestAction::Tick.category(), None);
}

#[test]
fn test_category_overrides() {
    assert_eq!(TestAction::Quit.category(), Some("app"));
    assert_eq!(TestAction::FilterCycle.category(), None);
}

#[test]
fn test_predicates() {
    assert!(TestAction::TodoClearCompleted.is_todo());
    assert!(!TestAction::DragDrop.is_todo());
    assert!(TestAction::Quit.is_app());
    assert!(TestAction::InputSubmit(String::new()).is_input());
}

#[test]
fn test_trait_object_category() {
    fn via_trait<A: ActionCategory>(action: &A) -> Option<&'static str> {
        ActionCategory::category(action)
    }
    assert_eq!(via_trait(&TestAction::DragDrop), Some("drag"));
}
