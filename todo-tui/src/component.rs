//! Component trait for UI pieces

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and turns events into actions
///
/// Props carry every piece of application data the component reads. A
/// component may keep its own UI-only state in `&mut self` (cursor
/// position, scroll offset, last rendered hit areas) but never mutates
/// application state; it returns actions instead.
pub trait Component<A> {
    /// Read-only data needed for one call
    type Props<'a>;

    /// Map an event to actions.
    ///
    /// Return `None`, `Some(action)` or a `Vec`. The default returns
    /// nothing, for render-only components.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
