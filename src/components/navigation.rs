use dioxus::prelude::*;

use crate::components::app_view::AppView;

const NAV_HISTORY_LIMIT: usize = 64;

/// View stack shared through context. The current view is mirrored into the
/// location fragment so a reload reopens the same list.
#[derive(Clone, Copy)]
pub struct Navigation {
    current_view: Signal<AppView>,
    history: Signal<Vec<AppView>>,
}

impl Navigation {
    pub fn new(current_view: Signal<AppView>, history: Signal<Vec<AppView>>) -> Self {
        Self {
            current_view,
            history,
        }
    }

    pub fn current(&self) -> AppView {
        (self.current_view)()
    }

    pub fn navigate_to(&self, target: AppView) {
        let mut current_view = self.current_view;
        let previous = current_view();
        if previous == target {
            return;
        }

        let mut history = self.history;
        history.with_mut(|stack| push_bounded(stack, previous));

        write_fragment(&target);
        current_view.set(target);
    }

    /// Follow a fragment change made outside the app, e.g. the browser's
    /// back button.
    pub fn follow_route(&self, target: AppView) {
        let mut current_view = self.current_view;
        let previous = current_view.peek().clone();
        if previous == target {
            return;
        }

        let mut history = self.history;
        history.with_mut(|stack| record_route_change(stack, previous, &target));
        current_view.set(target);
    }

    pub fn can_go_back(&self) -> bool {
        !(self.history)().is_empty()
    }

    pub fn go_back(&self) -> Option<AppView> {
        let mut history = self.history;
        let prev = history.with_mut(|stack| stack.pop());
        prev.map(|prev| {
            write_fragment(&prev);
            self.current_view.clone().set(prev.clone());
            prev
        })
    }
}

fn push_bounded(stack: &mut Vec<AppView>, view: AppView) {
    stack.push(view);
    if stack.len() > NAV_HISTORY_LIMIT {
        stack.remove(0);
    }
}

// Returning to the view on top of the stack pops it; any other target is a
// new step.
fn record_route_change(stack: &mut Vec<AppView>, previous: AppView, target: &AppView) {
    if stack.last() == Some(target) {
        stack.pop();
    } else {
        push_bounded(stack, previous);
    }
}

/// Keep the current view in step with `hashchange` events.
#[cfg(target_arch = "wasm32")]
pub fn use_route_listener(navigation: Navigation) {
    use dioxus::core::{Runtime, RuntimeGuard};
    use wasm_bindgen::{closure::Closure, JsCast};

    use_hook(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        let runtime = Runtime::current();
        let on_hash_change = Closure::wrap(Box::new(move || {
            let _guard = RuntimeGuard::new(runtime.clone());
            let hash = web_sys::window()
                .and_then(|window| window.location().hash().ok())
                .unwrap_or_default();
            navigation.follow_route(AppView::from_route(&hash));
        }) as Box<dyn FnMut()>);
        if window
            .add_event_listener_with_callback("hashchange", on_hash_change.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!("cannot listen for location changes");
        }
        on_hash_change.forget();
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn use_route_listener(_navigation: Navigation) {}

/// View named by the page's location fragment at startup.
pub fn initial_view() -> AppView {
    #[cfg(target_arch = "wasm32")]
    {
        let hash = web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default();
        AppView::from_route(&hash)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        AppView::Home
    }
}

#[cfg(target_arch = "wasm32")]
fn write_fragment(view: &AppView) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(&view.route());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_fragment(_view: &AppView) {}
