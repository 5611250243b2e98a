use crate::components::{view_label, Navigation};
use dioxus::prelude::*;

/// Page header with a back arrow once there is somewhere to go back to.
#[component]
pub fn Chrome(class: String, children: Element) -> Element {
    let navigation = use_context::<Navigation>();
    let title = view_label(&navigation.current());

    rsx! {
        header {
            if navigation.can_go_back() {
                a {
                    class: "nodefault back",
                    onclick: move |_| {
                        navigation.go_back();
                    },
                    svg {
                        view_box: "0 0 5 10",
                        polyline {
                            points: "4,2 1,5 4,8",
                            stroke: "blue",
                            stroke_linecap: "round",
                            fill: "none",
                        }
                    }
                }
            }
            span { "{title}" }
        }
        main { class: "{class}", {children} }
    }
}
