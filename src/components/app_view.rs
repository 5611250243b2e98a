//! Defines the shared application view state.

use crate::resolver::encode_component;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AppView {
    #[default]
    Home,
    Series,
    Show(String),
    Films,
}

pub fn view_label(view: &AppView) -> String {
    match view {
        AppView::Home => "Netnix".to_string(),
        AppView::Series => "Series".to_string(),
        AppView::Show(name) => name.clone(),
        AppView::Films => "Films".to_string(),
    }
}

impl AppView {
    /// Fragment route for the view, e.g. `/Series/Some%20Show`.
    pub fn route(&self) -> String {
        match self {
            AppView::Home => "/".to_string(),
            AppView::Series => "/Series".to_string(),
            AppView::Show(name) => format!("/Series/{}", encode_component(name)),
            AppView::Films => "/Films".to_string(),
        }
    }

    /// Inverse of [`AppView::route`]; unknown routes land on the home view.
    pub fn from_route(route: &str) -> Self {
        let route = route.trim_start_matches('#');
        match route {
            "/Series" => AppView::Series,
            "/Films" => AppView::Films,
            _ => match route.strip_prefix("/Series/") {
                Some(name) if !name.is_empty() => {
                    let name = urlencoding::decode(name)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| name.to_string());
                    AppView::Show(name)
                }
                _ => AppView::Home,
            },
        }
    }
}
