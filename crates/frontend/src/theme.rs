//! Light/dark preference, persisted under the `theme` key

use crate::storage::BrowserStorage;
use koov_core::{SessionStore, Theme};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ThemeState {
    pub theme: Theme,
}

pub enum ThemeAction {
    Toggle,
}

impl Reducible for ThemeState {
    type Action = ThemeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ThemeAction::Toggle => {
                let theme = self.theme.toggle();
                SessionStore::new(BrowserStorage).set_theme(theme);
                apply_document_theme(theme);
                Rc::new(Self { theme })
            }
        }
    }
}

pub type ThemeContext = UseReducerHandle<ThemeState>;

fn apply_document_theme(theme: Theme) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if let Ok(html) = element.dyn_into::<web_sys::HtmlElement>() {
        let classes = html.class_list();
        let _ = match theme {
            Theme::Dark => classes.add_1("dark"),
            Theme::Light => classes.remove_1("dark"),
        };
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let state = use_reducer(|| ThemeState {
        theme: SessionStore::new(BrowserStorage).theme(),
    });

    use_effect_with(state.theme, |theme| apply_document_theme(*theme));

    html! {
        <ContextProvider<ThemeContext> context={state}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}

#[hook]
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
        .expect("ThemeContext not found. Make sure to wrap your component with ThemeProvider")
}
