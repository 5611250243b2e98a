use crate::auth::{AutofillObserver, CredentialField, CredentialSource, DomFields, FormInput};
use crate::components::Session;
use crate::platform::ClientClass;
use crate::resolver::Resolver;
use crate::state::AppState;
use dioxus::prelude::*;

fn field_input(session: &Session, field: CredentialField, value: String) {
    let current = session.auth();
    let input = FormInput {
        field,
        value,
        fields: &DomFields,
    };
    if let Some(capture) = input.capture(&current) {
        session.apply_auth(current.apply_capture(capture));
    }
}

#[component]
pub fn LoginView() -> Element {
    let session = use_context::<Session>();
    let app_state = use_context::<Signal<AppState>>();
    let resolver = use_context::<Resolver>();

    use_hook({
        let session = session.clone();
        move || session.probe(session.auth())
    });

    let auth = app_state.read().auth().clone();
    let store_link = resolver.player_app_url();
    let store_name = if resolver.client() == ClientClass::Ios {
        "App Store"
    } else {
        "Play Store"
    };

    let form = match auth.credentials().cloned() {
        Some(credentials) => {
            let can_submit = credentials.is_complete();
            let on_username = {
                let session = session.clone();
                move |evt: FormEvent| field_input(&session, CredentialField::Username, evt.value())
            };
            let on_password = {
                let session = session.clone();
                move |evt: FormEvent| field_input(&session, CredentialField::Password, evt.value())
            };
            let on_autofill = {
                let session = session.clone();
                move |evt: AnimationEvent| {
                    let current = session.auth();
                    let observer = AutofillObserver {
                        animation_name: evt.data().animation_name(),
                        fields: &DomFields,
                    };
                    if let Some(capture) = observer.capture(&current) {
                        session.apply_auth(current.apply_capture(capture));
                    }
                }
            };
            let on_submit = {
                let session = session.clone();
                move |_: MouseEvent| session.probe(session.auth())
            };

            rsx! {
                div { id: "settings",
                    label { r#for: "username", "Username" }
                    input {
                        id: "username",
                        r#type: "text",
                        value: "{credentials.username}",
                        autofocus: true,
                        autocomplete: "username",
                        oninput: on_username,
                    }
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        value: "{credentials.password}",
                        autocomplete: "current-password",
                        oninput: on_password,
                        onanimationend: on_autofill,
                    }
                    button {
                        r#type: "submit",
                        disabled: !can_submit,
                        onclick: on_submit,
                        "Log in"
                    }
                }
            }
        }
        None => rsx! {
            span { "loading" }
        },
    };

    rsx! {
        {form}
        if let Some(link) = store_link {
            p { class: "message",
                "You will need VLC player installed on your phone to actually play the video files on this server. You can download it at the "
                a { href: link, "{store_name}" }
            }
        }
    }
}
