//! Login page view with email/password form.

use std::time::Duration;

use dioxus::prelude::*;
use store::LoginForm;
use ui::{sleep, use_auth, AuthState};

use crate::Route;

/// Pause between the success banner and the redirect home.
const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in: nothing to do here
    let state = auth();
    if !state.loading && state.user.is_some() && success().is_none() {
        nav.replace(Route::Home {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            success.set(None);

            let form = LoginForm::new(email().trim(), password());
            if let Err(e) = form.validate() {
                error.set(Some(e.to_string()));
                return;
            }

            loading.set(true);
            match api::login_password(form.email, form.password).await {
                Ok(user) => {
                    success.set(Some("Welcome back! Redirecting…".to_string()));
                    auth.set(AuthState::signed_in(user));
                    sleep(REDIRECT_DELAY).await;
                    nav.push(Route::Home {});
                }
                Err(e) => {
                    tracing::warn!("Sign-in failed: {}", e);
                    error.set(Some(e.to_string()));
                    loading.set(false);
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Sign in" }
                p { class: "auth-subtitle", "Access your favorite Pokémon" }

                if let Some(err) = error() {
                    div { class: "banner banner-error", "{err}" }
                }
                if let Some(msg) = success() {
                    div { class: "banner banner-success", "{msg}" }
                }

                form {
                    class: "auth-form",
                    onsubmit: handle_login,

                    input {
                        class: "input",
                        r#type: "email",
                        placeholder: "Email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }

                    input {
                        class: "input",
                        r#type: "password",
                        placeholder: "Password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }

                    button {
                        class: "button button-primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Signing in…" } else { "Sign in" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Create one" }
                }
            }
        }
    }
}
