//! Registration page view with email/password form.

use std::time::Duration;

use dioxus::prelude::*;
use store::forms::MIN_PASSWORD_LEN;
use store::RegistrationForm;
use ui::{sleep, use_auth, AuthState};

use crate::Route;

const REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go home
    let state = auth();
    if !state.loading && state.user.is_some() && success().is_none() {
        nav.replace(Route::Home {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            success.set(None);

            let form = RegistrationForm {
                name: name().trim().to_string(),
                email: email().trim().to_string(),
                password: password(),
                confirm_password: confirm_password(),
            };
            if let Err(e) = form.validate() {
                error.set(Some(e.to_string()));
                return;
            }

            loading.set(true);
            match api::register(form.name, form.email, form.password, form.confirm_password).await
            {
                Ok(user) => {
                    match user {
                        Some(user) => {
                            success.set(Some("Account created! Redirecting…".to_string()));
                            auth.set(AuthState::signed_in(user));
                        }
                        None => success.set(Some(
                            "Account created! Check your email to confirm it, then sign in."
                                .to_string(),
                        )),
                    }
                    sleep(REDIRECT_DELAY).await;
                    nav.push(Route::Home {});
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {}", e);
                    error.set(Some(e.to_string()));
                    loading.set(false);
                }
            }
        });
    };

    let password_hint = format!("Password (min {MIN_PASSWORD_LEN} characters)");

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Create Account" }
                p { class: "auth-subtitle", "Start collecting your favorite Pokémon" }

                if let Some(err) = error() {
                    div { class: "banner banner-error", "{err}" }
                }
                if let Some(msg) = success() {
                    div { class: "banner banner-success", "{msg}" }
                }

                form {
                    class: "auth-form",
                    onsubmit: handle_register,

                    input {
                        class: "input",
                        r#type: "text",
                        placeholder: "Name",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }

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
                        placeholder: "{password_hint}",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }

                    input {
                        class: "input",
                        r#type: "password",
                        placeholder: "Confirm password",
                        value: confirm_password(),
                        oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                    }

                    button {
                        class: "button button-primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account…" } else { "Sign up" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
