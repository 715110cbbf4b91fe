pub mod model;

use crate::AppState;
use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
};
use model::{Ack, LoginForm, SignupForm};
use tracing::debug;

// every form route renders the index page on GET; POST only logs the submitted fields
pub fn forms_router() -> Router<AppState> {
    Router::new()
        .route("/get", get(index_handler).post(get_submit_handler))
        .route("/post", get(index_handler).post(post_submit_handler))
        .route("/ajax", get(index_handler).post(ajax_submit_handler))
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config.site_name, &state.config.site_email))
}

async fn get_submit_handler(Form(form): Form<SignupForm>) -> StatusCode {
    log_signup(&form);
    StatusCode::OK
}

async fn post_submit_handler(Form(form): Form<SignupForm>) -> Json<Ack> {
    log_signup(&form);
    Json(Ack::ok())
}

async fn ajax_submit_handler(Form(form): Form<LoginForm>) -> Json<Ack> {
    debug!(
        username = ?form.username,
        password_supplied = form.password.as_deref().is_some_and(|p| !p.is_empty()),
        "ajax form submitted"
    );
    Json(Ack::ok())
}

fn log_signup(form: &SignupForm) {
    debug!(
        firstname = ?form.firstname,
        lastname = ?form.lastname,
        username = ?form.username,
        "signup form submitted"
    );
}

fn render_index(website: &str, email: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{website}</title></head>\n<body>\n\
         <h1>Welcome to {website}</h1>\n\
         <p>Contact: <a href=\"mailto:{email}\">{email}</a></p>\n\
         </body>\n</html>\n",
        website = escape_html(website),
        email = escape_html(email),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
