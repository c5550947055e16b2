//! Landing page.

use askama::Template;
use askama_web::WebTemplate;
use chrono::Datelike;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub year: i32,
}

/// Display the home page. Denied admin requests land here too.
pub async fn home() -> HomeTemplate {
    HomeTemplate {
        year: chrono::Utc::now().year(),
    }
}
