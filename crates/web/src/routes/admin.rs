//! Admin page shells.
//!
//! Each shell only declares its metadata and the controller the front end
//! mounts into it; forms, tables and bulk import live in that controller.
//! The whole subtree sits behind [`require_admin`](crate::middleware::require_admin).

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::error::Result;
use crate::sanity::{ContentRequest, NoteSummary};

/// Metadata for one admin page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageShell {
    /// Path below `/admin`.
    pub path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Front-end controller mounted on the page.
    pub controller: &'static str,
}

pub const COUPONS: PageShell = PageShell {
    path: "coupons",
    title: "Coupons",
    description: "Create and manage discount coupons",
    controller: "coupons-controller",
};

pub const FLASHCARDS: PageShell = PageShell {
    path: "flashcards",
    title: "Flashcards",
    description: "Manage flashcard decks",
    controller: "flashcards-controller",
};

pub const NOTES: PageShell = PageShell {
    path: "notes",
    title: "Notes",
    description: "Manage study notes",
    controller: "notes-controller",
};

pub const PREMIUM: PageShell = PageShell {
    path: "premium",
    title: "Premium",
    description: "Manage premium subscriptions",
    controller: "premium-controller",
};

pub const QUIZZES: PageShell = PageShell {
    path: "quizzes",
    title: "Quizzes",
    description: "Manage quizzes",
    controller: "quizzes-controller",
};

/// Every admin page, in navigation order.
pub const SHELLS: &[PageShell] = &[COUPONS, FLASHCARDS, NOTES, PREMIUM, QUIZZES];

/// Notes hydrated into the notes shell.
const NOTES_FIRST_PAGE: usize = 20;

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: &'static [PageShell],
}

/// Admin page shell template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/shell.html")]
pub struct ShellTemplate {
    pub nav: &'static [PageShell],
    pub shell: PageShell,
    /// Initial data for the notes controller.
    pub notes: Vec<NoteSummary>,
}

impl ShellTemplate {
    const fn bare(shell: PageShell) -> Self {
        Self {
            nav: SHELLS,
            shell,
            notes: Vec::new(),
        }
    }
}

/// Admin dashboard.
pub async fn dashboard() -> DashboardTemplate {
    DashboardTemplate { nav: SHELLS }
}

pub async fn coupons() -> ShellTemplate {
    ShellTemplate::bare(COUPONS)
}

pub async fn flashcards() -> ShellTemplate {
    ShellTemplate::bare(FLASHCARDS)
}

/// Notes shell, hydrated with the first page of notes.
#[instrument(skip(content))]
pub async fn notes(content: ContentRequest) -> Result<ShellTemplate> {
    let notes = content.notes(0, NOTES_FIRST_PAGE).await?;

    Ok(ShellTemplate {
        notes,
        ..ShellTemplate::bare(NOTES)
    })
}

pub async fn premium() -> ShellTemplate {
    ShellTemplate::bare(PREMIUM)
}

pub async fn quizzes() -> ShellTemplate {
    ShellTemplate::bare(QUIZZES)
}
