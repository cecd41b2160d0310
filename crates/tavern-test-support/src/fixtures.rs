//! Story fixtures used across test suites.

use tavern_session::domain::story::Story;

/// A story with the given title and an empty description.
#[must_use]
pub fn story(title: &str) -> Story {
    Story::new(title, "")
}

/// A small two-story backlog.
#[must_use]
pub fn sample_stories() -> Vec<Story> {
    vec![
        Story::new("Login page", "Implement the login form").with_tracker_key("TAV-101"),
        Story::new("Search", "Full-text search across stories").with_tracker_key("TAV-102"),
    ]
}
