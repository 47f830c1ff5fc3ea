use crate::web::session::AdminSession;

const SECTIONS: [(&str, &str); 4] = [
    ("Overview", "/dashboard"),
    ("Users", "/dashboard/users"),
    ("Quotes", "/dashboard/quotes"),
    ("Products", "/dashboard/products"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Sidebar entries; only the one whose path equals `current_path` is active.
pub fn nav_links(current_path: &str) -> Vec<NavLink> {
    SECTIONS
        .iter()
        .map(|&(label, href)| NavLink {
            label,
            href,
            active: current_path.trim_end_matches('/') == href,
        })
        .collect()
}

/// What the dashboard layout needs around every page.
pub struct Shell {
    pub nav: Vec<NavLink>,
    pub user_email: String,
}

impl Shell {
    pub fn new(session: &AdminSession, current_path: &str) -> Self {
        Self {
            nav: nav_links(current_path),
            user_email: session.user.email_label().to_string(),
        }
    }
}
