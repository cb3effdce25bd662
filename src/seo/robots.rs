//! robots.txt rendering.

use std::fmt::Write as _;

use crate::config::schema::RobotsConfig;

/// Render robots.txt for the site at `site_url`.
pub fn render_robots(config: &RobotsConfig, site_url: &str) -> String {
    let site_url = site_url.trim_end_matches('/');
    let mut out = String::from("User-agent: *\nAllow: /\n");
    for path in &config.disallow {
        let _ = writeln!(out, "Disallow: {path}");
    }

    for agent in &config.blocked_agents {
        let _ = write!(out, "\nUser-agent: {agent}\nDisallow: /\n");
    }

    let _ = write!(out, "\nSitemap: {site_url}/sitemap.xml\nHost: {site_url}\n");
    out
}
