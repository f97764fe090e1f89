const PAGE_TEMPLATE: &str = include_str!("page.html");

/// Render the control panel page for the configured domain and zone.
pub fn render(domain: &str, zone_id: &str) -> String {
    PAGE_TEMPLATE
        .replace("{{domain}}", domain)
        .replace("{{zone}}", &truncate_zone(zone_id))
}

// Zone ids are opaque upstream identifiers; only a short prefix is shown
fn truncate_zone(zone_id: &str) -> String {
    let prefix: String = zone_id.chars().take(6).collect();
    format!("{prefix}...")
}
