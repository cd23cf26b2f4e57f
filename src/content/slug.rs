/// Convert a title to a URL-friendly slug: lowercase, trimmed, spaces
/// replaced with hyphens, `&` replaced with `and`.
///
/// Not injective: "Rock & Roll" and "rock and roll " both map to
/// `rock-and-roll`. Lookup resolves such collisions to the first entry in
/// document order (see `ResolveStrategy::resolve`).
pub fn title_to_slug(title: &str) -> String {
    title
        .to_lowercase()
        .trim()
        .replace(' ', "-")
        .replace('&', "and")
}
