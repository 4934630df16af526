use crate::models::Listing;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

const SUFFIX_LEN: usize = 4;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// URL-safe, lowercase, hyphenated form of a display string.
///
/// Accents are stripped (`"Imóveis à venda"` becomes `"imoveis-a-venda"`),
/// whitespace runs become a single `-`, and anything outside `[a-z0-9_-]`
/// is dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().nfd() {
        let c = if c.is_whitespace() { '-' } else { c };
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            continue;
        }
        if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Location segment of a listing URL: the city when known, else the state
pub fn location_slug(city: Option<&str>, state: Option<&str>) -> String {
    let city = slugify(city.unwrap_or_default());
    if !city.is_empty() {
        return city;
    }
    slugify(state.unwrap_or_default())
}

/// Slug for a new listing: the title plus a short random suffix
pub fn listing_slug(title: &str) -> String {
    format!("{}-{}", slugify(title), random_suffix())
}

fn random_suffix() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        out.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    out
}

/// Public path of a listing page, if it has a slug
pub fn listing_path(listing: &Listing) -> Option<String> {
    let slug = listing.slug.as_deref()?;
    if listing.location.is_empty() || listing.category.is_empty() {
        return Some(format!("anuncio/{}", slug));
    }
    Some(format!(
        "{}/{}/{}",
        location_slug(Some(&listing.location), Some(&listing.state)),
        slugify(&listing.category),
        slug
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRef, RawListing};
    use crate::normalize::{normalize_row, RowDefaults};

    #[test]
    fn slugify_strips_accents_and_punctuation() {
        assert_eq!(slugify("Carros, vans e utilitários"), "carros-vans-e-utilitarios");
        assert_eq!(slugify("  São   Paulo!! "), "sao-paulo");
        assert_eq!(slugify("--Já--visto--"), "ja-visto");
        assert_eq!(slugify("snake_case ok"), "snake_case-ok");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn location_prefers_city() {
        assert_eq!(location_slug(Some("Florianópolis"), Some("SC")), "florianopolis");
        assert_eq!(location_slug(Some(""), Some("Santa Catarina")), "santa-catarina");
        assert_eq!(location_slug(None, None), "");
    }

    #[test]
    fn listing_slug_has_short_suffix() {
        let slug = listing_slug("Apartamento 2 quartos");
        let (base, suffix) = slug.rsplit_once('-').unwrap();
        assert_eq!(base, "apartamento-2-quartos");
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn listing_path_uses_location_and_category() {
        let raw = RawListing {
            id: "1".to_string(),
            slug: Some("gol-2012-ab12".to_string()),
            city: Some("Blumenau".to_string()),
            categories: Some(CategoryRef {
                slug: "carros-usados".to_string(),
                name: None,
            }),
            ..Default::default()
        };
        let mut listing = normalize_row(raw, &RowDefaults::default());
        assert_eq!(
            listing_path(&listing).as_deref(),
            Some("blumenau/carros-usados/gol-2012-ab12")
        );

        listing.location.clear();
        assert_eq!(listing_path(&listing).as_deref(), Some("anuncio/gol-2012-ab12"));

        listing.slug = None;
        assert_eq!(listing_path(&listing), None);
    }
}
