use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};

/// Languages the client asked for, best first, as sent in `Accept-Language`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserLanguage(Vec<String>);

impl UserLanguage {
    pub fn from_header(value: &str) -> Self {
        let mut weighted = value
            .split(',')
            .enumerate()
            .filter_map(|(position, entry)| {
                let mut params = entry.split(';');
                let tag = params.next()?.trim();
                if tag.is_empty() || tag == "*" {
                    return None;
                }

                let quality = params
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);

                (quality > 0.0).then(|| (tag.to_owned(), quality, position))
            })
            .collect::<Vec<_>>();

        weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)));

        Self(weighted.into_iter().map(|(tag, _, _)| tag).collect())
    }

    pub fn preferred_languages(&self) -> &[String] {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for UserLanguage {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(UserLanguage::from_header)
            .unwrap_or_default())
    }
}

/// Maps a language tag onto a bundled locale.
///
/// Exact matches win (case-insensitive), then the primary subtag, so `zh`
/// and `zh-Hans-CN` both land on `zh-CN`.
pub fn resolve_locale(tag: &str) -> Option<&'static str> {
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }

    let locales = rust_i18n::available_locales!();

    if let Some(locale) = locales.iter().find(|l| l.eq_ignore_ascii_case(tag)) {
        return Some(*locale);
    }

    let primary = tag.split(['-', '_']).next()?;

    locales
        .iter()
        .find(|l| {
            l.split('-')
                .next()
                .is_some_and(|p| p.eq_ignore_ascii_case(primary))
        })
        .copied()
}
