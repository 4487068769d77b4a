use ::cookie::time::Duration as CookieDuration;
use ::cookie::{Cookie, SameSite as CookieSameSite};

use super::{SameSite, SessionConfig};

/// Session cookie carrying `token`, living as long as the token does.
pub fn build_session_cookie(token: &str, max_age_secs: i64, config: &SessionConfig) -> Cookie<'static> {
    let same_site = match config.cookie_same_site {
        SameSite::None => CookieSameSite::None,
        SameSite::Lax => CookieSameSite::Lax,
        SameSite::Strict => CookieSameSite::Strict,
    };

    let mut cookie = Cookie::build((config.cookie_name.clone(), token.to_owned()))
        .path(config.cookie_path.clone())
        .secure(config.cookie_secure)
        .http_only(config.cookie_http_only)
        .same_site(same_site)
        .max_age(CookieDuration::seconds(max_age_secs))
        .build();

    if let Some(ref domain) = config.cookie_domain {
        cookie.set_domain(domain.clone());
    }

    cookie
}

pub fn build_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build((config.cookie_name.clone(), String::new()))
        .path(config.cookie_path.clone())
        .http_only(config.cookie_http_only)
        .max_age(CookieDuration::ZERO)
        .build();

    if let Some(ref domain) = config.cookie_domain {
        cookie.set_domain(domain.clone());
    }

    cookie
}

/// Finds the session cookie among raw `Cookie` header values.
pub fn find_session_token<'a, I>(header_values: I, config: &SessionConfig) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    header_values
        .into_iter()
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == config.cookie_name && !c.value().is_empty())
        .map(|c| c.value().to_owned())
}
