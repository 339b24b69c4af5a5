//! Names and attributes of the two token cookies.
//!
//! Both cookies are HttpOnly, `SameSite=Lax`, scoped to `/`, and not marked
//! Secure so they work over plain HTTP during development.

use axum::http::{HeaderMap, HeaderValue, header};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

pub fn token_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(false)
        .path("/")
        .build()
}

/// A cookie that tells the browser to drop `name`.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = token_cookie(name, String::new());
    cookie.make_removal();
    cookie
}

/// Reads a cookie value from request headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub fn set_cookie_value(cookie: &Cookie<'_>) -> Option<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string()).ok()
}

/// Name of the cookie a `Set-Cookie` value sets.
pub fn set_cookie_name(value: &HeaderValue) -> Option<String> {
    let raw = value.to_str().ok()?;
    Cookie::parse(raw)
        .ok()
        .map(|cookie| cookie.name().to_string())
}

/// Appends a `Set-Cookie` header for `cookie`.
pub fn append_set_cookie(headers: &mut HeaderMap, cookie: &Cookie<'_>) {
    if let Some(value) = set_cookie_value(cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}
