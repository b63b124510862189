use axum_extra::extract::cookie::Cookie;

pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod verify_otp;

pub use login::login;
pub use logout::logout;
pub use refresh_token::refresh_token;
pub use verify_otp::verify_otp;

/// Name of the HTTP-only cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Build the refresh-token cookie.
///
/// HTTP-only always; Secure per deployment configuration.
pub(crate) fn refresh_cookie(value: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(REFRESH_COOKIE, value);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_path("/");
    cookie
}

/// Build a removal cookie matching the one set at login.
pub(crate) fn clear_refresh_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(REFRESH_COOKIE, "");
    cookie.set_path("/");
    cookie
}
