use base64::{Engine, prelude::BASE64_STANDARD};
use csrf::{AesGcmCsrfProtection, CsrfProtection};
use ntex::{http::Payload, web};
use ntex_session::UserSession;

use crate::{
    consts,
    front::{AppState, errors},
};

/// Extractor guarding the form endpoints.
///
/// The page keeps the csrf pair in the session and sends the token back on
/// every htmx request through the [consts::CSRF_TOKEN_HEADER_NAME] header.
#[derive(Default)]
pub struct CsrfToken;

/// Token pair encoded for transport, stored whole in the session so every tab
/// of the same browser renders the same token
#[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CsrfPair {
    pub token_base64: String,
    pub cookie_base64: String,
}

/// Creates a new token pair, the caller stores the cookie part in the session
pub fn new_csrf_pair(csrf_protec: &AesGcmCsrfProtection) -> anyhow::Result<CsrfPair> {
    let (token, cookie) = csrf_protec
        .generate_token_pair(None, consts::MAX_AGE_COOKIES)
        .map_err(|e| anyhow::anyhow!("cant set token csrf protection: {e}"))?;

    Ok(CsrfPair {
        token_base64: token.b64_string(),
        cookie_base64: cookie.b64_string(),
    })
}

/// Returns the pair stored in the session while it still verifies, otherwise
/// issues a new one and stores it.
pub fn session_csrf_pair(
    csrf_protec: &AesGcmCsrfProtection,
    session: &ntex_session::Session,
) -> anyhow::Result<CsrfPair> {
    let stored = session
        .get::<CsrfPair>(consts::CSRF_PAIR_SESSION_KEY)
        .map_err(|e| anyhow::anyhow!("csrf pair in session couldnt be read: {e}"))?;

    if let Some(pair) = stored.filter(|pair| {
        is_token_pair_valid(csrf_protec, &pair.token_base64, &pair.cookie_base64)
    }) {
        return Ok(pair);
    }

    let pair = new_csrf_pair(csrf_protec)?;
    session
        .set(consts::CSRF_PAIR_SESSION_KEY, &pair)
        .map_err(|e| anyhow::anyhow!("csrf pair couldnt be stored in session: {e}"))?;

    Ok(pair)
}

/// Checks the base64 `token` sent by the browser against the base64 `cookie`
pub fn is_token_pair_valid(csrf_protec: &AesGcmCsrfProtection, token: &str, cookie: &str) -> bool {
    let token = BASE64_STANDARD
        .decode(token.as_bytes())
        .map(|token| csrf_protec.parse_token(&token));
    let cookie = BASE64_STANDARD
        .decode(cookie.as_bytes())
        .map(|cookie| csrf_protec.parse_cookie(&cookie));

    if let (Ok(Ok(token)), Ok(Ok(cookie))) = (token, cookie) {
        return csrf_protec.verify_token_pair(&token, &cookie).is_ok();
    }

    false
}

fn is_csrf_valid(req: &web::HttpRequest) -> bool {
    let header_token = req
        .headers()
        .get(consts::CSRF_TOKEN_HEADER_NAME)
        .and_then(|value| value.to_str().ok());

    if let (Some(token), Ok(Some(pair)), Some(app_state)) = (
        header_token,
        req.get_session()
            .get::<CsrfPair>(consts::CSRF_PAIR_SESSION_KEY),
        req.app_state::<AppState>(),
    ) {
        return is_token_pair_valid(&app_state.csrf_protec, token, &pair.cookie_base64);
    }

    false
}

impl<Err> web::FromRequest<Err> for CsrfToken {
    type Error = web::Error;

    fn from_request(
        req: &web::HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        if !is_csrf_valid(req) {
            return std::future::ready(Err(errors::ServerError::InvalidCsrfToken.into()));
        }

        std::future::ready(Ok(Self))
    }
}
