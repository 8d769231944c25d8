//! Admin routes and the authentication guard in front of them.

use std::fmt;

use url::form_urlencoded;

use crate::domain::session::Session;

pub const LOGIN_PATH: &str = "/login";

const PUBLIC_PATHS: [&str; 4] = ["/login", "/forgot-password", "/update-password", "/verify-otp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRoute {
    Dashboard,
    Blogs,
    Categories,
    Products,
    Orders,
    CompanyRequests,
    ProductRequests,
    Wallet,
    Settings,
    Login,
    ForgotPassword,
    VerifyOtp,
    UpdatePassword,
}

impl AdminRoute {
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Blogs => "/blog-management",
            Self::Categories => "/category",
            Self::Products => "/live-products",
            Self::Orders => "/order-history",
            Self::CompanyRequests => "/company-request",
            Self::ProductRequests => "/request-for-products",
            Self::Wallet => "/my-wallet",
            Self::Settings => "/settings",
            Self::Login => LOGIN_PATH,
            Self::ForgotPassword => "/forgot-password",
            Self::VerifyOtp => "/verify-otp",
            Self::UpdatePassword => "/update-password",
        }
    }

    pub fn is_public(self) -> bool {
        is_public_path(self.path())
    }
}

impl fmt::Display for AdminRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub fn is_public_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    PUBLIC_PATHS
        .iter()
        .any(|public| path == *public || path.starts_with(&format!("{public}/")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin { location: String },
}

/// Decide whether `path` may be shown given the current session.
pub fn guard(path: &str, session: Option<&Session>) -> GuardDecision {
    if session.is_some() || is_public_path(path) {
        return GuardDecision::Allow;
    }
    GuardDecision::RedirectToLogin {
        location: login_location(path),
    }
}

pub fn login_location(callback: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("callbackUrl", callback)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Resolve where to go after signing in; only same-origin paths are honoured.
pub fn post_login_target(callback: Option<&str>) -> String {
    match callback {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !is_public_path(path) =>
        {
            path.to_string()
        }
        _ => AdminRoute::Dashboard.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::BearerToken;

    #[test]
    fn protected_path_without_session_redirects_with_callback() {
        let decision = guard(AdminRoute::Orders.path(), None);
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                location: "/login?callbackUrl=%2Forder-history".to_string()
            }
        );
    }

    #[test]
    fn dashboard_paths_match_the_web_console() {
        assert_eq!(AdminRoute::Orders.path(), "/order-history");
        assert_eq!(AdminRoute::ProductRequests.path(), "/request-for-products");
        assert_eq!(AdminRoute::Wallet.path(), "/my-wallet");
        assert_eq!(
            login_location(AdminRoute::Wallet.path()),
            "/login?callbackUrl=%2Fmy-wallet"
        );
    }

    #[test]
    fn public_paths_are_always_allowed() {
        assert_eq!(guard("/login", None), GuardDecision::Allow);
        assert_eq!(guard("/verify-otp?x=1", None), GuardDecision::Allow);
        assert!(AdminRoute::ForgotPassword.is_public());
        assert!(!AdminRoute::Wallet.is_public());
    }

    #[test]
    fn signed_in_session_passes() {
        let session = Session::new(
            "u1",
            "Admin",
            "admin",
            BearerToken::new("t").expect("token"),
        )
        .expect("session");
        assert_eq!(guard("/my-wallet", Some(&session)), GuardDecision::Allow);
    }

    #[test]
    fn post_login_target_rejects_foreign_and_public_paths() {
        assert_eq!(post_login_target(Some("/my-wallet")), "/my-wallet");
        assert_eq!(post_login_target(Some("//evil.example")), "/");
        assert_eq!(post_login_target(Some("https://evil.example")), "/");
        assert_eq!(post_login_target(Some("/login")), "/");
        assert_eq!(post_login_target(None), "/");
    }
}
