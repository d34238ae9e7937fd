/// Cookie carrying the CSRF token issued by the backend
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header the token is echoed in on state-mutating calls
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Find a cookie value in a `Cookie`-style string (`a=1; b=2`)
pub fn token_from_cookies(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_found_among_cookies() {
        let cookies = "sessionid=abc; csrftoken=tok123; theme=dark";
        assert_eq!(token_from_cookies(cookies, CSRF_COOKIE_NAME), Some("tok123".to_string()));
    }

    #[test]
    fn test_token_missing() {
        assert_eq!(token_from_cookies("sessionid=abc", CSRF_COOKIE_NAME), None);
        assert_eq!(token_from_cookies("", CSRF_COOKIE_NAME), None);
    }

    #[test]
    fn test_token_value_may_contain_equals() {
        assert_eq!(token_from_cookies("csrftoken=a=b", CSRF_COOKIE_NAME), Some("a=b".to_string()));
    }

    #[test]
    fn test_name_must_match_exactly() {
        assert_eq!(token_from_cookies("xcsrftoken=nope", CSRF_COOKIE_NAME), None);
    }
}
