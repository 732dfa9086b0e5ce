use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 站内路径：以 / 开头，仅含字母数字与 / - _ .
static REDIRECT_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/[A-Za-z0-9/_.-]*$").expect("Invalid redirect path regex"));

static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("Invalid currency regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// ISO 4217 风格的三位大写货币代码
pub fn validate_currency(currency: &str) -> Result<(), &'static str> {
    if !CURRENCY_RE.is_match(currency) {
        return Err("Currency must be a three-letter code such as USD");
    }
    Ok(())
}

/// 是否可以作为登录后的跳转目标（拒绝协议相对地址 `//host`）
pub fn is_safe_redirect_path(path: &str) -> bool {
    REDIRECT_PATH_RE.is_match(path) && !path.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("ada.lovelace@example.com").is_ok());
        assert!(validate_email("admin@example").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_currency() {
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("usd").is_err());
        assert!(validate_currency("EURO").is_err());
    }

    #[test]
    fn test_redirect_path() {
        assert!(is_safe_redirect_path("/"));
        assert!(is_safe_redirect_path("/students/new"));
        assert!(is_safe_redirect_path("/reports/grade_v2.html"));
        assert!(!is_safe_redirect_path("//evil.example.com"));
        assert!(!is_safe_redirect_path("https://evil.example.com"));
        assert!(!is_safe_redirect_path("/students?x=1"));
        assert!(!is_safe_redirect_path("students"));
    }
}
