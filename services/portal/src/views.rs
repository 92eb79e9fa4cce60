//! HTML rendering for the portal pages
//!
//! Plain string glue around the three pages the portal serves. Every
//! user-provided value is escaped before interpolation.

/// Escape a value for safe interpolation into HTML text or attributes.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Shared page shell
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | Omnitrix Portal</title>
</head>
<body>
  <main class="container">
{body}
  </main>
</body>
</html>
"#
    )
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(
            r#"    <p class="error" role="alert">{}</p>
"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

/// Render the login entry form
pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"    <h1>Omnitrix Portal</h1>
{banner}    <form method="post" action="/login" class="login-page">
      <label for="username">Username or Email</label>
      <input type="text" id="username" name="username" autocomplete="username">
      <label for="password">Password</label>
      <input type="password" id="password" name="password" autocomplete="current-password">
      <button type="submit">Log In</button>
    </form>
    <p>No account yet? <a href="/signup">Sign up</a></p>"#,
        banner = error_banner(error),
    );
    layout("Login", &body)
}

/// Render the signup form
///
/// Previously submitted username and email are carried back into the
/// form on a failed attempt; password fields never are.
pub fn signup_page(error: Option<&str>, username: &str, email: &str) -> String {
    let body = format!(
        r#"    <h1>Join the Omnitrix Portal</h1>
{banner}    <form method="post" action="/signup" class="signup-page">
      <label for="username">Username</label>
      <input type="text" id="username" name="username" value="{username}" autocomplete="username">
      <label for="email">Email</label>
      <input type="email" id="email" name="email" value="{email}" autocomplete="email">
      <label for="password">Password</label>
      <input type="password" id="password" name="password" autocomplete="new-password">
      <label for="confirmPassword">Confirm Password</label>
      <input type="password" id="confirmPassword" name="confirmPassword" autocomplete="new-password">
      <button type="submit">Sign Up</button>
    </form>
    <p>Already have an account? <a href="/login">Log in</a></p>"#,
        banner = error_banner(error),
        username = escape_html(username),
        email = escape_html(email),
    );
    layout("Sign Up", &body)
}

/// Render the protected landing view
pub fn dashboard_page(username: &str, email: &str) -> String {
    let body = format!(
        r#"    <h1>Welcome, {username}!</h1>
    <p>It's Hero Time!</p>
    <dl>
      <dt>Username</dt>
      <dd>{username}</dd>
      <dt>Email</dt>
      <dd>{email}</dd>
    </dl>
    <a href="/logout">Log out</a>"#,
        username = escape_html(username),
        email = escape_html(email),
    );
    layout("Dashboard", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_login_page_shows_error_banner() {
        let page = login_page(Some("Invalid credentials"));
        assert!(page.contains("Invalid credentials"));
        assert!(login_page(None).contains("action=\"/login\""));
    }

    #[test]
    fn test_signup_page_preserves_submitted_values() {
        let page = signup_page(Some("Email already registered"), "ben10", "ben@omnitrix.io");
        assert!(page.contains(r#"value="ben10""#));
        assert!(page.contains(r#"value="ben@omnitrix.io""#));
        assert!(page.contains("Email already registered"));
    }

    #[test]
    fn test_dashboard_page_escapes_values() {
        let page = dashboard_page("<b>ben</b>", "ben@omnitrix.io");
        assert!(page.contains("&lt;b&gt;ben&lt;/b&gt;"));
        assert!(!page.contains("<b>ben</b>"));
    }
}
