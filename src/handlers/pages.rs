use axum::response::Html;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::auth;

/// Minimal HTML escaping for provider-supplied profile text.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Sign-in page. Shows the login link, or the profile plus links to the
/// search page and sign-out when a session is present.
pub async fn home(jar: SignedCookieJar) -> Html<String> {
    let body = match auth::current_user(&jar) {
        Some(user) => {
            let avatar = user
                .avatar
                .as_deref()
                .map(|url| {
                    format!(
                        r#"<img src="{}" alt="Profile" width="80" height="80">"#,
                        escape_html(url)
                    )
                })
                .unwrap_or_default();
            let email = user
                .email
                .as_deref()
                .map(|email| format!("<p>{}</p>", escape_html(email)))
                .unwrap_or_default();
            format!(
                r#"<p>Welcome, {}!</p>
  {avatar}
  {email}
  <p><a href="/tweets">Search tweets →</a></p>
  <p><a href="/logout">Sign out</a></p>"#,
                escape_html(&user.name)
            )
        }
        None => r#"<p><a href="/login">Sign in with X (Twitter)</a></p>"#.to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Tweet Search</title>
</head>
<body>
  <h1>Tweet Search</h1>
  {body}
</body>
</html>
"#
    ))
}

/// Search page. All form state lives client-side; the script calls the
/// gateway and renders rows from the JSON it gets back.
pub async fn tweets_page() -> Html<&'static str> {
    Html(TWEETS_PAGE)
}

const TWEETS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Tweet Search</title>
  <style>
    body { max-width: 48rem; margin: 2rem auto; font-family: sans-serif; }
    label { display: block; margin-bottom: 0.5rem; }
    article { border: 1px solid #ccc; border-radius: 8px; padding: 1rem; margin: 1rem 0; }
    #query { font-family: monospace; background: #eef; padding: 0.5rem; }
    #error { color: #b00; }
  </style>
</head>
<body>
  <h1>Tweet Search</h1>
  <p>A keyword matches plain text, @mentions and #hashtags.</p>

  <label>Keyword <input id="keyword" type="text" value="mantle"></label>
  <label>Min likes <input id="min-likes" type="number" min="0" value="0"></label>
  <label>Min retweets <input id="min-retweets" type="number" min="0" value="0"></label>
  <label>Min replies <input id="min-replies" type="number" min="0" value="0"></label>
  <button id="search-button">Search</button>

  <p id="query" hidden></p>
  <p id="error" hidden></p>
  <p id="count" hidden></p>
  <div id="results"></div>

  <script>
    const keywordInput = document.getElementById("keyword");
    const button = document.getElementById("search-button");
    const errorBox = document.getElementById("error");
    const queryBox = document.getElementById("query");
    const countBox = document.getElementById("count");
    const results = document.getElementById("results");

    function showError(message) {
      errorBox.textContent = message;
      errorBox.hidden = false;
    }

    function clearError() {
      errorBox.hidden = true;
      errorBox.textContent = "";
    }

    async function searchTweets() {
      const keyword = keywordInput.value;
      if (!keyword.trim()) {
        showError("Please enter a keyword");
        return;
      }

      button.disabled = true;
      button.textContent = "Searching...";
      clearError();

      try {
        const params = new URLSearchParams({
          keyword: keyword,
          min_likes: document.getElementById("min-likes").value || "0",
          min_retweets: document.getElementById("min-retweets").value || "0",
          min_replies: document.getElementById("min-replies").value || "0",
        });

        const response = await fetch(`/api/tweets/search?${params}`);

        if (!response.ok) {
          const errorData = await response.json().catch(() => ({}));
          throw new Error(errorData.message || errorData.error || "Failed to fetch tweets");
        }

        const data = await response.json();
        render(data.tweets || [], data.query || "");
      } catch (err) {
        showError(err instanceof Error ? err.message : "Something went wrong");
      } finally {
        button.disabled = false;
        button.textContent = "Search";
      }
    }

    function metricsOf(tweet) {
      const m = tweet.public_metrics || {};
      return `❤️ ${m.like_count || 0}  🔄 ${m.retweet_count || 0}  💬 ${m.reply_count || 0}`;
    }

    function render(tweets, query) {
      queryBox.hidden = !query;
      queryBox.textContent = query ? `Query: ${query}` : "";
      countBox.hidden = tweets.length === 0;
      countBox.textContent = `${tweets.length} tweets found`;
      results.replaceChildren();

      for (const tweet of tweets) {
        const item = document.createElement("article");

        const text = document.createElement("p");
        text.textContent = tweet.text;

        const meta = document.createElement("p");
        const when = tweet.created_at ? new Date(tweet.created_at).toLocaleString() : "";
        meta.textContent = `${metricsOf(tweet)}  ${when}`;

        const link = document.createElement("a");
        link.href = `https://x.com/i/web/status/${tweet.id}`;
        link.target = "_blank";
        link.rel = "noopener noreferrer";
        link.textContent = "View tweet →";

        item.append(text, meta, link);
        results.append(item);
      }
    }

    button.addEventListener("click", searchTweets);
    keywordInput.addEventListener("keydown", (event) => {
      if (event.key === "Enter") searchTweets();
    });
  </script>
</body>
</html>
"#;
