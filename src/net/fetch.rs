use url::Url;

use crate::error::AuditError;

/// Result of fetching a URL
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub html: String,
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub content_type: String,
}

/// Prefix scheme-less input with `https://`.
pub fn normalize_url(url_str: &str) -> String {
    if !url_str.starts_with("http://") && !url_str.starts_with("https://") {
        format!("https://{}", url_str)
    } else {
        url_str.to_string()
    }
}

/// Fetch a URL and return the HTML content (blocking).
pub fn fetch_url(url_str: &str) -> Result<FetchResult, AuditError> {
    let url = normalize_url(url_str);

    let parsed = Url::parse(&url).map_err(|source| AuditError::InvalidUrl {
        url: url.clone(),
        source,
    })?;

    let fetch_err = |message: String| AuditError::Fetch {
        url: url.clone(),
        message,
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(
            "Mozilla/5.0 (compatible; ALICE-SEO/",
            env!("CARGO_PKG_VERSION"),
            "; +https://github.com/ext-sakamoro/ALICE-SEO)"
        ))
        .timeout(std::time::Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| fetch_err(format!("client error: {}", e)))?;

    log::info!("fetching {}", parsed);
    let response = client
        .get(parsed.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .map_err(|e| fetch_err(format!("request failed: {}", e)))?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let final_url = response.url().to_string();
    if !response.status().is_success() {
        log::warn!("{} answered HTTP {}", final_url, status);
    }

    let html = response
        .text()
        .map_err(|e| fetch_err(format!("failed to read body: {}", e)))?;

    Ok(FetchResult {
        html,
        url: final_url,
        status,
        content_type,
    })
}
