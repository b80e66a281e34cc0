use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use url::Url;

/// Cookie jar that also remembers the `Set-Cookie` lines it accepted, so
/// the session can be written out and replayed by a later process.
///
/// Lines are keyed by cookie name; a newer line for the same name replaces
/// the older one, including the expired line a logout sends.
#[derive(Default)]
pub struct SessionCookies {
    jar: ArcSwap<Jar>,
    lines: ArcSwap<BTreeMap<String, String>>,
}

impl SessionCookies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted `Set-Cookie` lines, in cookie-name order.
    #[must_use]
    pub fn export(&self) -> Vec<String> {
        self.lines.load().values().cloned().collect()
    }

    /// Feed previously exported lines back in as if `url` had just sent them.
    pub fn restore<I>(&self, lines: I, url: &Url)
    where
        I: IntoIterator<Item = String>,
    {
        let headers: Vec<HeaderValue> = lines
            .into_iter()
            .filter_map(|line| HeaderValue::from_str(&line).ok())
            .collect();
        self.set_cookies(&mut headers.iter(), url);
    }

    /// Forget every cookie.
    pub fn clear(&self) {
        self.jar.store(Arc::new(Jar::default()));
        self.lines.store(Arc::default());
    }
}

fn cookie_name(line: &str) -> Option<&str> {
    let (name, _) = line.split_once('=')?;
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

impl CookieStore for SessionCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let accepted: Vec<(String, String)> = cookie_headers
            .filter_map(|header| header.to_str().ok())
            .filter_map(|line| Some((cookie_name(line)?.to_owned(), line.to_owned())))
            .collect();
        if accepted.is_empty() {
            return;
        }

        let jar = self.jar.load();
        for (_, line) in &accepted {
            jar.add_cookie_str(line, url);
        }
        self.lines.rcu(|lines| {
            let mut next = BTreeMap::clone(lines);
            next.extend(accepted.iter().cloned());
            next
        });
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.load().cookies(url)
    }
}
