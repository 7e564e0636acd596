use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;
use thiserror::Error;

pub const SHORTCODE_LENGTH: usize = 6;

// No GeoIP backend is wired up; every visit records this placeholder.
const GEOLOCATION_PLACEHOLDER: &str = "mock-geolocation";

/// One recorded access of a short link.
#[derive(Debug, Clone, Serialize)]
pub struct Visit {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub geolocation: String,
}

#[derive(Debug, Clone)]
pub struct Link {
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: u64,
    pub visits: Vec<Visit>,
}

#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub shortcode: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum VisitOutcome {
    Redirect(String),
    Expired,
}

#[derive(Debug, Error)]
pub enum ShortcodeError {
    #[error("shortcode is not alphanumeric")]
    Invalid,
    #[error("shortcode is already taken")]
    Taken,
}

/// In-memory short-link registry. Links are never evicted; expiry is
/// enforced at visit time only, so statistics stay readable for
/// expired links.
#[derive(Default)]
pub struct LinkStore {
    links: DashMap<String, Link>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a link under a custom or freshly generated shortcode.
    ///
    /// Custom shortcodes must be non-empty alphanumeric and unused.
    /// `validity_minutes` may be non-positive, which produces a link
    /// that is already expired.
    pub fn create(
        &self,
        long_url: &str,
        validity_minutes: i64,
        custom: Option<&str>,
    ) -> Result<CreatedLink, ShortcodeError> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(validity_minutes)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let link = Link {
            long_url: long_url.to_string(),
            created_at: now,
            expires_at,
            clicks: 0,
            visits: Vec::new(),
        };

        match custom {
            Some(code) => {
                if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(ShortcodeError::Invalid);
                }
                // Entry API keeps check-and-insert atomic per key.
                match self.links.entry(code.to_string()) {
                    Entry::Occupied(_) => Err(ShortcodeError::Taken),
                    Entry::Vacant(slot) => {
                        slot.insert(link);
                        Ok(CreatedLink {
                            shortcode: code.to_string(),
                            expires_at,
                        })
                    }
                }
            }
            None => loop {
                let code = random_shortcode();
                match self.links.entry(code.clone()) {
                    Entry::Occupied(_) => continue,
                    Entry::Vacant(slot) => {
                        slot.insert(link);
                        break Ok(CreatedLink {
                            shortcode: code,
                            expires_at,
                        });
                    }
                }
            },
        }
    }

    /// Record a click and return where to redirect, or why not.
    pub fn record_visit(&self, shortcode: &str, referrer: &str) -> Option<VisitOutcome> {
        let mut link = self.links.get_mut(shortcode)?;
        if link.expires_at < Utc::now() {
            return Some(VisitOutcome::Expired);
        }
        link.clicks += 1;
        link.visits.push(Visit {
            timestamp: Utc::now(),
            referrer: referrer.to_string(),
            geolocation: GEOLOCATION_PLACEHOLDER.to_string(),
        });
        Some(VisitOutcome::Redirect(link.long_url.clone()))
    }

    /// Snapshot a link for the statistics endpoint. Expired links are
    /// still reported.
    pub fn stats(&self, shortcode: &str) -> Option<Link> {
        self.links.get(shortcode).map(|link| link.value().clone())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

fn random_shortcode() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHORTCODE_LENGTH)
        .map(char::from)
        .collect()
}
