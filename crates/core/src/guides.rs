//! Catalog of removal guides.
//!
//! Each guide walks the customer through self-service data removal on one
//! people-search directory. The catalog is fixed at compile time; its length
//! is the denominator of the guides sub-score.

use serde::Serialize;

use crate::error::CoreError;

/// One removal guide in the catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Guide {
    /// Stable identifier stored in `customer_checklist_progress.guide_slug`.
    pub slug: &'static str,
    /// Display title of the covered site.
    pub title: &'static str,
}

/// All covered people-search directories.
pub const GUIDES: &[Guide] = &[
    Guide { slug: "mrkoll", title: "Mrkoll" },
    Guide { slug: "ratsit", title: "Ratsit" },
    Guide { slug: "hitta", title: "Hitta.se" },
    Guide { slug: "eniro", title: "Eniro" },
    Guide { slug: "merinfo", title: "Merinfo" },
    Guide { slug: "birthday", title: "Birthday.se" },
    Guide { slug: "upplysning", title: "Upplysning.se" },
];

/// Number of guides in the catalog.
pub fn total_guides() -> u32 {
    GUIDES.len() as u32
}

/// Look up a guide by slug.
pub fn find_guide(slug: &str) -> Option<&'static Guide> {
    GUIDES.iter().find(|g| g.slug == slug)
}

/// Validate that a slug names a catalog guide.
pub fn validate_guide_slug(slug: &str) -> Result<(), CoreError> {
    if find_guide(slug).is_some() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown guide '{slug}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn slugs_are_unique() {
        for (i, guide) in GUIDES.iter().enumerate() {
            assert!(
                !GUIDES[i + 1..].iter().any(|g| g.slug == guide.slug),
                "duplicate slug {}",
                guide.slug
            );
        }
    }

    #[test]
    fn find_and_validate_agree() {
        assert!(find_guide("ratsit").is_some());
        assert!(validate_guide_slug("ratsit").is_ok());
        assert!(find_guide("facebook").is_none());
        assert_matches!(validate_guide_slug("facebook"), Err(CoreError::Validation(_)));
    }
}
