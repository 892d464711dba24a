use chrono::{DateTime, Duration, Utc};

use nf_core::{Article, PLACEHOLDER_IMAGE_URL};

/// Embedded articles served whenever the live fetch fails. The content
/// ships with the crate, so degraded mode needs nothing from the network.
/// Timestamps step back one day per entry from `now`, newest first.
pub fn fallback_articles(now: DateTime<Utc>) -> Vec<Article> {
    vec![
        Article {
            title: "Rhinoplasty: Getting Started with a Nose Reshaping Procedure".to_string(),
            description: "Everything you need to know about nose reshaping surgery, including \
                          cost, recovery, and choosing a surgeon."
                .to_string(),
            url: "https://www.plasticsurgery.org/cosmetic-procedures/rhinoplasty".to_string(),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            published_at: now,
            source_name: "American Society of Plastic Surgeons".to_string(),
        },
        Article {
            title: "Rhinoplasty (Nose Job): Purpose, Procedure, Risks, Recovery".to_string(),
            description: "Learn about rhinoplasty (nose job) surgery, including what to expect \
                          during recovery and potential risks of the procedure."
                .to_string(),
            url: "https://www.hopkinsmedicine.org/health/treatment-tests-and-therapies/rhinoplasty"
                .to_string(),
            image_url: "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b".to_string(),
            published_at: now - Duration::days(1),
            source_name: "Johns Hopkins Medicine".to_string(),
        },
        Article {
            title: "Rhinoplasty - Mayo Clinic".to_string(),
            description: "Rhinoplasty can change bone, cartilage, skin or all three. Talk with \
                          your surgeon about whether rhinoplasty is appropriate for you."
                .to_string(),
            url: "https://www.mayoclinic.org/tests-procedures/rhinoplasty/about/pac-20384532"
                .to_string(),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            published_at: now - Duration::days(2),
            source_name: "Mayo Clinic".to_string(),
        },
        Article {
            title: "What to Expect During Recovery After Rhinoplasty".to_string(),
            description: "Prepare for rhinoplasty recovery with this timeline of what to expect \
                          from your surgeon after nose surgery."
                .to_string(),
            url: "https://www.plasticsurgery.org/news/blog/what-to-expect-during-your-rhinoplasty-recovery"
                .to_string(),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            published_at: now - Duration::days(3),
            source_name: "American Society of Plastic Surgeons".to_string(),
        },
        Article {
            title: "Rhinoplasty | ASPS".to_string(),
            description: "Also known as nose surgery or a nose job, rhinoplasty reshapes the nose \
                          to improve its appearance and often its function."
                .to_string(),
            url: "https://www.plasticsurgery.org/cosmetic-procedures/rhinoplasty/animation"
                .to_string(),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            published_at: now - Duration::days(4),
            source_name: "American Society of Plastic Surgeons".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fallback_entry_is_publishable() {
        let articles = fallback_articles(Utc::now());
        assert_eq!(articles.len(), 5);
        for article in &articles {
            assert!(article.is_valid(), "invalid fallback entry: {}", article.title);
            assert!(!article.source_name.is_empty());
            assert!(!article.image_url.is_empty());
        }
    }

    #[test]
    fn entries_step_back_one_day_each() {
        let now = Utc::now();
        let articles = fallback_articles(now);
        for (i, article) in articles.iter().enumerate() {
            assert_eq!(article.published_at, now - Duration::days(i as i64));
        }
    }

    #[test]
    fn deterministic_for_a_given_instant() {
        let now = Utc::now();
        assert_eq!(fallback_articles(now), fallback_articles(now));
    }
}
