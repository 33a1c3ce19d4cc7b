use crate::domain::report::RiskBucket;

pub fn badge_class(bucket: RiskBucket) -> &'static str {
    match bucket {
        RiskBucket::Low => "risk-badge risk-low",
        RiskBucket::Medium => "risk-badge risk-medium",
        RiskBucket::High => "risk-badge risk-high",
        RiskBucket::Unknown => "risk-badge risk-unknown",
    }
}

pub fn risk_badge(bucket: RiskBucket) -> String {
    format!(
        r#"<span class="{}">{}</span>"#,
        badge_class(bucket),
        bucket.as_str().to_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_upper_cased_label_with_category_class() {
        assert_eq!(
            risk_badge(RiskBucket::Low),
            r#"<span class="risk-badge risk-low">LOW</span>"#
        );
        assert_eq!(
            risk_badge(RiskBucket::Medium),
            r#"<span class="risk-badge risk-medium">MEDIUM</span>"#
        );
        assert_eq!(
            risk_badge(RiskBucket::High),
            r#"<span class="risk-badge risk-high">HIGH</span>"#
        );
    }

    #[test]
    fn classes_are_distinct_per_category() {
        let classes = [
            badge_class(RiskBucket::Low),
            badge_class(RiskBucket::Medium),
            badge_class(RiskBucket::High),
            badge_class(RiskBucket::Unknown),
        ];
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_bucket_has_its_own_badge() {
        assert_eq!(
            risk_badge(RiskBucket::Unknown),
            r#"<span class="risk-badge risk-unknown">UNKNOWN</span>"#
        );
    }
}
