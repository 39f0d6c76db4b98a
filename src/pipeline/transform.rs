use crate::types::{CleanRecord, RawRecord};
use tracing::debug;

/// Cleans a batch of raw records, dropping the ones that fail validation.
///
/// Pure and order-preserving: the same input always yields the same clean
/// sequence, in input order, plus the count of rejected records. A malformed
/// record is rejected, never fatal to the batch.
pub fn transform(records: &[RawRecord]) -> (Vec<CleanRecord>, usize) {
    let mut clean = Vec::with_capacity(records.len());
    let mut rejected = 0usize;

    for record in records {
        let name = record.name.trim();
        let city = record.city.trim();
        let condition = record.condition.trim();

        if name.is_empty() || city.is_empty() || condition.is_empty() {
            debug!(
                raw_id = ?record.id,
                "Rejecting record with empty name, city, or condition"
            );
            rejected += 1;
            continue;
        }

        clean.push(CleanRecord {
            name: title_case(name),
            city: title_case(city),
            condition: condition.to_lowercase(),
            description: record.description.clone(),
            image_url: record.image_url.clone(),
        });
    }

    (clean, rejected)
}

/// Uppercases the first letter of every word, lowercases the rest.
///
/// A word starts after any non-alphabetic character, so inner punctuation and
/// spacing are preserved and the function is idempotent.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn raw(name: &str, city: &str, condition: &str) -> RawRecord {
        RawRecord {
            id: None,
            name: name.to_string(),
            city: city.to_string(),
            condition: condition.to_string(),
            description: None,
            image_url: None,
            created_at: Utc::now(),
            processed: false,
        }
    }

    #[test]
    fn normalizes_accepted_and_counts_rejected() {
        let records = vec![raw(" ana ", "san jose", " Sunny "), raw("Bob", "", "rain")];

        let (clean, rejected) = transform(&records);

        assert_eq!(rejected, 1);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].name, "Ana");
        assert_eq!(clean[0].city, "San Jose");
        assert_eq!(clean[0].condition, "sunny");
    }

    #[test]
    fn rejects_whitespace_only_fields() {
        let records = vec![
            raw("   ", "Lima", "cloudy"),
            raw("Carla", "Lima", "  "),
            raw("Carla", "Lima", "cloudy"),
        ];

        let (clean, rejected) = transform(&records);
        assert_eq!(rejected, 2);
        assert_eq!(clean.len(), 1);
    }

    #[test]
    fn idempotent_on_already_clean_input() {
        let records = vec![
            raw("Ana Maria", "San Jose", "sunny"),
            raw("Bob", "Seattle", "light rain"),
        ];
        let (first, _) = transform(&records);

        let reclean: Vec<RawRecord> = first
            .iter()
            .map(|c| raw(&c.name, &c.city, &c.condition))
            .collect();
        let (second, rejected) = transform(&reclean);

        assert_eq!(rejected, 0);
        assert_eq!(first, second);
    }

    #[test]
    fn preserves_input_order_of_accepted_records() {
        let records = vec![
            raw("zoe", "quito", "fog"),
            raw("", "quito", "fog"),
            raw("ana", "quito", "fog"),
        ];

        let (clean, rejected) = transform(&records);
        assert_eq!(rejected, 1);
        let names: Vec<&str> = clean.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zoe", "Ana"]);
    }

    #[test]
    fn carries_optional_fields_through_unchanged() {
        let mut record = raw("ana", "quito", "fog");
        record.description = Some("thick morning fog".to_string());
        record.image_url = None;

        let (clean, _) = transform(&[record]);
        assert_eq!(clean[0].description.as_deref(), Some("thick morning fog"));
        assert!(clean[0].image_url.is_none());
    }

    #[test]
    fn title_case_handles_punctuation_word_breaks() {
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("SAN  JOSE"), "San  Jose");
        assert_eq!(title_case("méxico"), "México");
    }
}
