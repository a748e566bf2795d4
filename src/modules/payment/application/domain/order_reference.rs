use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

const PREFIX: &str = "ord";

/// Gateway order id, `ord-{enrollment id as simple hex}-{unix millis}`.
///
/// The enrollment id is embedded so a webhook resolves to exactly one
/// (user, course) enrollment without extra lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReference {
    pub enrollment_id: Uuid,
    pub issued_at_millis: i64,
}

impl OrderReference {
    pub fn new(enrollment_id: Uuid, issued_at: DateTime<Utc>) -> Self {
        Self {
            enrollment_id,
            issued_at_millis: issued_at.timestamp_millis(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().splitn(3, '-');
        if parts.next()? != PREFIX {
            return None;
        }
        let id = parts.next()?;
        if id.len() != 32 {
            return None;
        }
        let enrollment_id = Uuid::try_parse(id).ok()?;
        let issued_at_millis = parts.next()?.parse::<i64>().ok()?;

        Some(Self {
            enrollment_id,
            issued_at_millis,
        })
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}-{}-{}",
            self.enrollment_id.simple(),
            self.issued_at_millis
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_and_parses_back() {
        let id = Uuid::parse_str("0b6c1f0e-2f7c-4a43-9d55-2b1f7f3c9a10").unwrap();
        let at = DateTime::from_timestamp_millis(1_767_225_600_123).unwrap();
        let reference = OrderReference::new(id, at);

        let s = reference.to_string();
        assert_eq!(s, "ord-0b6c1f0e2f7c4a439d552b1f7f3c9a10-1767225600123");
        assert_eq!(OrderReference::parse(&s), Some(reference));
    }

    #[test]
    fn rejects_foreign_formats() {
        assert_eq!(OrderReference::parse(""), None);
        assert_eq!(OrderReference::parse("order-123"), None);
        assert_eq!(
            OrderReference::parse("ord-0b6c1f0e-2f7c-4a43-9d55-2b1f7f3c9a10-1"),
            None
        );
        assert_eq!(
            OrderReference::parse("ord-0b6c1f0e2f7c4a439d552b1f7f3c9a10-soon"),
            None
        );
    }
}
