use proptest::prelude::*;

use witness_types::{RecordId, Role, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// has_expired agrees with the elapsed time for every ttl.
    #[test]
    fn has_expired_matches_elapsed(
        issued in 0u64..1_000_000,
        age in 0u64..1_000_000,
        ttl in 0u64..1_000_000,
    ) {
        let issued_at = Timestamp::new(issued);
        let now = Timestamp::new(issued + age);
        prop_assert_eq!(issued_at.has_expired(ttl, now), issued_at.elapsed_since(now) >= ttl);
    }

    /// Timestamp bincode serialization roundtrip.
    #[test]
    fn timestamp_bincode_roundtrip(secs in 0u64..u64::MAX) {
        let ts = Timestamp::new(secs);
        let encoded = bincode::serialize(&ts).unwrap();
        let decoded: Timestamp = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, ts);
    }

    /// RecordId preserves its raw string.
    #[test]
    fn record_id_preserves_string(raw in "[a-z0-9-]{1,40}") {
        let id = RecordId::new(raw.clone());
        prop_assert_eq!(id.as_str(), raw.as_str());
        prop_assert_eq!(id.to_string(), raw);
    }
}

#[test]
fn role_bincode_roundtrip() {
    let encoded = bincode::serialize(&Role::CertificateProvider).unwrap();
    let back: Role = bincode::deserialize(&encoded).unwrap();
    assert_eq!(back, Role::CertificateProvider);
}
